//! Article export as plain text or Word documents.

use crate::error::{PodnewsError, Result};
use crate::news::NewsArticle;
use chrono::NaiveDateTime;
use docx_rs::{Docx, Paragraph, Run, Style, StyleType};
use regex::Regex;
use std::io::Cursor;
use std::sync::LazyLock;

/// Timestamp layout used in exported files.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Paragraph style applied to the article title in Word output.
const TITLE_STYLE_ID: &str = "ArticleTitle";

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("filename pattern is valid"));
static SEPARATOR_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-\s]+").expect("filename pattern is valid"));

/// Supported download formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Txt,
    Docx,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Docx => "docx",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Txt => "text/plain; charset=utf-8",
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = PodnewsError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "txt" => Ok(ExportFormat::Txt),
            "docx" => Ok(ExportFormat::Docx),
            _ => Err(PodnewsError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// A rendered article, ready to be sent or written.
#[derive(Debug, Clone)]
pub struct ExportedFile {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Derive a filesystem- and header-safe file stem from an article title.
///
/// Characters other than word characters, whitespace and `-` are dropped,
/// then runs of whitespace and hyphens collapse into a single `-`.
pub fn sanitize_filename(title: &str) -> String {
    let stripped = NON_WORD.replace_all(title, "");
    let collapsed = SEPARATOR_RUNS.replace_all(stripped.trim(), "-");
    let name = collapsed.trim_matches('-');

    if name.is_empty() {
        "article".to_string()
    } else {
        name.to_string()
    }
}

/// Render an article as plain text.
pub fn render_txt(article: &NewsArticle, generated_at: NaiveDateTime) -> String {
    format!(
        "Title: {}\n\nContent: {}\n\nGenerated on: {}\n",
        article.title,
        article.content,
        generated_at.format(TIMESTAMP_FORMAT)
    )
}

/// Render an article as a Word document.
pub fn render_docx(article: &NewsArticle, generated_at: NaiveDateTime) -> Result<Vec<u8>> {
    let title_style = Style::new(TITLE_STYLE_ID, StyleType::Paragraph)
        .name("Article Title")
        .size(48)
        .bold();

    let mut docx = Docx::new()
        .add_style(title_style)
        .add_paragraph(
            Paragraph::new()
                .style(TITLE_STYLE_ID)
                .add_run(Run::new().add_text(article.title.as_str())),
        )
        .add_paragraph(Paragraph::new().add_run(Run::new().add_text(article.content.as_str())));

    if !article.key_quote.is_empty() {
        docx = docx.add_paragraph(Paragraph::new()).add_paragraph(
            Paragraph::new().add_run(
                Run::new()
                    .add_text(format!("\"{}\"", article.key_quote))
                    .italic(),
            ),
        );
    }

    docx = docx.add_paragraph(Paragraph::new()).add_paragraph(
        Paragraph::new().add_run(Run::new().add_text(format!(
            "Generated on: {}",
            generated_at.format(TIMESTAMP_FORMAT)
        ))),
    );

    let mut buffer = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buffer)
        .map_err(|e| PodnewsError::Export(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Render an article in the given format with a derived filename.
pub fn export_article(
    article: &NewsArticle,
    format: ExportFormat,
    generated_at: NaiveDateTime,
) -> Result<ExportedFile> {
    let bytes = match format {
        ExportFormat::Txt => render_txt(article, generated_at).into_bytes(),
        ExportFormat::Docx => render_docx(article, generated_at)?,
    };

    Ok(ExportedFile {
        filename: format!("{}.{}", sanitize_filename(&article.title), format.extension()),
        content_type: format.content_type(),
        bytes,
    })
}
