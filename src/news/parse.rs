//! Parsing of LLM responses into news articles.
//!
//! The model is asked for a JSON array. When it does not produce one that
//! parses, a line-oriented heuristic recovers `Title:` / `Content:` / `Quote:`
//! sections instead.

use super::NewsArticle;
use crate::error::{PodnewsError, Result};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// First `[` through last `]`, across lines.
static JSON_ARRAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[.*\]").expect("JSON array pattern is valid"));

/// Content used for articles the model did not deliver.
const PLACEHOLDER_CONTENT: &str =
    "Unable to generate this article due to parsing issues. Please try again.";

/// Article fields as recovered from a response, before defaults are applied.
#[derive(Debug, Default, Clone, PartialEq)]
struct ArticleRecord {
    title: Option<String>,
    content: Option<String>,
    key_quote: Option<String>,
}

impl ArticleRecord {
    fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.key_quote.is_none()
    }
}

/// Parse a model response into exactly `count` articles.
pub fn parse_articles(response: &str, count: usize) -> Result<Vec<NewsArticle>> {
    if response.trim().is_empty() {
        return Err(PodnewsError::GenerationFailed("Empty response from LLM".to_string()));
    }

    let records = match parse_json_records(response) {
        Some(records) if !records.is_empty() => records,
        _ => {
            warn!("Structured parse failed, using section heuristic");
            parse_sections(response)
        }
    };

    if records.is_empty() {
        return Err(PodnewsError::GenerationFailed(
            "Could not recover any article from the response".to_string(),
        ));
    }

    debug!("Recovered {} article records", records.len());
    Ok(normalize(records, count))
}

/// Extract the first JSON array substring and read article records from it.
fn parse_json_records(response: &str) -> Option<Vec<ArticleRecord>> {
    let json = JSON_ARRAY.find(response)?.as_str();
    let items: Vec<Value> = serde_json::from_str(json).ok()?;

    let field = |item: &Value, key: &str| item.get(key).and_then(Value::as_str).map(str::to_string);

    Some(
        items
            .iter()
            .filter(|item| item.is_object())
            .map(|item| ArticleRecord {
                title: field(item, "title"),
                content: field(item, "content"),
                key_quote: field(item, "key_quote"),
            })
            .collect(),
    )
}

/// Keyword a section may start with.
#[derive(Debug, Clone, Copy, PartialEq)]
enum SectionKind {
    Title,
    Content,
    Quote,
    Plain,
}

/// Classify a section by its leading keyword and strip that keyword.
fn classify(section: &str) -> (SectionKind, String) {
    // Models like to decorate labels as "**Title:**" or "## Headline:".
    let trimmed = section.trim().trim_start_matches(['#', '*', ' ']);

    let labels = [
        ("title:", SectionKind::Title),
        ("headline:", SectionKind::Title),
        ("content:", SectionKind::Content),
        ("key quote:", SectionKind::Quote),
        ("key_quote:", SectionKind::Quote),
        ("quote:", SectionKind::Quote),
    ];

    for (label, kind) in labels {
        let matches = trimmed
            .get(..label.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(label));
        if matches {
            let rest = trimmed[label.len()..].trim_start_matches('*').trim();
            return (kind, rest.to_string());
        }
    }

    (SectionKind::Plain, section.trim().to_string())
}

/// Heuristic parser over blank-line separated sections.
fn parse_sections(response: &str) -> Vec<ArticleRecord> {
    let mut records = Vec::new();
    let mut current = ArticleRecord::default();

    let normalized = response.replace("\r\n", "\n");

    for section in normalized.split("\n\n").filter(|s| !s.trim().is_empty()) {
        match classify(section) {
            (SectionKind::Title, title) => {
                if !current.is_empty() {
                    records.push(std::mem::take(&mut current));
                }
                current.title = Some(title);
            }
            (SectionKind::Content, content) => current.content = Some(content),
            (SectionKind::Quote, quote) => current.key_quote = Some(quote),
            (SectionKind::Plain, text) => {
                if current.title.is_some() && current.content.is_none() {
                    current.content = Some(text);
                }
            }
        }
    }

    if !current.is_empty() {
        records.push(current);
    }

    records
}

/// Apply field defaults, pad with placeholders and truncate to `count`.
fn normalize(records: Vec<ArticleRecord>, count: usize) -> Vec<NewsArticle> {
    let mut articles: Vec<NewsArticle> = records
        .into_iter()
        .take(count)
        .enumerate()
        .map(|(i, record)| NewsArticle {
            title: record
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| default_title(i)),
            content: record.content.unwrap_or_default(),
            key_quote: record.key_quote.unwrap_or_default(),
        })
        .collect();

    while articles.len() < count {
        articles.push(NewsArticle {
            title: default_title(articles.len()),
            content: PLACEHOLDER_CONTENT.to_string(),
            key_quote: String::new(),
        });
    }

    articles
}

fn default_title(index: usize) -> String {
    format!("Tech Insight #{}", index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_with_surrounding_text() {
        let response = r#"Here are your articles:
[
  {"title": "AI Reshapes Work", "content": "Body one.", "key_quote": "It changes everything"},
  {"title": "Chips Are Scarce", "content": "Body two.", "key_quote": "We can't build fast enough"},
  {"title": "Open Source Wins", "content": "Body three.", "key_quote": "Share the weights"}
]
Let me know if you need edits."#;

        let articles = parse_articles(response, 3).unwrap();
        assert_eq!(articles.len(), 3);
        assert_eq!(articles[0].title, "AI Reshapes Work");
        assert_eq!(articles[1].content, "Body two.");
        assert_eq!(articles[2].key_quote, "Share the weights");
    }

    #[test]
    fn test_json_missing_fields_get_defaults() {
        let response = r#"[{"content": "Only content"}, {"title": "", "key_quote": "q"}, {"title": "T3", "content": "c3"}]"#;

        let articles = parse_articles(response, 3).unwrap();
        assert_eq!(articles[0].title, "Tech Insight #1");
        assert_eq!(articles[0].key_quote, "");
        assert_eq!(articles[1].title, "Tech Insight #2");
        assert_eq!(articles[1].content, "");
        assert_eq!(articles[2].title, "T3");
    }

    #[test]
    fn test_json_extra_articles_truncated_and_short_padded() {
        let five = r#"[{"title":"1","content":"a"},{"title":"2","content":"b"},{"title":"3","content":"c"},{"title":"4","content":"d"},{"title":"5","content":"e"}]"#;
        let articles = parse_articles(five, 3).unwrap();
        assert_eq!(articles.len(), 3);
        assert_eq!(articles[2].title, "3");

        let one = r#"[{"title":"Only","content":"a"}]"#;
        let articles = parse_articles(one, 3).unwrap();
        assert_eq!(articles.len(), 3);
        assert_eq!(articles[1].title, "Tech Insight #2");
        assert_eq!(articles[2].content, PLACEHOLDER_CONTENT);
    }

    #[test]
    fn test_fallback_sections() {
        let response = "Title: Markets Rally On AI\n\nContent: Stocks rose sharply.\n\nQuote: \"Buy the dip\"\n\n\
                        Headline: Regulators Circle\n\nLawmakers signaled new rules.\n\nQuote: Slow down\n\n\
                        **Title:** Startups Pivot\n\nContent: Everyone is an AI company now.";

        let articles = parse_articles(response, 3).unwrap();
        assert_eq!(articles.len(), 3);
        assert_eq!(articles[0].title, "Markets Rally On AI");
        assert_eq!(articles[0].content, "Stocks rose sharply.");
        assert_eq!(articles[0].key_quote, "\"Buy the dip\"");
        assert_eq!(articles[1].title, "Regulators Circle");
        assert_eq!(articles[1].content, "Lawmakers signaled new rules.");
        assert_eq!(articles[1].key_quote, "Slow down");
        assert_eq!(articles[2].title, "Startups Pivot");
        assert_eq!(articles[2].content, "Everyone is an AI company now.");
    }

    #[test]
    fn test_malformed_json_uses_fallback_and_pads() {
        let response = "[ not json ]\n\nTitle: Lone Story\n\nContent: Just one.";

        let articles = parse_articles(response, 3).unwrap();
        assert_eq!(articles[0].title, "Lone Story");
        assert_eq!(articles[0].content, "Just one.");
        assert_eq!(articles[1].title, "Tech Insight #2");
        assert_eq!(articles[2].title, "Tech Insight #3");
        assert!(articles.iter().all(|a| !a.content.is_empty()));
    }

    #[test]
    fn test_unrecoverable_response() {
        let err = parse_articles("I'm sorry, I can't help with that.", 3).unwrap_err();
        assert!(matches!(err, PodnewsError::GenerationFailed(_)));

        let err = parse_articles("   \n ", 3).unwrap_err();
        assert!(matches!(err, PodnewsError::GenerationFailed(_)));
    }

    #[test]
    fn test_classify_labels() {
        assert_eq!(classify("Title: X"), (SectionKind::Title, "X".to_string()));
        assert_eq!(classify("## HEADLINE: Big"), (SectionKind::Title, "Big".to_string()));
        assert_eq!(classify("Key Quote: q"), (SectionKind::Quote, "q".to_string()));
        assert_eq!(classify("plain text"), (SectionKind::Plain, "plain text".to_string()));
    }
}
