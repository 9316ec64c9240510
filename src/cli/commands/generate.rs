//! Generate command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::{preview, Output};
use crate::config::Settings;
use crate::export::{export_article, ExportFormat};
use crate::news::ArticleGenerator;
use crate::transcript::TranscriptResolver;
use crate::youtube::is_valid_youtube_url;
use anyhow::Result;
use std::path::PathBuf;

/// Run the generate command.
pub async fn run_generate(
    url: &str,
    format: Option<&str>,
    output_dir: String,
    settings: Settings,
) -> Result<()> {
    if !is_valid_youtube_url(url) {
        Output::error(&format!("Invalid YouTube URL: {}", url));
        anyhow::bail!("Invalid YouTube URL: {}", url);
    }

    // Parse before doing any provider work.
    let format: Option<ExportFormat> = format.map(str::parse).transpose()?;

    if let Err(e) = preflight::check(Operation::Generate, &settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'podnews doctor' for detailed diagnostics.");
        return Err(e.into());
    }
    let capabilities = settings.capabilities()?;

    let resolver = TranscriptResolver::from_settings(&settings)?;
    let generator = ArticleGenerator::from_settings(&settings, &capabilities)?;

    let spinner = Output::spinner("Fetching transcript...");
    let transcript = resolver.resolve(url).await;
    spinner.finish_and_clear();
    let transcript = transcript?;

    Output::info(&format!("Transcript: {}", preview(&transcript, 120)));

    let spinner = Output::spinner(&format!(
        "Generating {} articles...",
        generator.article_count()
    ));
    let articles = generator.generate(&transcript).await;
    spinner.finish_and_clear();
    let articles = articles?;

    for (index, article) in articles.iter().enumerate() {
        Output::article(index, article);
    }
    println!();

    if let Some(format) = format {
        let dir = Settings::expand_path(&output_dir);
        tokio::fs::create_dir_all(&dir).await?;
        let generated_at = chrono::Local::now().naive_local();

        for (index, article) in articles.iter().enumerate() {
            let file = export_article(article, format, generated_at)?;
            let path = unique_path(&dir, index, &file.filename);
            tokio::fs::write(&path, &file.bytes).await?;
            Output::success(&format!("Saved {}", path.display()));
        }
    }

    Ok(())
}

/// Avoid clobbering when two articles sanitize to the same filename.
fn unique_path(dir: &std::path::Path, index: usize, filename: &str) -> PathBuf {
    let path = dir.join(filename);
    if path.exists() {
        dir.join(format!("{}-{}", index + 1, filename))
    } else {
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_path() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(unique_path(dir.path(), 0, "a.txt"), dir.path().join("a.txt"));

        std::fs::write(dir.path().join("a.txt"), "x").unwrap();
        assert_eq!(unique_path(dir.path(), 1, "a.txt"), dir.path().join("2-a.txt"));
    }
}
