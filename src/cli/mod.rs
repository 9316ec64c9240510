//! CLI module for Podnews.

pub mod commands;
mod output;
pub mod preflight;

pub use output::{preview, Output};

use clap::{Parser, Subcommand};

/// Podnews - Podcast to News
///
/// Turns YouTube podcast episodes into transcripts and short news articles.
#[derive(Parser, Debug)]
#[command(name = "podnews")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Host to bind to (defaults to server.host from config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (defaults to server.port from config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Extract the transcript of a YouTube video
    Transcript {
        /// YouTube video URL
        url: String,

        /// Write the transcript to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Generate news articles from a YouTube video
    Generate {
        /// YouTube video URL
        url: String,

        /// Also export each article in this format (txt, docx)
        #[arg(short, long)]
        format: Option<String>,

        /// Directory for exported articles
        #[arg(short, long, default_value = ".")]
        output_dir: String,
    },

    /// Check system requirements and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generate() {
        let cli = Cli::parse_from([
            "podnews",
            "-vv",
            "generate",
            "https://youtu.be/abc",
            "--format",
            "docx",
        ]);

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Generate {
                url,
                format,
                output_dir,
            } => {
                assert_eq!(url, "https://youtu.be/abc");
                assert_eq!(format.as_deref(), Some("docx"));
                assert_eq!(output_dir, ".");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_serve_defaults_to_config() {
        let cli = Cli::parse_from(["podnews", "serve"]);
        assert!(matches!(
            cli.command,
            Commands::Serve {
                host: None,
                port: None
            }
        ));
    }
}
