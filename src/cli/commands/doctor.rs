//! Doctor command - verify system requirements and configuration.

use crate::cli::Output;
use crate::config::Settings;
use console::style;
use std::process::Command;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Podnews Doctor");
    println!();

    let sections = [
        (
            "Audio Fallback Tools",
            vec![
                check_tool("yt-dlp", "--version", install_hint_ytdlp()),
                check_tool("ffmpeg", "-version", install_hint_ffmpeg()),
            ],
        ),
        (
            "API Keys",
            vec![
                check_openai_key(settings.credentials.openai_api_key.as_deref()),
                check_deepgram_key(settings.credentials.deepgram_api_key.as_deref()),
            ],
        ),
        ("Directories", vec![check_temp_dir(settings)]),
        ("Configuration", vec![check_config_file()]),
    ];

    for (title, checks) in &sections {
        println!("{}", style(title).bold());
        for check in checks {
            check.print();
        }
        println!();
    }

    let checks = sections.iter().flat_map(|(_, checks)| checks);
    let errors = checks.clone().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using Podnews.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Podnews is ready to use.");
    }

    Ok(())
}

/// Check if an external tool is available.
///
/// Missing tools only disable the audio fallback, so they are warnings.
fn check_tool(name: &str, version_arg: &str, hint: &str) -> CheckResult {
    match Command::new(name).arg(version_arg).output() {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout)
                .lines()
                .next()
                .unwrap_or("installed")
                .trim()
                .to_string();

            CheckResult::ok(name, &crate::cli::preview(&version, 50))
        }
        Ok(_) => CheckResult::warning(name, "installed but not working", hint),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            CheckResult::warning(name, "not found", hint)
        }
        Err(e) => CheckResult::warning(name, &format!("error: {}", e), hint),
    }
}

fn check_openai_key(key: Option<&str>) -> CheckResult {
    match key {
        Some(key) if key.starts_with("sk-") && key.len() > 20 => {
            CheckResult::ok("OPENAI_API_KEY", &format!("configured ({})", mask(key)))
        }
        Some(_) => CheckResult::warning(
            "OPENAI_API_KEY",
            "set but format looks unusual",
            "Expected format: sk-... (OpenAI API key)",
        ),
        None => CheckResult::error(
            "OPENAI_API_KEY",
            "not set",
            "Set with: export OPENAI_API_KEY='sk-...'",
        ),
    }
}

fn check_deepgram_key(key: Option<&str>) -> CheckResult {
    match key {
        Some(key) => CheckResult::ok("DEEPGRAM_API_KEY", &format!("configured ({})", mask(key))),
        None => CheckResult::warning(
            "DEEPGRAM_API_KEY",
            "not set, videos without captions cannot be transcribed",
            "Set with: export DEEPGRAM_API_KEY='...'",
        ),
    }
}

/// Keep only the ends of a secret.
fn mask(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 12 {
        return "****".to_string();
    }
    let head: String = chars[..7].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

fn check_temp_dir(settings: &Settings) -> CheckResult {
    let temp_dir = settings.temp_dir();
    if temp_dir.is_dir() {
        CheckResult::ok("Temp directory", &temp_dir.display().to_string())
    } else {
        CheckResult::warning(
            "Temp directory",
            &format!("{} (will be created)", temp_dir.display()),
            "Directory will be created on first audio download",
        )
    }
}

/// Check if config file exists.
fn check_config_file() -> CheckResult {
    let config_path = Settings::default_config_path();
    if config_path.exists() {
        CheckResult::ok("Config file", &config_path.display().to_string())
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: podnews config edit",
        )
    }
}

/// Platform-specific install hint for yt-dlp.
fn install_hint_ytdlp() -> &'static str {
    if cfg!(target_os = "macos") {
        "Install with: brew install yt-dlp"
    } else if cfg!(target_os = "linux") {
        "Install with: pip install yt-dlp (or your package manager)"
    } else {
        "Install from: https://github.com/yt-dlp/yt-dlp"
    }
}

/// Platform-specific install hint for ffmpeg.
fn install_hint_ffmpeg() -> &'static str {
    if cfg!(target_os = "macos") {
        "Install with: brew install ffmpeg"
    } else if cfg!(target_os = "linux") {
        "Install with: sudo apt install ffmpeg (or your package manager)"
    } else {
        "Install from: https://ffmpeg.org/download.html"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_key_checks() {
        assert_eq!(check_openai_key(None).status, CheckStatus::Error);
        assert_eq!(check_openai_key(Some("abc")).status, CheckStatus::Warning);
        assert_eq!(
            check_openai_key(Some("sk-0123456789abcdefghijkl")).status,
            CheckStatus::Ok
        );
    }

    #[test]
    fn test_missing_deepgram_key_is_warning() {
        let result = check_deepgram_key(None);
        assert_eq!(result.status, CheckStatus::Warning);
        assert!(result.hint.is_some());
    }

    #[test]
    fn test_mask() {
        assert_eq!(mask("short"), "****");
        assert_eq!(mask("sk-0123456789abcdef"), "sk-0123...cdef");
    }

    #[test]
    fn test_missing_tool_is_warning() {
        let result = check_tool("podnews-no-such-tool", "--version", "install it");
        assert_eq!(result.status, CheckStatus::Warning);
    }
}
