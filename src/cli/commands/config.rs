//! Config command implementation.

use crate::cli::{ConfigAction, Output};
use crate::config::Settings;
use anyhow::Result;

/// Run the config command.
pub fn run_config(action: &ConfigAction, settings: Settings) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let toml_str = toml::to_string_pretty(&settings)
                .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;
            println!("{}", toml_str);

            // Credentials only ever come from the environment.
            Output::kv("OPENAI_API_KEY", key_status(&settings.credentials.openai_api_key));
            Output::kv("DEEPGRAM_API_KEY", key_status(&settings.credentials.deepgram_api_key));
        }

        ConfigAction::Edit => {
            let config_path = Settings::default_config_path();

            if !config_path.exists() {
                settings.save()?;
                Output::info(&format!("Created default config at {}", config_path.display()));
            }

            let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
            Output::info(&format!("Opening config in {}...", editor));

            match std::process::Command::new(&editor).arg(&config_path).status() {
                Ok(s) if s.success() => Output::success("Config saved."),
                Ok(_) => Output::warning("Editor exited with non-zero status."),
                Err(e) => {
                    Output::error(&format!("Failed to open editor: {}", e));
                    Output::info(&format!("Config file is at: {}", config_path.display()));
                }
            }
        }

        ConfigAction::Path => {
            println!("{}", Settings::default_config_path().display());
        }
    }

    Ok(())
}

fn key_status(key: &Option<String>) -> &'static str {
    if key.is_some() {
        "set"
    } else {
        "not set"
    }
}
