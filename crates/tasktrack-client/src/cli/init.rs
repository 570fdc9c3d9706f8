/*
[INPUT]:  Interactive user input via CLI
[OUTPUT]: Generated YAML configuration file
[POS]:    CLI initialization layer
[UPDATE]: When AppConfig schema changes
*/

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};

use tasktrack_client::config::{ApiConfig, AppConfig, StorageConfig, default_config_path};

pub fn run_init(output: Option<PathBuf>) -> Result<()> {
    let output = output.unwrap_or_else(default_config_path);
    println!("{}", style("Welcome to tasktrack init").bold().cyan());
    println!(
        "{}",
        style("This will guide you through creating a client configuration.").dim()
    );

    let theme = ColorfulTheme::default();
    let defaults = AppConfig::default();

    println!("\n{}", style("--- Server ---").bold());
    let base_url: String = Input::with_theme(&theme)
        .with_prompt("API base URL")
        .default(defaults.api.base_url.clone())
        .interact_text()?;

    let timeout_secs: u64 = Input::with_theme(&theme)
        .with_prompt("Request timeout (seconds)")
        .default(defaults.api.timeout_secs)
        .interact_text()?;

    println!("\n{}", style("--- Session ---").bold());
    let persist = Confirm::with_theme(&theme)
        .with_prompt("Remember the session between runs?")
        .default(defaults.storage.persist)
        .interact()?;

    let config = AppConfig {
        api: ApiConfig {
            base_url,
            timeout_secs,
            ..defaults.api
        },
        storage: StorageConfig {
            persist,
            credentials_path: None,
        },
    };
    config.validate()?;

    let yaml = config.to_yaml()?;
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    std::fs::write(&output, yaml)
        .with_context(|| format!("failed to write config to {}", output.display()))?;

    println!("\n{}", style("SUCCESS!").bold().green());
    println!(
        "Configuration written to: {}",
        style(output.display()).cyan()
    );

    Ok(())
}
