//! Config command - manage configuration.

use anyhow::Result;
use clap::{Args, Subcommand};
use tracing::info;

use crate::config::{ENV_API_KEY, ENV_BASE_URL, FileConfig};
use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the configuration file path.
    Path,

    /// Show the current configuration (API key masked).
    Show,

    /// Write a template configuration file.
    Init,
}

/// Runs the config command.
pub fn run(args: &ConfigArgs, cli: &Cli) -> Result<()> {
    let path = cli.config.clone().unwrap_or_else(FileConfig::default_path);

    match &args.action {
        ConfigAction::Path => {
            match cli.format {
                OutputFormat::Text => println!("{}", path.display()),
                OutputFormat::Json => {
                    let formatter = JsonFormatter::new(cli.pretty);
                    let output = serde_json::json!({
                        "configFile": path.display().to_string(),
                        "exists": path.exists(),
                    });
                    println!("{}", formatter.format(&output)?);
                }
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = FileConfig::load_from(&path)?.redacted();
            match cli.format {
                OutputFormat::Text => {
                    println!("SocialScope Configuration");
                    println!("{}", "─".repeat(40));
                    println!();
                    println!("File:        {}", path.display());
                    println!("API key:     {}", show(config.api_key.as_deref()));
                    println!("Base URL:    {}", show(config.base_url.as_deref()));
                    println!("Timeout:     {}", show_num(config.timeout_ms, "ms"));
                    println!("Max retries: {}", show_num(config.max_retries, ""));
                    println!("Retry delay: {}", show_num(config.retry_delay_ms, "ms"));
                    println!();
                    println!(
                        "{} and {} override the file.",
                        ENV_API_KEY, ENV_BASE_URL
                    );
                }
                OutputFormat::Json => {
                    let formatter = JsonFormatter::new(cli.pretty);
                    println!("{}", formatter.format(&config)?);
                }
            }
            Ok(())
        }
        ConfigAction::Init => {
            FileConfig::init_at(&path)?;
            info!(path = %path.display(), "Config initialised");
            println!("Wrote {}", path.display());
            Ok(())
        }
    }
}

fn show(value: Option<&str>) -> &str {
    value.unwrap_or("(not set)")
}

fn show_num<N: std::fmt::Display>(value: Option<N>, unit: &str) -> String {
    value.map_or_else(|| "(default)".to_string(), |n| format!("{n}{unit}"))
}
