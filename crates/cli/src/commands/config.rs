//! Configuration commands
//!
//! Store or remove the account token and show the effective configuration.

use clap::Subcommand;
use gf_core::ConfigManager;
use serde::Serialize;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Store the account token
    SetToken(SetTokenArgs),

    /// Remove the stored token (later uploads are made as a guest)
    UnsetToken,

    /// Show the stored configuration
    Show,
}

/// Arguments for the `config set-token` command
#[derive(clap::Args, Debug)]
pub struct SetTokenArgs {
    /// Account token from the GoFile profile page
    pub token: String,
}

/// JSON output for `config show` (token masked)
#[derive(Debug, Serialize)]
struct ConfigView {
    path: String,
    token: Option<String>,
    guest: bool,
    api_base: String,
    upload_domain: String,
}

/// Execute a config subcommand
pub fn execute(cmd: ConfigCommands, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let manager = match ConfigManager::new() {
        Ok(manager) => manager,
        Err(e) => {
            formatter.error(&format!("Failed to locate configuration: {e}"));
            return ExitCode::GeneralError;
        }
    };

    run(cmd, &manager, &formatter)
}

fn run(cmd: ConfigCommands, manager: &ConfigManager, formatter: &Formatter) -> ExitCode {
    match cmd {
        ConfigCommands::SetToken(args) => {
            let token = args.token.trim().to_string();
            if token.is_empty() {
                formatter.error("Token cannot be empty");
                return ExitCode::UsageError;
            }
            match manager.update(|config| config.token = Some(token)) {
                Ok(_) => {
                    if formatter.is_json() {
                        formatter.json(&serde_json::json!({"success": true}));
                    } else {
                        formatter.success("Token saved");
                    }
                    ExitCode::Success
                }
                Err(e) => {
                    formatter.error(&format!("Failed to save configuration: {e}"));
                    ExitCode::from_error(&e)
                }
            }
        }
        ConfigCommands::UnsetToken => match manager.update(|config| config.token = None) {
            Ok(_) => {
                if formatter.is_json() {
                    formatter.json(&serde_json::json!({"success": true}));
                } else {
                    formatter.success("Token removed");
                }
                ExitCode::Success
            }
            Err(e) => {
                formatter.error(&format!("Failed to save configuration: {e}"));
                ExitCode::from_error(&e)
            }
        },
        ConfigCommands::Show => {
            let config = match manager.load() {
                Ok(config) => config,
                Err(e) => {
                    formatter.error(&format!("Failed to load configuration: {e}"));
                    return ExitCode::from_error(&e);
                }
            };

            let view = ConfigView {
                path: manager.config_path().display().to_string(),
                token: config.token.as_deref().map(mask_token),
                guest: config.guest,
                api_base: config.endpoints.api_base,
                upload_domain: config.endpoints.upload_domain,
            };

            if formatter.is_json() {
                formatter.json(&view);
            } else {
                let mut table = formatter.table(["Setting", "Value"]);
                table.add_row(["Path".to_string(), view.path]);
                table.add_row([
                    "Token".to_string(),
                    view.token.unwrap_or_else(|| "(guest)".to_string()),
                ]);
                table.add_row(["Guest".to_string(), view.guest.to_string()]);
                table.add_row(["API".to_string(), view.api_base]);
                table.add_row(["Upload domain".to_string(), view.upload_domain]);
                formatter.print_table(&table);
            }
            ExitCode::Success
        }
    }
}

/// Keep the first four characters of a token
fn mask_token(token: &str) -> String {
    let visible: String = token.chars().take(4).collect();
    if visible.len() == token.len() {
        "****".to_string()
    } else {
        format!("{visible}****")
    }
}
