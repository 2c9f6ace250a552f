//! CLI command definitions and execution
//!
//! This module contains all CLI commands and their implementations.
//! Every remote command builds one account session from the stored
//! configuration and the global flags, then maps the outcome to an exit code.

use clap::{Parser, Subcommand};
use gf_core::config::Defaults;
use gf_core::{ConfigManager, Envelope, GofileClient};
use gf_http::HttpTransport;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

mod account;
mod completions;
mod config;
mod cp;
mod ls;
mod mkdir;
mod option;
mod rm;
mod server;
mod upload;

/// gf - GoFile CLI Client
///
/// Upload files to GoFile and manage folders and contents of a GoFile
/// account. Without a token, uploads are made as a guest.
#[derive(Parser, Debug)]
#[command(name = "gf")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Disable progress spinners
    #[arg(long, global = true, default_value = "false")]
    pub no_progress: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    /// Account token, takes precedence over the stored token
    #[arg(long, global = true, env = "GOFILE_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Request guest mode (a token, when available, still takes precedence)
    #[arg(long, global = true, default_value = "false")]
    pub guest: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the best server for uploads
    Server,

    /// Upload files
    Upload(upload::UploadArgs),

    /// Create a folder
    Mkdir(mkdir::MkdirArgs),

    /// List the contents of a folder (premium accounts)
    Ls(ls::LsArgs),

    /// Set an option on a folder
    SetOption(option::SetOptionArgs),

    /// Copy contents into a folder (premium accounts)
    Cp(cp::CpArgs),

    /// Delete contents
    Rm(rm::RmArgs),

    /// Show account details
    Account,

    /// Manage the stored configuration
    #[command(subcommand)]
    Config(config::ConfigCommands),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Session-related global flags
#[derive(Debug, Clone, Default)]
pub struct SessionFlags {
    pub token: Option<String>,
    pub guest: bool,
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    // An unreadable config file is reported by the commands that need it
    let defaults = ConfigManager::new()
        .and_then(|manager| manager.load())
        .map(|config| config.defaults)
        .unwrap_or_default();
    let output_config = output_config(&cli, &defaults);
    let session = SessionFlags {
        token: cli.token,
        guest: cli.guest,
    };

    match cli.command {
        Commands::Server => server::execute(&session, output_config).await,
        Commands::Upload(args) => upload::execute(args, &session, output_config).await,
        Commands::Mkdir(args) => mkdir::execute(args, &session, output_config).await,
        Commands::Ls(args) => ls::execute(args, &session, output_config).await,
        Commands::SetOption(args) => option::execute(args, &session, output_config).await,
        Commands::Cp(args) => cp::execute(args, &session, output_config).await,
        Commands::Rm(args) => rm::execute(args, &session, output_config).await,
        Commands::Account => account::execute(&session, output_config).await,
        Commands::Config(cmd) => config::execute(cmd, output_config),
        Commands::Completions(args) => completions::execute(args),
    }
}

/// Combine the output flags with the configured defaults
///
/// A flag that is set wins; otherwise the configured default applies.
fn output_config(cli: &Cli, defaults: &Defaults) -> OutputConfig {
    OutputConfig {
        json: cli.json || defaults.output == "json",
        no_color: cli.no_color || defaults.color == "never",
        no_progress: cli.no_progress || !defaults.progress,
        quiet: cli.quiet,
    }
}

/// Build a client from the stored configuration and the global flags
pub(crate) fn connect(
    session: &SessionFlags,
    formatter: &Formatter,
) -> Result<GofileClient<HttpTransport>, ExitCode> {
    let config = match ConfigManager::new().and_then(|manager| manager.load()) {
        Ok(config) => config,
        Err(e) => {
            formatter.error(&format!("Failed to load configuration: {e}"));
            return Err(ExitCode::UsageError);
        }
    };

    let options = match config.client_options(session.token.as_deref(), session.guest) {
        Ok(options) => options,
        Err(e) => {
            formatter.error(&format!("Invalid endpoint configuration: {e}"));
            return Err(ExitCode::UsageError);
        }
    };

    let transport = match HttpTransport::new() {
        Ok(transport) => transport,
        Err(e) => {
            formatter.error(&format!("Failed to create HTTP client: {e}"));
            return Err(ExitCode::NetworkError);
        }
    };

    let client = GofileClient::with_options(transport, options);
    tracing::debug!(mode = ?client.mode(), "Session created");
    Ok(client)
}

/// Report a local error and return its exit code
pub(crate) fn fail(formatter: &Formatter, context: &str, err: &gf_core::Error) -> ExitCode {
    formatter.error(&format!("{context}: {err}"));
    ExitCode::from_error(err)
}

/// Print a service reply and return the exit code its status maps to
///
/// JSON mode prints the reply unchanged. Human mode calls `human` for `ok`
/// replies and prints the status otherwise.
pub(crate) fn report<F>(formatter: &Formatter, envelope: &Envelope, human: F) -> ExitCode
where
    F: FnOnce(&Formatter, &Envelope),
{
    if formatter.is_json() {
        formatter.json(envelope);
    } else if envelope.is_ok() {
        human(formatter, envelope);
    } else {
        formatter.error(&format!("Service returned status '{}'", envelope.status));
    }
    ExitCode::from_status(&envelope.status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_upload_with_globals() {
        let cli = Cli::try_parse_from([
            "gf", "--json", "--token", "abc", "upload", "a.txt", "b.txt", "--folder", "F",
        ])
        .unwrap();

        assert!(cli.json);
        assert_eq!(cli.token.as_deref(), Some("abc"));
        match cli.command {
            Commands::Upload(args) => {
                assert_eq!(args.files, vec!["a.txt", "b.txt"]);
                assert_eq!(args.folder.as_deref(), Some("F"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_set_option() {
        let cli =
            Cli::try_parse_from(["gf", "set-option", "folder-1", "public", "true"]).unwrap();
        match cli.command {
            Commands::SetOption(args) => {
                assert_eq!(args.folder, "folder-1");
                assert_eq!(args.option, "public");
                assert_eq!(args.value, "true");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_set_option_requires_value() {
        assert!(Cli::try_parse_from(["gf", "set-option", "folder-1", "public"]).is_err());
    }

    #[test]
    fn test_rm_requires_ids() {
        assert!(Cli::try_parse_from(["gf", "rm"]).is_err());
    }

    #[test]
    fn test_output_defaults_from_config() {
        let cli = Cli::try_parse_from(["gf", "server"]).unwrap();
        let defaults = Defaults {
            output: "json".into(),
            color: "never".into(),
            progress: false,
        };

        let config = output_config(&cli, &defaults);
        assert!(config.json);
        assert!(config.no_color);
        assert!(config.no_progress);
        assert!(!config.quiet);

        let config = output_config(&cli, &Defaults::default());
        assert!(!config.json);
        assert!(!config.no_color);
        assert!(!config.no_progress);
    }

    #[test]
    fn test_report_maps_status() {
        let formatter = Formatter::new(OutputConfig {
            quiet: true,
            ..Default::default()
        });

        let ok = Envelope::new("ok", Default::default());
        let mut called = false;
        assert_eq!(report(&formatter, &ok, |_, _| called = true), ExitCode::Success);
        assert!(called);

        let denied = Envelope::new("error-auth", Default::default());
        assert_eq!(
            report(&formatter, &denied, |_, _| panic!("not called for errors")),
            ExitCode::AuthError
        );
    }
}
