//! upload command - Upload local files
//!
//! All files of one invocation share a session, so a guest upload of several
//! files lands in the folder created for the first one.

use std::path::PathBuf;

use clap::Args;
use gf_core::{ConfigManager, Envelope, GofileClient, Transport, UploadFile, UploadedFile};

use super::{SessionFlags, connect, fail};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, Spinner};

/// Upload files
#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Files to upload (glob patterns are expanded)
    #[arg(required = true)]
    pub files: Vec<String>,

    /// Destination folder id (not allowed for a guest's first upload)
    #[arg(short, long)]
    pub folder: Option<String>,

    /// Store the token issued to a guest in the configuration
    #[arg(long)]
    pub save_token: bool,
}

/// Execute the upload command
pub async fn execute(
    args: UploadArgs,
    session: &SessionFlags,
    output_config: OutputConfig,
) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let paths = match expand_paths(&args.files) {
        Ok(paths) => paths,
        Err(e) => {
            formatter.error(&e);
            return ExitCode::UsageError;
        }
    };

    let mut client = match connect(session, &formatter) {
        Ok(client) => client,
        Err(code) => return code,
    };

    let (replies, code) = upload_all(&mut client, &paths, args.folder.as_deref(), &formatter).await;

    if formatter.is_json() {
        match replies.as_slice() {
            [single] => formatter.json(single),
            _ => formatter.json(&replies),
        }
    }

    if client.session().is_upgraded_guest()
        && let Some(token) = client.token()
    {
        if args.save_token {
            save_guest_token(token, &formatter);
        } else {
            formatter.warning(&format!(
                "Uploaded as guest. Pass --token {token} to manage these files later"
            ));
        }
    }

    code
}

/// Upload each path in order, stopping at the first failure
async fn upload_all<T: Transport>(
    client: &mut GofileClient<T>,
    paths: &[PathBuf],
    folder: Option<&str>,
    formatter: &Formatter,
) -> (Vec<Envelope>, ExitCode) {
    let mut replies = Vec::with_capacity(paths.len());

    for path in paths {
        let file = match UploadFile::from_path(path).await {
            Ok(file) => file,
            Err(e) => {
                formatter.error(&format!("Cannot read '{}': {e}", path.display()));
                return (replies, ExitCode::UsageError);
            }
        };

        let spinner = Spinner::start(formatter.config(), &format!("Uploading {}", file.file_name));
        let result = client.upload(file, folder).await;
        spinner.finish_and_clear();

        let envelope = match result {
            Ok(envelope) => envelope,
            Err(e) => {
                let context = format!("Failed to upload '{}'", path.display());
                return (replies, fail(formatter, &context, &e));
            }
        };

        if !envelope.is_ok() {
            formatter.error(&format!(
                "Upload of '{}' was rejected with status '{}'",
                path.display(),
                envelope.status
            ));
            let code = ExitCode::from_status(&envelope.status);
            replies.push(envelope);
            return (replies, code);
        }

        if !formatter.is_json() {
            match envelope.data_as::<UploadedFile>() {
                Ok(uploaded) => formatter.success(&format!(
                    "{} -> {}",
                    uploaded.file_name, uploaded.download_page
                )),
                Err(_) => formatter.success(&format!("Uploaded '{}'", path.display())),
            }
        }
        replies.push(envelope);
    }

    (replies, ExitCode::Success)
}

/// Expand glob patterns, keeping plain paths as given
fn expand_paths(patterns: &[String]) -> Result<Vec<PathBuf>, String> {
    let mut paths = Vec::new();

    for pattern in patterns {
        if !pattern.contains(['*', '?', '[']) {
            paths.push(PathBuf::from(pattern));
            continue;
        }

        let matches = glob::glob(pattern).map_err(|e| format!("Invalid pattern '{pattern}': {e}"))?;
        let before = paths.len();
        for entry in matches {
            let path = entry.map_err(|e| format!("Cannot read '{pattern}': {e}"))?;
            if path.is_file() {
                paths.push(path);
            }
        }
        if paths.len() == before {
            return Err(format!("No files match '{pattern}'"));
        }
    }

    Ok(paths)
}

fn save_guest_token(token: &str, formatter: &Formatter) {
    let saved = ConfigManager::new().and_then(|manager| {
        manager.update(|config| config.token = Some(token.to_string()))?;
        Ok(manager)
    });

    match saved {
        Ok(manager) => formatter.success(&format!(
            "Guest token saved to {}",
            manager.config_path().display()
        )),
        Err(e) => formatter.warning(&format!("Could not save the guest token: {e}")),
    }
}
