//! rm command - Delete files and folders

use clap::Args;
use gf_core::ContentIds;

use super::{SessionFlags, connect, fail, report};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Delete contents
#[derive(Args, Debug)]
pub struct RmArgs {
    /// Ids of the files or folders to delete
    #[arg(required = true)]
    pub ids: Vec<String>,
}

/// Execute the rm command
pub async fn execute(
    args: RmArgs,
    session: &SessionFlags,
    output_config: OutputConfig,
) -> ExitCode {
    let formatter = Formatter::new(output_config);
    let ids: ContentIds = args.ids.iter().map(String::as_str).collect();

    let client = match connect(session, &formatter) {
        Ok(client) => client,
        Err(code) => return code,
    };

    let envelope = match client.delete_content(&ids).await {
        Ok(envelope) => envelope,
        Err(e) => return fail(&formatter, "Failed to delete contents", &e),
    };

    report(&formatter, &envelope, |formatter, _| {
        formatter.success(&format!("Deleted {ids}"));
    })
}
