//! cp command - Copy contents into a folder

use clap::Args;
use gf_core::ContentIds;

use super::{SessionFlags, connect, fail, report};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Copy contents into a folder
#[derive(Args, Debug)]
pub struct CpArgs {
    /// Destination folder id
    pub destination: String,

    /// Ids of the files or folders to copy
    #[arg(required = true)]
    pub ids: Vec<String>,
}

/// Execute the cp command
pub async fn execute(
    args: CpArgs,
    session: &SessionFlags,
    output_config: OutputConfig,
) -> ExitCode {
    let formatter = Formatter::new(output_config);
    let ids: ContentIds = args.ids.iter().map(String::as_str).collect();

    let client = match connect(session, &formatter) {
        Ok(client) => client,
        Err(code) => return code,
    };

    let envelope = match client.copy_content(&args.destination, &ids).await {
        Ok(envelope) => envelope,
        Err(e) => return fail(&formatter, "Failed to copy contents", &e),
    };

    report(&formatter, &envelope, |formatter, _| {
        formatter.success(&format!("Copied {ids} into {}", args.destination));
    })
}
