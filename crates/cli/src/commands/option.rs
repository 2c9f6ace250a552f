//! set-option command - Set an option on a folder

use clap::Args;
use gf_core::FolderOption;

use super::{SessionFlags, connect, fail, report};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Set a folder option
#[derive(Args, Debug)]
pub struct SetOptionArgs {
    /// Folder id
    pub folder: String,

    /// Option name: public, password, description, expire or tags
    pub option: String,

    /// Option value, e.g. "true", a unix timestamp for expire, or "a,b" for tags
    pub value: String,
}

/// Execute the set-option command
pub async fn execute(
    args: SetOptionArgs,
    session: &SessionFlags,
    output_config: OutputConfig,
) -> ExitCode {
    let formatter = Formatter::new(output_config);

    if !FolderOption::ALL.iter().any(|known| known.as_str() == args.option) {
        tracing::warn!(option = %args.option, "Option is not one the service documents");
    }

    let client = match connect(session, &formatter) {
        Ok(client) => client,
        Err(code) => return code,
    };

    let envelope = match client
        .set_folder_option(&args.folder, &args.option, &args.value)
        .await
    {
        Ok(envelope) => envelope,
        Err(e) => return fail(&formatter, "Failed to set folder option", &e),
    };

    report(&formatter, &envelope, |formatter, _| {
        formatter.success(&format!(
            "Set '{}' on folder {} to '{}'",
            args.option, args.folder, args.value
        ));
    })
}
