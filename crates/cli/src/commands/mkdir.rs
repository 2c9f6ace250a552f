//! mkdir command - Create a folder

use clap::Args;
use gf_core::{GofileClient, Transport};

use super::{SessionFlags, connect, fail, report};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Create a folder
#[derive(Args, Debug)]
pub struct MkdirArgs {
    /// Name of the new folder
    pub name: String,

    /// Parent folder id (defaults to the account root folder)
    #[arg(short, long)]
    pub parent: Option<String>,
}

/// Execute the mkdir command
pub async fn execute(
    args: MkdirArgs,
    session: &SessionFlags,
    output_config: OutputConfig,
) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let mut client = match connect(session, &formatter) {
        Ok(client) => client,
        Err(code) => return code,
    };

    if args.parent.is_none()
        && let Err(code) = load_root_folder(&mut client, &formatter).await
    {
        return code;
    }

    let envelope = match client.create_folder(args.parent.as_deref(), &args.name).await {
        Ok(envelope) => envelope,
        Err(e) => return fail(&formatter, "Failed to create folder", &e),
    };

    report(&formatter, &envelope, |formatter, envelope| {
        let id = envelope.data_str("id").unwrap_or("?");
        formatter.success(&format!("Created folder '{}' ({id})", args.name));
    })
}

/// Look up the account so that the root folder is known
///
/// Does nothing for a session without a token; the client reports that case.
pub(super) async fn load_root_folder<T: Transport>(
    client: &mut GofileClient<T>,
    formatter: &Formatter,
) -> Result<(), ExitCode> {
    if client.token().is_none() {
        return Ok(());
    }

    match client.authenticate().await {
        Ok(details) if details.is_ok() => Ok(()),
        Ok(details) => {
            let details = details.clone();
            Err(report(formatter, &details, |_, _| {}))
        }
        Err(e) => Err(fail(formatter, "Failed to fetch account details", &e)),
    }
}
