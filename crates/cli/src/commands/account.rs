//! account command - Show details of the account behind the token

use gf_core::{AccountDetails, Envelope};

use super::{SessionFlags, connect, fail, report};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Execute the account command
pub async fn execute(session: &SessionFlags, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let mut client = match connect(session, &formatter) {
        Ok(client) => client,
        Err(code) => return code,
    };

    if client.token().is_none() {
        formatter.error("No token configured. Use 'gf config set-token' or --token");
        return ExitCode::PreconditionFailed;
    }

    match client.authenticate().await {
        Ok(details) => report(&formatter, details, print_details),
        Err(e) => fail(&formatter, "Failed to fetch account details", &e),
    }
}

fn print_details(formatter: &Formatter, envelope: &Envelope) {
    let details = match envelope.data_as::<AccountDetails>() {
        Ok(details) => details,
        Err(e) => {
            formatter.warning(&format!("Unrecognized account details: {e}"));
            return;
        }
    };

    let mut table = formatter.table(["Field", "Value"]);
    for row in detail_rows(&details) {
        table.add_row(row);
    }
    formatter.print_table(&table);
}

fn detail_rows(details: &AccountDetails) -> Vec<[String; 2]> {
    vec![
        ["Email".into(), details.email.clone().unwrap_or_else(|| "-".into())],
        ["Tier".into(), details.tier.clone()],
        ["Root folder".into(), details.root_folder.clone()],
        ["Folders".into(), details.folders_count.to_string()],
        ["Files".into(), details.files_count.to_string()],
        [
            "Total size".into(),
            humansize::format_size(details.total_size, humansize::BINARY),
        ],
        ["Downloads".into(), details.total_download_count.to_string()],
    ]
}
