//! ls command - List the contents of a folder
//!
//! The service only serves listings to premium accounts; other accounts get
//! `error-notPremium`, which maps to its own exit code.

use clap::Args;
use gf_core::{ContentInfo, Envelope};

use super::mkdir::load_root_folder;
use super::{SessionFlags, connect, fail, report};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// List a folder
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Folder id (defaults to the account root folder)
    pub folder: Option<String>,
}

/// Execute the ls command
pub async fn execute(
    args: LsArgs,
    session: &SessionFlags,
    output_config: OutputConfig,
) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let mut client = match connect(session, &formatter) {
        Ok(client) => client,
        Err(code) => return code,
    };

    if args.folder.is_none()
        && let Err(code) = load_root_folder(&mut client, &formatter).await
    {
        return code;
    }

    let envelope = match client.get_children(args.folder.as_deref()).await {
        Ok(envelope) => envelope,
        Err(e) => return fail(&formatter, "Failed to list folder", &e),
    };

    report(&formatter, &envelope, print_listing)
}

fn print_listing(formatter: &Formatter, envelope: &Envelope) {
    let folder = match envelope.data_as::<ContentInfo>() {
        Ok(folder) => folder,
        Err(e) => {
            formatter.warning(&format!("Unrecognized listing: {e}"));
            return;
        }
    };

    let children = folder.children();
    if children.is_empty() {
        formatter.println("(empty)");
        return;
    }

    let mut table = formatter.table(["Type", "Name", "Size", "Created", "Id"]);
    for child in &children {
        table.add_row(listing_row(child));
    }
    formatter.print_table(&table);
}

fn listing_row(item: &ContentInfo) -> [String; 5] {
    let kind = if item.is_folder() { "dir" } else { "file" };
    let size = match item.size {
        Some(size) if !item.is_folder() => humansize::format_size(size, humansize::BINARY),
        _ => String::new(),
    };
    let created = item
        .create_time
        .and_then(|secs| jiff::Timestamp::from_second(secs).ok())
        .map(|ts| ts.strftime("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default();

    [
        kind.to_string(),
        item.name.clone().unwrap_or_default(),
        size,
        created,
        item.id.clone().unwrap_or_default(),
    ]
}
