//! server command - Show the server uploads would go to

use gf_core::ServerInfo;

use super::{SessionFlags, connect, fail, report};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Execute the server command
pub async fn execute(session: &SessionFlags, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let client = match connect(session, &formatter) {
        Ok(client) => client,
        Err(code) => return code,
    };

    let envelope = match client.select_server().await {
        Ok(envelope) => envelope,
        Err(e) => return fail(&formatter, "Failed to select a server", &e),
    };

    report(&formatter, &envelope, |formatter, envelope| {
        match envelope.data_as::<ServerInfo>() {
            Ok(info) => formatter.println(&info.server),
            Err(_) => formatter.warning("Service did not name a server"),
        }
    })
}
