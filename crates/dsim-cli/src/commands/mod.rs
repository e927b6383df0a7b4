pub mod completions;
pub mod distributions;
pub mod usage;

use dsim_core::{DsimError, DsimResult};
use serde::Serialize;

/// One summary per line on stdout.
fn print_json<T: Serialize>(summary: &T) -> DsimResult<()> {
    let line = serde_json::to_string(summary)
        .map_err(|err| DsimError::Other(format!("encoding summary: {err}")))?;
    println!("{line}");
    Ok(())
}
