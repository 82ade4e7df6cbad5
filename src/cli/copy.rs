//! Copy command.

use tracing::info;

use crate::cli::output;
use crate::core::config::Connection;
use crate::core::mount::EngineType;
use crate::core::transfer::Transfer;
use crate::error::Result;

/// Copy every secret under `source` to `target`.
pub fn execute(
    conn: &Connection,
    source: &str,
    target: &str,
    engine: Option<EngineType>,
) -> Result<()> {
    info!("Copying {} to {}", source, target);

    let mut store = conn.open_store()?;
    let transfer = Transfer::resolve(&store, source, target, engine)?;
    let outcome = transfer.copy(&mut store)?;

    for path in &outcome.written {
        output::dimmed(&format!("  wrote {}", path));
    }
    output::success(&format!(
        "copied {} from {} to {}",
        output::count(outcome.written.len(), "secret"),
        output::path(&outcome.source),
        output::path(&outcome.target)
    ));
    Ok(())
}
