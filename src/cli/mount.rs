//! Mount command - register a mount in the file store.

use crate::cli::output;
use crate::core::config::Connection;
use crate::core::mount::EngineType;
use crate::error::Result;

/// Add a mount with the given engine type.
pub fn execute(conn: &Connection, path: &str, engine: EngineType) -> Result<()> {
    let mut store = conn.open_store()?;
    store.add_mount(path, engine)?;
    output::success(&format!(
        "mounted {} ({}) in namespace {}",
        output::path(path.trim_matches('/')),
        engine,
        store.namespace()
    ));
    Ok(())
}
