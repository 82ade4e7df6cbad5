//! Export command - print a subtree as YAML or JSON.

use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::cli::output;
use crate::core::config::Connection;
use crate::core::document::{format, Format};
use crate::core::export;
use crate::core::mount::{EngineContext, EngineType};
use crate::core::store::SecretStore;
use crate::error::Result;

/// Export the secrets under `path`.
pub fn execute(
    conn: &Connection,
    path: &str,
    fmt: Format,
    output_file: Option<&Path>,
    engine: Option<EngineType>,
) -> Result<()> {
    info!("Exporting {} as {}", path, fmt);

    let store = conn.open_store()?;
    let (mount, remainder) = store.resolve(path)?;
    let ctx = EngineContext::new(mount.path, engine.unwrap_or(mount.engine));

    let document = export::branch(&store, &ctx, &remainder)?;
    let bytes = format::serialize(&document, fmt)?;

    match output_file {
        Some(file) => {
            std::fs::write(file, &bytes)?;
            output::success(&format!(
                "exported {} to {}",
                output::count(document.leaf_count(), "secret"),
                file.display()
            ));
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&bytes)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
