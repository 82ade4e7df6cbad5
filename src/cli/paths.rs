//! Paths command - list the sub-paths that hold nested secrets.

use tracing::info;

use crate::cli::output;
use crate::core::config::Connection;
use crate::core::document;
use crate::core::export;
use crate::core::mount::{EngineContext, EngineType};
use crate::core::path as secret_path;
use crate::core::store::SecretStore;
use crate::error::Result;

/// Print every sub-path below `path`, one full path per line.
pub fn execute(conn: &Connection, path: &str, engine: Option<EngineType>) -> Result<()> {
    info!("Listing paths under {}", path);

    let store = conn.open_store()?;
    let (mount, remainder) = store.resolve(path)?;
    let ctx = EngineContext::new(mount.path, engine.unwrap_or(mount.engine));

    let branch = export::branch(&store, &ctx, &remainder)?;
    let root = ctx.display_path(&remainder);
    let paths = document::node_paths(&branch);

    if paths.is_empty() {
        output::warn(&format!("no sub-paths under {}", root));
        return Ok(());
    }
    for sub in paths {
        println!("{}", secret_path::join(&root, &sub));
    }
    Ok(())
}
