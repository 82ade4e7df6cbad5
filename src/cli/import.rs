//! Import command - write YAML or JSON documents into the store.

use std::path::Path;

use tracing::info;

use crate::cli::output;
use crate::core::cipher::Age;
use crate::core::config::Connection;
use crate::core::import::{ImportSource, Importer};
use crate::core::mount::EngineType;
use crate::error::{ImportError, Result};

/// Import `sources` under `vault_path`.
pub fn execute(
    conn: &Connection,
    vault_path: &str,
    sources: &[String],
    decrypt: bool,
    private_key: Option<&Path>,
    engine: Option<EngineType>,
) -> Result<()> {
    info!("Importing {} source(s) into {}", sources.len(), vault_path);

    let age = match (decrypt, private_key) {
        (true, Some(key)) => Some(Age::from_identity_file(key)?),
        (true, None) => return Err(ImportError::MissingPrivateKey.into()),
        (false, _) => None,
    };

    let sources: Vec<ImportSource> = sources.iter().map(|s| ImportSource::from_arg(s)).collect();

    let mut store = conn.open_store()?;
    let mut importer = Importer::resolve(&store, vault_path, engine)?;
    if let Some(age) = age.as_ref() {
        importer = importer.with_decryptor(age);
    }
    let report = importer.import(&mut store, &sources)?;

    for file in &report.imported {
        output::dimmed(&format!(
            "  {}: {}",
            file.source,
            output::count(file.written.len(), "secret")
        ));
    }
    for (source, reason) in &report.failed {
        output::warn(&format!("skipped {}: {}", source, reason));
    }

    output::success(&format!(
        "imported {} from {} into {}",
        output::count(report.leaf_count(), "secret"),
        output::count(report.imported.len(), "source"),
        output::path(&importer.target_display())
    ));
    Ok(())
}
