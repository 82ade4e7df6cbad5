//! Delete command.
//!
//! Lists every secret under the path, asks once, and deletes only on an
//! exact `y`.

use tracing::info;

use crate::cli::output;
use crate::cli::prompt::TerminalPrompt;
use crate::core::confirm::{Approval, ConfirmationGate};
use crate::core::config::Connection;
use crate::core::delete;
use crate::core::mount::{EngineContext, EngineType};
use crate::core::plan;
use crate::core::store::SecretStore;
use crate::error::{Result, TransferError};

/// Delete every secret under `path`.
pub fn execute(
    conn: &Connection,
    path: &str,
    auto_approve: bool,
    engine: Option<EngineType>,
) -> Result<()> {
    info!("Deleting {}", path);

    let mut store = conn.open_store()?;
    let (mount, remainder) = store.resolve(path)?;
    let ctx = EngineContext::new(mount.path, engine.unwrap_or(mount.engine));

    let plan = plan::plan(&store, &ctx, &remainder)?;
    if plan.is_empty() {
        return Err(TransferError::EmptySource(ctx.display_path(&remainder)).into());
    }
    for leaf in plan.paths() {
        println!("Deleting secret [{}]", output::path(&ctx.display_path(leaf)));
    }

    match ConfirmationGate::new(auto_approve).approve(&TerminalPrompt, &plan) {
        Approval::AutoApproved | Approval::Approved => {
            let report = delete::delete(&mut store, plan)?;
            output::success(&format!(
                "deleted {} from {}",
                output::count(report.deleted.len(), "secret"),
                output::path(&ctx.display_path(&remainder))
            ));
        }
        Approval::Declined(_) => output::warn("delete aborted: nothing was deleted"),
        Approval::Failed(reason) => {
            output::warn(&format!("delete aborted: no confirmation ({})", reason));
            output::hint("rerun with --auto-approve to delete without asking");
        }
    }
    Ok(())
}
