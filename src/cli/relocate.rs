//! Move command.
//!
//! Copies the source to the target, lists every secret that would be
//! deleted, asks once, and deletes only on an exact `y`.

use tracing::info;

use crate::cli::output;
use crate::cli::prompt::TerminalPrompt;
use crate::core::confirm::{Approval, ConfirmationGate};
use crate::core::config::Connection;
use crate::core::mount::EngineType;
use crate::core::transfer::Transfer;
use crate::error::Result;

/// Move every secret under `source` to `target`.
pub fn execute(
    conn: &Connection,
    source: &str,
    target: &str,
    auto_approve: bool,
    engine: Option<EngineType>,
) -> Result<()> {
    info!("Moving {} to {}", source, target);

    let mut store = conn.open_store()?;
    let transfer = Transfer::resolve(&store, source, target, engine)?;
    let pending = transfer.begin_move(&mut store)?;

    output::success(&format!(
        "copied {} from {} to {}",
        output::count(pending.copy().written.len(), "secret"),
        output::path(&pending.copy().source),
        output::path(&pending.copy().target)
    ));

    for path in pending.planned_paths() {
        println!("Deleting secret [{}]", output::path(&path));
    }
    if !pending.uncopied().is_empty() {
        output::warn(&format!(
            "{} appeared after the export and were not copied:",
            output::count(pending.uncopied().len(), "secret")
        ));
        for path in pending.uncopied() {
            output::list_item(path);
        }
    }

    let outcome = pending.confirm(&mut store, ConfirmationGate::new(auto_approve), &TerminalPrompt)?;

    match &outcome.approval {
        Approval::AutoApproved | Approval::Approved => {
            output::success(&format!(
                "deleted {} from {}",
                output::count(outcome.deleted.len(), "secret"),
                output::path(&outcome.copy.source)
            ));
        }
        Approval::Declined(_) => {
            output::warn("move aborted: nothing was deleted");
            output::hint(&format!(
                "secrets now exist at both {} and {}",
                outcome.copy.source, outcome.copy.target
            ));
        }
        Approval::Failed(reason) => {
            output::warn(&format!("move aborted: no confirmation ({})", reason));
            output::hint("rerun with --auto-approve to delete without asking");
        }
    }
    Ok(())
}
