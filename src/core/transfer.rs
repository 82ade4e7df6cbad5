//! Copy and move pipelines.
//!
//! ```text
//! resolve → export → scratch round trip → extract → flatten → write
//!                                                     │
//!                         (move only)  plan → confirm → delete | abort
//! ```
//!
//! Both pipelines stop at the first failure and leave already written
//! leaves in place. A move that is not approved ends in
//! [`MoveState::Aborted`] with the secrets present at both locations; that
//! is a successful outcome, not an error.

use std::fmt;

use tracing::{debug, info, warn};

use crate::core::confirm::{Approval, ConfirmationGate, Prompt};
use crate::core::delete;
use crate::core::document;
use crate::core::export;
use crate::core::mount::{EngineContext, EngineType};
use crate::core::path;
use crate::core::plan::{self, DeletionPlan};
use crate::core::scratch;
use crate::core::store::SecretStore;
use crate::core::writer::{self, WritePolicy};
use crate::error::{Result, TransferError};

/// Steps of a move, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveState {
    Idle,
    Exported,
    Extracted,
    CopiedToTarget,
    Planned,
    AutoApproved,
    AwaitingConfirmation,
    Deleted,
    Aborted,
}

impl fmt::Display for MoveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Exported => "exported",
            Self::Extracted => "extracted",
            Self::CopiedToTarget => "copied-to-target",
            Self::Planned => "planned",
            Self::AutoApproved => "auto-approved",
            Self::AwaitingConfirmation => "awaiting-confirmation",
            Self::Deleted => "deleted",
            Self::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

fn enter(state: MoveState) -> MoveState {
    debug!(%state, "move state");
    state
}

/// Source and target of a copy or move, resolved against the store mounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    source_ctx: EngineContext,
    source: String,
    target_ctx: EngineContext,
    target: String,
}

/// Result of the copy half of a transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyOutcome {
    /// Full source path.
    pub source: String,
    /// Full target path.
    pub target: String,
    /// Full paths of every leaf written.
    pub written: Vec<String>,
    /// Mount-relative source leaves that were read for the copy.
    pub copied_from: Vec<String>,
}

impl Transfer {
    /// Resolve both full paths into mount contexts.
    ///
    /// `engine` forces the engine version for both sides; `None` uses the
    /// engine each mount is configured with.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UnknownMount` if either path has no mount.
    pub fn resolve<S: SecretStore + ?Sized>(
        store: &S,
        source_path: &str,
        target_path: &str,
        engine: Option<EngineType>,
    ) -> Result<Self> {
        let (source_mount, source) = store.resolve(source_path)?;
        let (target_mount, target) = store.resolve(target_path)?;

        Ok(Self {
            source_ctx: EngineContext::new(
                source_mount.path,
                engine.unwrap_or(source_mount.engine),
            ),
            source,
            target_ctx: EngineContext::new(
                target_mount.path,
                engine.unwrap_or(target_mount.engine),
            ),
            target,
        })
    }

    pub fn source_display(&self) -> String {
        self.source_ctx.display_path(&self.source)
    }

    pub fn target_display(&self) -> String {
        self.target_ctx.display_path(&self.target)
    }

    /// Copy the source branch under the target prefix.
    ///
    /// # Errors
    ///
    /// Fails fast with `TransferError::Export`, `TransferError::EmptySource`,
    /// `TransferError::Scratch`, `TransferError::LossyRoundTrip`,
    /// `DocumentError` or `TransferError::Write`.
    pub fn copy<S: SecretStore + ?Sized>(&self, store: &mut S) -> Result<CopyOutcome> {
        let exported = export::export(store, &self.source_ctx, &self.source)?;
        enter(MoveState::Exported);
        export::require_content(&exported, &self.source_display())?;

        let reloaded = scratch::round_trip(&exported, &self.source_display())?;

        let branch = document::extract(&reloaded, &self.source)?;
        enter(MoveState::Extracted);

        let entries = document::flatten(&branch);
        let report = writer::write(
            store,
            &self.target_ctx,
            &self.target,
            &entries,
            WritePolicy::FailFast,
        )?;
        enter(MoveState::CopiedToTarget);

        let copied_from = document::flatten(&reloaded)
            .into_iter()
            .map(|entry| entry.path)
            .collect();

        info!(
            source = %self.source_display(),
            target = %self.target_display(),
            leaves = report.written.len(),
            "copied"
        );

        Ok(CopyOutcome {
            source: self.source_display(),
            target: self.target_display(),
            written: report
                .written
                .iter()
                .map(|p| self.target_ctx.display_path(p))
                .collect(),
            copied_from,
        })
    }

    /// Copy, then plan the deletion of the source. Nothing is deleted yet.
    ///
    /// # Errors
    ///
    /// Returns `TransferError::Overlap` when source and target share a
    /// subtree, plus every error of [`Transfer::copy`] and of planning.
    pub fn begin_move<S: SecretStore + ?Sized>(self, store: &mut S) -> Result<PendingDeletion> {
        enter(MoveState::Idle);
        if self.source_ctx.mount() == self.target_ctx.mount()
            && (path::is_within(&self.target, &self.source)
                || path::is_within(&self.source, &self.target))
        {
            return Err(TransferError::Overlap {
                source_path: self.source_display(),
                target_path: self.target_display(),
            }
            .into());
        }

        let copy = self.copy(store)?;
        let plan = plan::plan(store, &self.source_ctx, &self.source)?;
        enter(MoveState::Planned);

        let uncopied: Vec<String> = plan
            .uncopied(&copy.copied_from)
            .into_iter()
            .map(|p| self.source_ctx.display_path(p))
            .collect();
        if !uncopied.is_empty() {
            warn!(
                count = uncopied.len(),
                "source changed since export; some planned deletions were not copied"
            );
        }

        Ok(PendingDeletion {
            copy,
            plan,
            uncopied,
        })
    }
}

/// A move whose copy is done and whose deletion awaits approval.
#[derive(Debug)]
pub struct PendingDeletion {
    copy: CopyOutcome,
    plan: DeletionPlan,
    uncopied: Vec<String>,
}

/// Final result of a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub copy: CopyOutcome,
    pub approval: Approval,
    /// Full paths deleted from the source; empty when aborted.
    pub deleted: Vec<String>,
    /// Number of deletions that were planned.
    pub planned: usize,
    pub state: MoveState,
}

impl PendingDeletion {
    pub fn copy(&self) -> &CopyOutcome {
        &self.copy
    }

    pub fn plan(&self) -> &DeletionPlan {
        &self.plan
    }

    /// Full paths planned for deletion that were not part of the copy.
    pub fn uncopied(&self) -> &[String] {
        &self.uncopied
    }

    /// Full paths planned for deletion.
    pub fn planned_paths(&self) -> Vec<String> {
        let ctx = self.plan.context();
        self.plan
            .paths()
            .iter()
            .map(|p| ctx.display_path(p))
            .collect()
    }

    /// Ask for approval and delete the source if it is given.
    ///
    /// # Errors
    ///
    /// Returns `TransferError::Delete` if some approved deletions failed.
    /// Declining or a failing prompt is not an error.
    pub fn confirm<S: SecretStore + ?Sized>(
        self,
        store: &mut S,
        gate: ConfirmationGate,
        prompt: &dyn Prompt,
    ) -> Result<MoveOutcome> {
        let planned = self.plan.len();
        let approval = gate.approve(prompt, &self.plan);

        if approval == Approval::AutoApproved {
            enter(MoveState::AutoApproved);
        } else {
            enter(MoveState::AwaitingConfirmation);
        }

        if !approval.is_approved() {
            let state = enter(MoveState::Aborted);
            info!(planned, "move aborted, source left in place");
            return Ok(MoveOutcome {
                copy: self.copy,
                approval,
                deleted: Vec::new(),
                planned,
                state,
            });
        }

        let ctx = self.plan.context().clone();
        let report = delete::delete(store, self.plan)?;
        let state = enter(MoveState::Deleted);

        Ok(MoveOutcome {
            copy: self.copy,
            approval,
            deleted: report
                .deleted
                .iter()
                .map(|p| ctx.display_path(p))
                .collect(),
            planned,
            state,
        })
    }
}

/// Run a whole move: copy, plan, confirm, delete.
pub fn relocate<S: SecretStore + ?Sized>(
    store: &mut S,
    transfer: Transfer,
    gate: ConfirmationGate,
    prompt: &dyn Prompt,
) -> Result<MoveOutcome> {
    transfer.begin_move(store)?.confirm(store, gate, prompt)
}
