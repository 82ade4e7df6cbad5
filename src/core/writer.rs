//! Applying leaf entries to the store.

use tracing::{debug, trace, warn};

use crate::core::document::LeafEntry;
use crate::core::mount::EngineContext;
use crate::core::path;
use crate::core::store::SecretStore;
use crate::error::{Result, TransferError};

/// What to do when a single leaf write fails.
///
/// Writes are independent in both modes: nothing is rolled back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePolicy {
    /// Stop at the first failure and return it.
    FailFast,
    /// Log the failure, record it, and keep going.
    BestEffort,
}

/// Outcome of a write batch.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WriteReport {
    /// Target paths written, mount-relative.
    pub written: Vec<String>,
    /// Target paths that failed, with the reason.
    pub failed: Vec<(String, String)>,
}

impl WriteReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Write every entry to `target_prefix/entry.path`.
///
/// # Errors
///
/// With [`WritePolicy::FailFast`], returns `TransferError::Write` for the
/// first failing leaf; earlier writes stay in place. With
/// [`WritePolicy::BestEffort`] this never fails; see
/// [`WriteReport::failed`].
pub fn write<S: SecretStore + ?Sized>(
    store: &mut S,
    ctx: &EngineContext,
    target_prefix: &str,
    entries: &[LeafEntry],
    policy: WritePolicy,
) -> Result<WriteReport> {
    let mut report = WriteReport::default();

    for entry in entries {
        let target = path::join(target_prefix, &entry.path);
        trace!(path = %ctx.display_path(&target), "writing");

        match store.write_leaf(ctx, &target, &entry.value) {
            Ok(()) => report.written.push(target),
            Err(e) => match policy {
                WritePolicy::FailFast => {
                    return Err(TransferError::Write {
                        path: ctx.display_path(&target),
                        source: Box::new(e),
                    }
                    .into());
                }
                WritePolicy::BestEffort => {
                    warn!(path = %ctx.display_path(&target), error = %e, "write failed, continuing");
                    report.failed.push((ctx.display_path(&target), e.to_string()));
                }
            },
        }
    }

    debug!(
        written = report.written.len(),
        failed = report.failed.len(),
        ?policy,
        "write batch finished"
    );
    Ok(report)
}
