//! Literal edit application
//!
//! Edits are applied one after another against a running buffer. Each one
//! replaces the first occurrence of its `oldString`; anything that does not
//! match verbatim is skipped and the rest still go through.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// One `oldString` -> `newString` replacement proposed by the model
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edit {
    #[serde(default)]
    pub old_string: Option<String>,
    #[serde(default)]
    pub new_string: Option<String>,
}

impl Edit {
    pub fn new(old_string: impl Into<String>, new_string: impl Into<String>) -> Self {
        Self {
            old_string: Some(old_string.into()),
            new_string: Some(new_string.into()),
        }
    }

    /// Whether applying the edit could not change anything
    pub fn is_noop(&self) -> bool {
        self.old_string == self.new_string
    }
}

/// Whether a batch of edits signals convergence: nothing proposed, or
/// nothing that would change the text
pub fn is_converged(edits: &[Edit]) -> bool {
    edits.iter().all(Edit::is_noop)
}

/// Patched text plus what happened to each edit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditOutcome {
    pub code: String,
    pub applied: usize,
    pub skipped: usize,
}

/// Apply `edits` to `code` in order.
///
/// An edit is skipped when its `oldString` is missing or empty, its
/// `newString` is missing, the two are equal, or `oldString` does not occur
/// in the text as it stands after the earlier edits.
pub fn apply_edits(edits: &[Edit], code: &str) -> EditOutcome {
    let mut outcome = EditOutcome {
        code: code.to_string(),
        ..Default::default()
    };

    for edit in edits {
        let (Some(old), Some(new)) = (edit.old_string.as_deref(), edit.new_string.as_deref()) else {
            warn!("Skipping invalid edit");
            outcome.skipped += 1;
            continue;
        };
        if old.is_empty() {
            warn!("Skipping invalid edit");
            outcome.skipped += 1;
            continue;
        }
        if old == new {
            debug!("Skipping edit with no changes");
            outcome.skipped += 1;
            continue;
        }
        if !outcome.code.contains(old) {
            warn!("Old string not found in source:\n{}", old);
            outcome.skipped += 1;
            continue;
        }

        outcome.code = outcome.code.replacen(old, new, 1);
        debug!("Applied edit at {}...", old.lines().next().unwrap_or(""));
        outcome.applied += 1;
    }

    debug!("Applied {}/{} edits", outcome.applied, edits.len());
    outcome
}
