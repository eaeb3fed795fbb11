//! Grand-total aggregation over batch outcomes.

use crate::models::{FileOutcome, GrandTotal};

/// Folds the successful entries of a batch into a [`GrandTotal`].
///
/// Failed entries contribute nothing; a tax component missing from one
/// result simply adds zero for that result. An all-failure (or empty) batch
/// aggregates to zeros.
pub fn aggregate_outcomes(outcomes: &[FileOutcome]) -> GrandTotal {
    let mut total = GrandTotal::default();
    for outcome in outcomes {
        if let Some(summary) = outcome.summary() {
            total.accumulate(&summary.billing);
        }
    }
    total
}
