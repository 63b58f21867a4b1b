//! Deterministic winner selection within an eligible set.
//!
//! The product contract is: "if multiple match, the earliest created is
//! shown — this does not imply it is preferred". Selection is ordering, not
//! ranking, so there is no score anywhere, only the total `(created_at, id)`
//! order.

use crate::eligibility::EligibleEntry;
use crate::intervention::{Intervention, InterventionId};

/// The product sentence the audit renders verbatim whenever more than one
/// entry is eligible for the same context.
pub const SELECTION_NOTE: &str =
    "if multiple match, the earliest created is shown — this does not imply it is preferred";

/// Pick the intervention that would currently be shown: smallest
/// `created_at`, ties broken by `id` ascending so the result is total even
/// with identical timestamps.
pub fn select_winner(eligible: &[Intervention]) -> Option<InterventionId> {
    eligible
        .iter()
        .min_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)))
        .map(|i| i.id.clone())
}

/// Mark `would_show_first` on exactly one entry of a non-empty eligible
/// list, clearing it everywhere else.
pub fn annotate(eligible: &mut [EligibleEntry]) {
    let interventions: Vec<Intervention> =
        eligible.iter().map(|e| e.intervention.clone()).collect();
    let winner = select_winner(&interventions);
    for entry in eligible.iter_mut() {
        entry.would_show_first = Some(&entry.intervention.id) == winner.as_ref();
    }
}
