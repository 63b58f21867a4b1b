//! Per-context eligibility computation.
//!
//! Pure functions over a snapshot: interventions, active rules, and the
//! safe-mode flag go in, an eligible set and a blocked set with reasons come
//! out. Nothing here reads a clock, touches storage, or writes anything.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::context::Context;
use crate::governance::evaluator::{evaluate, RuleOutcome};
use crate::governance::rule::GovernanceRule;
use crate::intervention::{Intervention, InterventionStatus};
use crate::safe_mode;

/// An intervention that may currently be shown for a context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibleEntry {
    pub intervention: Intervention,
    /// Exactly one entry per non-empty eligible set carries this flag; it is
    /// the one that would currently be shown, nothing more.
    pub would_show_first: bool,
    /// The conditions that allowed this entry, stated positively. These are
    /// constructed alongside the checks, not inferred from absence, so the
    /// explanation stays truthful as rules evolve.
    pub reasons: Vec<String>,
}

/// An intervention that is relevant to a context but blocked right now.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockedEntry {
    pub intervention: Intervention,
    pub reason: String,
}

/// The eligibility result for one context.
///
/// Interventions whose fixed trigger context is not this one are omitted
/// from both lists entirely: they are not blocked, they are irrelevant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextEligibility {
    pub context: Context,
    pub eligible: Vec<EligibleEntry>,
    pub blocked: Vec<BlockedEntry>,
}

impl ContextEligibility {
    /// Whether anything at all is relevant to this context.
    pub fn is_empty(&self) -> bool {
        self.eligible.is_empty() && self.blocked.is_empty()
    }
}

/// Compute eligibility for one context over a registry snapshot.
///
/// Per candidate, in order: the safe-mode gate (short-circuits with its
/// fixed reason), the status check, then every active rule in creation
/// order, where the first blocking rule's reason is reported. Unevaluable
/// rules never block. Candidates are visited in `(created_at, id)` order so
/// the output is reproducible.
pub fn compute_for_context(
    interventions: &[Intervention],
    active_rules: &[GovernanceRule],
    safe_mode_enabled: bool,
    now: DateTime<Local>,
    context: Context,
) -> ContextEligibility {
    let mut candidates: Vec<&Intervention> = interventions
        .iter()
        .filter(|i| i.is_candidate_for(context))
        .collect();
    candidates.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));

    let mut eligible = Vec::new();
    let mut blocked = Vec::new();

    for candidate in candidates {
        if safe_mode::is_blocking(safe_mode_enabled) {
            blocked.push(BlockedEntry {
                intervention: candidate.clone(),
                reason: safe_mode::SAFE_MODE_REASON.to_string(),
            });
            continue;
        }

        if candidate.status != InterventionStatus::Active {
            blocked.push(BlockedEntry {
                intervention: candidate.clone(),
                reason: candidate.status.label().to_string(),
            });
            continue;
        }

        match first_blocking_reason(active_rules, now, context) {
            Some(reason) => blocked.push(BlockedEntry {
                intervention: candidate.clone(),
                reason,
            }),
            None => eligible.push(EligibleEntry {
                intervention: candidate.clone(),
                would_show_first: false,
                reasons: allowed_reasons(),
            }),
        }
    }

    ContextEligibility {
        context,
        eligible,
        blocked,
    }
}

/// The first active rule (in creation order) that blocks, if any.
fn first_blocking_reason(
    active_rules: &[GovernanceRule],
    now: DateTime<Local>,
    context: Context,
) -> Option<String> {
    for rule in active_rules {
        match evaluate(rule, now, context) {
            RuleOutcome::Blocked(reason) => return Some(reason),
            RuleOutcome::Match | RuleOutcome::Unevaluable(_) => {}
        }
    }
    None
}

/// The positive conditions every eligible entry satisfied.
fn allowed_reasons() -> Vec<String> {
    vec![
        "safe mode is off".to_string(),
        "status is active".to_string(),
        "contextual triggering is enabled for this intervention".to_string(),
        "no active governance rule blocks this context".to_string(),
    ]
}
