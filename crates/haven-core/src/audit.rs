//! The audit explainer: one side-effect-free snapshot of eligibility across
//! every known context.
//!
//! Nothing is logged anywhere in this product, yet the user can always see
//! exactly why an intervention would or would not appear. The builders here
//! make that hold by construction: they are functions from a registry
//! snapshot and a `now` to a value. There is no logger parameter, no writer,
//! no cache. Same inputs, identical output.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::context::Context;
use crate::eligibility::{compute_for_context, BlockedEntry, ContextEligibility, EligibleEntry};
use crate::governance::rule::{GovernanceRule, GovernanceSettings, RuleKind};
use crate::intervention::{Intervention, InterventionStatus};
use crate::safe_mode;
use crate::selector;

/// Eligibility for one context, with the winner annotated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextReport {
    pub context: Context,
    pub eligible: Vec<EligibleEntry>,
    pub blocked: Vec<BlockedEntry>,
    /// The verbatim product sentence, present only when more than one entry
    /// is eligible for this context.
    pub selection_note: Option<String>,
}

/// The full explainable snapshot across all known contexts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    pub safe_mode_enabled: bool,
    pub contexts: Vec<ContextReport>,
    /// Rules that never show up as blocking reasons but must not vanish:
    /// advisory session caps and unevaluable (malformed) rules.
    pub rule_notes: Vec<String>,
    /// Soft-limit warnings. Informational only; nothing acts on these.
    pub advisories: Vec<String>,
}

/// Result of the manual-invocation pre-check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanInvoke {
    pub can_invoke: bool,
    pub reason: String,
}

impl CanInvoke {
    pub fn yes(reason: impl Into<String>) -> Self {
        Self {
            can_invoke: true,
            reason: reason.into(),
        }
    }

    pub fn no(reason: impl Into<String>) -> Self {
        Self {
            can_invoke: false,
            reason: reason.into(),
        }
    }
}

/// Build the full audit report from a registry snapshot.
pub fn build_audit(
    interventions: &[Intervention],
    active_rules: &[GovernanceRule],
    settings: &GovernanceSettings,
    safe_mode_enabled: bool,
    now: DateTime<Local>,
) -> AuditReport {
    let contexts = Context::ALL
        .iter()
        .map(|context| {
            let result =
                compute_for_context(interventions, active_rules, safe_mode_enabled, now, *context);
            into_context_report(result)
        })
        .collect();

    AuditReport {
        safe_mode_enabled,
        contexts,
        rule_notes: rule_notes(active_rules),
        advisories: settings.advisories(interventions),
    }
}

/// Annotate the winner and attach the selection note where it applies.
fn into_context_report(mut result: ContextEligibility) -> ContextReport {
    selector::annotate(&mut result.eligible);
    let selection_note = if result.eligible.len() > 1 {
        Some(selector::SELECTION_NOTE.to_string())
    } else {
        None
    };
    ContextReport {
        context: result.context,
        eligible: result.eligible,
        blocked: result.blocked,
        selection_note,
    }
}

/// Descriptive notes for rules whose effect is not a blocking reason.
fn rule_notes(active_rules: &[GovernanceRule]) -> Vec<String> {
    active_rules
        .iter()
        .filter_map(|rule| match &rule.kind {
            RuleKind::SessionCap { .. } | RuleKind::Malformed { .. } => {
                Some(format!("rule {}: {}", rule.id, rule.kind.describe()))
            }
            _ => None,
        })
        .collect()
}

/// The manual-invocation pre-check for one intervention.
///
/// For a contextually-present intervention this reuses the per-context
/// computation for its fixed trigger context, so it agrees with what the
/// full audit says for that intervention/context pair. Manual-only
/// interventions are gated by safe mode and status alone: governance rules
/// constrain contextual appearance, not a deliberate manual action.
pub fn check_invocation(
    intervention: &Intervention,
    active_rules: &[GovernanceRule],
    safe_mode_enabled: bool,
    now: DateTime<Local>,
) -> CanInvoke {
    if intervention.is_deleted() {
        return CanInvoke::no("intervention not found");
    }

    let contextual = intervention
        .kind
        .trigger_context()
        .filter(|_| intervention.allow_contextual_trigger);

    if let Some(context) = contextual {
        let result = compute_for_context(
            std::slice::from_ref(intervention),
            active_rules,
            safe_mode_enabled,
            now,
            context,
        );
        if let Some(blocked) = result.blocked.iter().find(|b| b.intervention.id == intervention.id)
        {
            return CanInvoke::no(blocked.reason.clone());
        }
        if result
            .eligible
            .iter()
            .any(|e| e.intervention.id == intervention.id)
        {
            return CanInvoke::yes(format!("eligible for context: {}", context.label()));
        }
        // Unreachable for a well-formed candidate, but stay truthful.
        return CanInvoke::no("not relevant to its trigger context");
    }

    if safe_mode::is_blocking(safe_mode_enabled) {
        return CanInvoke::no(safe_mode::SAFE_MODE_REASON);
    }
    match intervention.status {
        InterventionStatus::Active => CanInvoke::yes("manually invocable"),
        InterventionStatus::Paused | InterventionStatus::Disabled => {
            CanInvoke::no(intervention.status.label())
        }
    }
}
