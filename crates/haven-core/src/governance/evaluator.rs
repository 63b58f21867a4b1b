//! Single-rule evaluation.
//!
//! Given one governance rule and a point in time/context, decide whether it
//! lets an intervention through, blocks it with a human-readable reason, or
//! cannot be evaluated at all. Callers only pass Active rules here; a paused
//! rule has zero effect and never reaches the evaluator.
//!
//! The weekday for time windows is the local day of the invoking machine
//! (the same "today" the rest of the product shows the user), which is why
//! `now` is a `DateTime<Local>` rather than UTC.

use chrono::{DateTime, Datelike, Local};

use crate::context::Context;
use crate::governance::rule::{format_allowed_days, GovernanceRule, RuleKind};

/// Outcome of evaluating one rule against `(now, context)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    /// The rule does not block this context right now.
    Match,
    /// The rule blocks, with the reason shown to the user.
    Blocked(String),
    /// The rule could not be evaluated (malformed payload). Never blocks,
    /// but the audit surfaces it so the rule does not silently vanish.
    Unevaluable(String),
}

/// Evaluate one rule against a point in time and a context.
pub fn evaluate(rule: &GovernanceRule, now: DateTime<Local>, context: Context) -> RuleOutcome {
    match &rule.kind {
        RuleKind::TimeWindow { allowed_days } => {
            // An empty allowed set is a degenerate always-blocked rule,
            // not an always-allowed one.
            if allowed_days.contains(&now.weekday()) {
                RuleOutcome::Match
            } else {
                RuleOutcome::Blocked(format!(
                    "allowed only on: {}",
                    format_allowed_days(allowed_days)
                ))
            }
        }
        RuleKind::ContextExclusion { excluded_contexts } => {
            if excluded_contexts.contains(&context) {
                RuleOutcome::Blocked(format!("excluded during {}", context.label()))
            } else {
                RuleOutcome::Match
            }
        }
        // Advisory only: contributes audit text, never eligibility.
        RuleKind::SessionCap { .. } => RuleOutcome::Match,
        RuleKind::Malformed { declared_kind } => RuleOutcome::Unevaluable(format!(
            "rule could not be evaluated: payload does not match declared kind '{declared_kind}'"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Weekday};
    use std::collections::BTreeSet;

    /// A Wednesday, local time.
    fn a_wednesday() -> DateTime<Local> {
        let day = Local.with_ymd_and_hms(2026, 8, 26, 10, 0, 0).unwrap();
        assert_eq!(day.weekday(), Weekday::Wed);
        day
    }

    fn rule(kind: RuleKind) -> GovernanceRule {
        GovernanceRule::new("user-1", kind)
    }

    #[test]
    fn time_window_matches_on_allowed_day() {
        let r = rule(RuleKind::TimeWindow {
            allowed_days: vec![Weekday::Wed],
        });
        assert_eq!(
            evaluate(&r, a_wednesday(), Context::ProjectOpened),
            RuleOutcome::Match
        );
    }

    #[test]
    fn time_window_blocks_with_day_list() {
        let r = rule(RuleKind::TimeWindow {
            allowed_days: vec![Weekday::Mon],
        });
        match evaluate(&r, a_wednesday(), Context::ProjectOpened) {
            RuleOutcome::Blocked(reason) => {
                assert_eq!(reason, "allowed only on: monday");
            }
            other => panic!("expected Blocked, got {other:?}"),
        }
    }

    #[test]
    fn empty_time_window_always_blocks() {
        let r = rule(RuleKind::TimeWindow {
            allowed_days: vec![],
        });
        match evaluate(&r, a_wednesday(), Context::TaskCreated) {
            RuleOutcome::Blocked(reason) => assert!(reason.contains("no days")),
            other => panic!("expected Blocked, got {other:?}"),
        }
    }

    #[test]
    fn context_exclusion_blocks_only_listed_contexts() {
        let excluded: BTreeSet<Context> = [Context::FocusModeStarted].into_iter().collect();
        let r = rule(RuleKind::ContextExclusion {
            excluded_contexts: excluded,
        });

        match evaluate(&r, a_wednesday(), Context::FocusModeStarted) {
            RuleOutcome::Blocked(reason) => {
                assert_eq!(reason, "excluded during focus mode started");
            }
            other => panic!("expected Blocked, got {other:?}"),
        }
        assert_eq!(
            evaluate(&r, a_wednesday(), Context::ProjectOpened),
            RuleOutcome::Match
        );
    }

    #[test]
    fn session_cap_never_blocks() {
        let r = rule(RuleKind::SessionCap { max_per_session: 0 });
        for ctx in Context::ALL {
            assert_eq!(evaluate(&r, a_wednesday(), ctx), RuleOutcome::Match);
        }
    }

    #[test]
    fn malformed_rule_is_unevaluable_not_blocking() {
        let r = rule(RuleKind::Malformed {
            declared_kind: "time_window".to_string(),
        });
        match evaluate(&r, a_wednesday(), Context::TaskCompleted) {
            RuleOutcome::Unevaluable(reason) => assert!(reason.contains("time_window")),
            other => panic!("expected Unevaluable, got {other:?}"),
        }
    }
}
