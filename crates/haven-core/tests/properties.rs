//! Property tests for ordering, dominance, and determinism.

use chrono::{DateTime, Local, TimeZone, Utc};
use haven_core::eligibility::compute_for_context;
use haven_core::{
    Context, GovernanceRule, Intervention, InterventionKind, InterventionStatus, RuleKind,
};
use proptest::prelude::*;

fn now_fixed() -> DateTime<Local> {
    Local.with_ymd_and_hms(2026, 8, 26, 10, 0, 0).unwrap()
}

fn kind_strategy() -> impl Strategy<Value = InterventionKind> {
    prop_oneof![
        Just(InterventionKind::ReminderDisplay),
        Just(InterventionKind::ReflectionPrompt),
        Just(InterventionKind::SimplifiedView),
        Just(InterventionKind::FocusSuppression),
        Just(InterventionKind::TimeboxedSession),
        Just(InterventionKind::AccountabilityShare),
    ]
}

fn status_strategy() -> impl Strategy<Value = InterventionStatus> {
    prop_oneof![
        Just(InterventionStatus::Active),
        Just(InterventionStatus::Paused),
        Just(InterventionStatus::Disabled),
    ]
}

fn context_strategy() -> impl Strategy<Value = Context> {
    prop_oneof![
        Just(Context::ProjectOpened),
        Just(Context::FocusModeStarted),
        Just(Context::TaskCreated),
        Just(Context::TaskCompleted),
    ]
}

prop_compose! {
    fn intervention_strategy()(
        kind in kind_strategy(),
        status in status_strategy(),
        allow in any::<bool>(),
        // Small range so identical timestamps occur and the id tie-break
        // actually gets exercised.
        offset_secs in 0i64..5,
        id in "[a-f0-9]{8}",
    ) -> Intervention {
        let mut intervention = Intervention::new("prop-user", kind);
        intervention.id = id;
        intervention.status = status;
        intervention.allow_contextual_trigger = allow;
        intervention.created_at =
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap() + chrono::Duration::seconds(offset_secs);
        intervention
    }
}

fn rule_strategy() -> impl Strategy<Value = GovernanceRule> {
    prop_oneof![
        proptest::collection::btree_set(context_strategy(), 0..3).prop_map(|excluded_contexts| {
            GovernanceRule::new("prop-user", RuleKind::ContextExclusion { excluded_contexts })
        }),
        (0u32..5).prop_map(|max_per_session| {
            GovernanceRule::new("prop-user", RuleKind::SessionCap { max_per_session })
        }),
    ]
}

proptest! {
    #[test]
    fn exactly_one_winner_in_any_non_empty_eligible_set(
        interventions in proptest::collection::vec(intervention_strategy(), 0..12),
        rules in proptest::collection::vec(rule_strategy(), 0..4),
        context in context_strategy(),
    ) {
        // Ids must be unique for the tie-break to be total.
        let mut interventions = interventions;
        for (idx, intervention) in interventions.iter_mut().enumerate() {
            intervention.id = format!("{}-{idx}", intervention.id);
        }

        let mut result = compute_for_context(&interventions, &rules, false, now_fixed(), context);
        haven_core::selector::annotate(&mut result.eligible);

        let winners: Vec<_> = result
            .eligible
            .iter()
            .filter(|e| e.would_show_first)
            .collect();
        if result.eligible.is_empty() {
            prop_assert!(winners.is_empty());
        } else {
            prop_assert_eq!(winners.len(), 1);
            let min = result
                .eligible
                .iter()
                .map(|e| (e.intervention.created_at, e.intervention.id.clone()))
                .min()
                .unwrap();
            prop_assert_eq!(
                (winners[0].intervention.created_at, winners[0].intervention.id.clone()),
                min
            );
        }
    }

    #[test]
    fn eligibility_is_deterministic(
        interventions in proptest::collection::vec(intervention_strategy(), 0..12),
        rules in proptest::collection::vec(rule_strategy(), 0..4),
        safe_mode in any::<bool>(),
        context in context_strategy(),
    ) {
        let first = compute_for_context(&interventions, &rules, safe_mode, now_fixed(), context);
        let second = compute_for_context(&interventions, &rules, safe_mode, now_fixed(), context);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn safe_mode_dominates_every_configuration(
        interventions in proptest::collection::vec(intervention_strategy(), 0..12),
        rules in proptest::collection::vec(rule_strategy(), 0..4),
        context in context_strategy(),
    ) {
        let result = compute_for_context(&interventions, &rules, true, now_fixed(), context);
        prop_assert!(result.eligible.is_empty());
        for entry in &result.blocked {
            prop_assert_eq!(entry.reason.as_str(), "safe_mode_active");
        }
    }

    #[test]
    fn non_active_interventions_never_become_eligible(
        interventions in proptest::collection::vec(intervention_strategy(), 0..12),
        rules in proptest::collection::vec(rule_strategy(), 0..4),
        safe_mode in any::<bool>(),
        context in context_strategy(),
    ) {
        let result = compute_for_context(&interventions, &rules, safe_mode, now_fixed(), context);
        for entry in &result.eligible {
            prop_assert_eq!(entry.intervention.status, InterventionStatus::Active);
            prop_assert!(entry.intervention.allow_contextual_trigger);
            prop_assert_eq!(entry.intervention.kind.trigger_context(), Some(context));
        }
    }
}
