//! Audit purity and failure-handling tests.
//!
//! The audit is a hard design contract: re-running it with unchanged
//! registry state yields identical output and performs no writes. These
//! tests drive that through instrumented registry implementations.

use std::cell::Cell;

use chrono::{DateTime, Datelike, Local, TimeZone, Weekday};
use haven_core::{
    Context, GovernanceEngine, GovernanceRule, GovernanceSettings, InMemoryRegistry, Intervention,
    InterventionKind, InterventionStatus, Registry, RegistryError, RuleKind,
};

const USER: &str = "user-1";

fn a_wednesday() -> DateTime<Local> {
    let day = Local.with_ymd_and_hms(2026, 8, 26, 10, 0, 0).unwrap();
    assert_eq!(day.weekday(), Weekday::Wed);
    day
}

/// Wraps an `InMemoryRegistry` and counts mutation calls.
struct CountingRegistry {
    inner: InMemoryRegistry,
    writes: Cell<usize>,
}

impl CountingRegistry {
    fn new(inner: InMemoryRegistry) -> Self {
        Self {
            inner,
            writes: Cell::new(0),
        }
    }
}

impl Registry for CountingRegistry {
    fn list_interventions(&self, user_id: &str) -> Result<Vec<Intervention>, RegistryError> {
        self.inner.list_interventions(user_id)
    }

    fn list_active_governance_rules(
        &self,
        user_id: &str,
    ) -> Result<Vec<GovernanceRule>, RegistryError> {
        self.inner.list_active_governance_rules(user_id)
    }

    fn governance_settings(&self, user_id: &str) -> Result<GovernanceSettings, RegistryError> {
        self.inner.governance_settings(user_id)
    }

    fn is_safe_mode_enabled(&self, user_id: &str) -> Result<bool, RegistryError> {
        self.inner.is_safe_mode_enabled(user_id)
    }

    fn set_intervention_status(
        &mut self,
        user_id: &str,
        intervention_id: &str,
        status: InterventionStatus,
    ) -> Result<(), RegistryError> {
        self.writes.set(self.writes.get() + 1);
        self.inner
            .set_intervention_status(user_id, intervention_id, status)
    }
}

/// A registry whose backing store is down.
struct UnavailableRegistry;

impl Registry for UnavailableRegistry {
    fn list_interventions(&self, _: &str) -> Result<Vec<Intervention>, RegistryError> {
        Err(RegistryError::Unavailable("connection refused".to_string()))
    }

    fn list_active_governance_rules(&self, _: &str) -> Result<Vec<GovernanceRule>, RegistryError> {
        Err(RegistryError::Unavailable("connection refused".to_string()))
    }

    fn governance_settings(&self, _: &str) -> Result<GovernanceSettings, RegistryError> {
        Err(RegistryError::Unavailable("connection refused".to_string()))
    }

    fn is_safe_mode_enabled(&self, _: &str) -> Result<bool, RegistryError> {
        Err(RegistryError::Unavailable("connection refused".to_string()))
    }

    fn set_intervention_status(
        &mut self,
        _: &str,
        _: &str,
        _: InterventionStatus,
    ) -> Result<(), RegistryError> {
        Err(RegistryError::Unavailable("connection refused".to_string()))
    }
}

fn populated_registry() -> InMemoryRegistry {
    let mut registry = InMemoryRegistry::new();
    for kind in InterventionKind::ALL {
        registry.insert_intervention(Intervention::new(USER, kind));
    }
    registry.insert_rule(GovernanceRule::new(
        USER,
        RuleKind::ContextExclusion {
            excluded_contexts: [Context::TaskCreated].into_iter().collect(),
        },
    ));
    registry.insert_rule(GovernanceRule::new(
        USER,
        RuleKind::SessionCap { max_per_session: 2 },
    ));
    registry.set_settings(
        USER,
        GovernanceSettings {
            max_active_interventions: Some(1),
            max_reminders: None,
        },
    );
    registry
}

#[test]
fn audit_is_deterministic_and_performs_no_writes() {
    let registry = CountingRegistry::new(populated_registry());
    let engine = GovernanceEngine::new(registry);
    let now = a_wednesday();

    let first = engine.compute_audit_at(USER, now).unwrap();
    let second = engine.compute_audit_at(USER, now).unwrap();

    assert_eq!(first, second);
    // Byte-identical once serialized, not just structurally equal.
    assert_eq!(
        serde_json::to_vec(&first).unwrap(),
        serde_json::to_vec(&second).unwrap()
    );
    assert_eq!(engine.registry().writes.get(), 0);
}

#[test]
fn eligibility_and_can_invoke_perform_no_writes_either() {
    let registry = CountingRegistry::new(populated_registry());
    let engine = GovernanceEngine::new(registry);
    let now = a_wednesday();

    let ids: Vec<String> = engine
        .registry()
        .list_interventions(USER)
        .unwrap()
        .into_iter()
        .map(|i| i.id)
        .collect();
    for context in Context::ALL {
        engine.compute_eligibility_at(USER, context, now).unwrap();
    }
    for id in &ids {
        engine.can_invoke_at(USER, id, now);
    }

    assert_eq!(engine.registry().writes.get(), 0);
}

#[test]
fn can_invoke_agrees_with_the_audit_for_every_contextual_intervention() {
    let engine = GovernanceEngine::new(populated_registry());
    let now = a_wednesday();
    let report = engine.compute_audit_at(USER, now).unwrap();

    for ctx in &report.contexts {
        for entry in &ctx.eligible {
            let check = engine.can_invoke_at(USER, &entry.intervention.id, now);
            assert!(
                check.can_invoke,
                "audit says eligible but can_invoke says no for {}",
                entry.intervention.id
            );
        }
        for entry in &ctx.blocked {
            let check = engine.can_invoke_at(USER, &entry.intervention.id, now);
            assert!(!check.can_invoke);
            assert_eq!(check.reason, entry.reason);
        }
    }
}

#[test]
fn registry_failure_yields_neutral_can_invoke() {
    let engine = GovernanceEngine::new(UnavailableRegistry);
    let check = engine.can_invoke(USER, "any-id");
    assert!(!check.can_invoke);
    assert_eq!(check.reason, "could not verify status");
}

#[test]
fn registry_failure_propagates_as_typed_error_from_the_audit() {
    let engine = GovernanceEngine::new(UnavailableRegistry);
    let err = engine.compute_audit(USER).unwrap_err();
    assert!(err.to_string().contains("Registry"));
}

#[test]
fn empty_user_audit_is_empty_not_an_error() {
    let engine = GovernanceEngine::new(InMemoryRegistry::new());
    let report = engine.compute_audit_at("nobody", a_wednesday()).unwrap();
    assert!(!report.safe_mode_enabled);
    assert_eq!(report.contexts.len(), Context::ALL.len());
    for ctx in &report.contexts {
        assert!(ctx.eligible.is_empty());
        assert!(ctx.blocked.is_empty());
    }
    assert!(report.rule_notes.is_empty());
    assert!(report.advisories.is_empty());
}
