//! The governance engine facade.
//!
//! Wraps a [`Registry`] and exposes the caller-facing operations: the full
//! audit, per-context eligibility, the manual-invocation pre-check, and the
//! bulk pause actions. Every evaluation fetches a fresh snapshot and runs
//! the pure computation over it; the engine keeps no state of its own and
//! nothing here runs in the background.

use chrono::{DateTime, Local};

use crate::audit::{build_audit, check_invocation, AuditReport, CanInvoke};
use crate::context::Context;
use crate::eligibility::{compute_for_context, ContextEligibility};
use crate::error::Result;
use crate::intervention::{Intervention, InterventionKind, InterventionStatus};
use crate::registry::Registry;

/// Neutral reason shown when the registry could not be read. Never carries
/// technical detail to the end user.
pub const COULD_NOT_VERIFY: &str = "could not verify status";

/// The intervention eligibility and governance engine.
pub struct GovernanceEngine<R: Registry> {
    registry: R,
}

impl<R: Registry> GovernanceEngine<R> {
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    /// The wrapped registry, for callers that also manage records.
    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut R {
        &mut self.registry
    }

    /// Unwrap the engine, handing the registry back to the caller that owns
    /// persistence.
    pub fn into_registry(self) -> R {
        self.registry
    }

    /// Full explainability report across all known contexts, evaluated now.
    pub fn compute_audit(&self, user_id: &str) -> Result<AuditReport> {
        self.compute_audit_at(user_id, Local::now())
    }

    /// Full explainability report at an explicit point in time.
    pub fn compute_audit_at(&self, user_id: &str, now: DateTime<Local>) -> Result<AuditReport> {
        let interventions = self.registry.list_interventions(user_id)?;
        let rules = self.registry.list_active_governance_rules(user_id)?;
        let settings = self.registry.governance_settings(user_id)?;
        let safe_mode = self.registry.is_safe_mode_enabled(user_id)?;
        Ok(build_audit(&interventions, &rules, &settings, safe_mode, now))
    }

    /// Eligibility for one context, evaluated now. Used when a concrete
    /// context event fires in the product.
    pub fn compute_eligibility(&self, user_id: &str, context: Context) -> Result<ContextEligibility> {
        self.compute_eligibility_at(user_id, context, Local::now())
    }

    /// Eligibility for one context at an explicit point in time. The
    /// eligible set comes back with the winner annotated, same as the audit.
    pub fn compute_eligibility_at(
        &self,
        user_id: &str,
        context: Context,
        now: DateTime<Local>,
    ) -> Result<ContextEligibility> {
        let interventions = self.registry.list_interventions(user_id)?;
        let rules = self.registry.list_active_governance_rules(user_id)?;
        let safe_mode = self.registry.is_safe_mode_enabled(user_id)?;
        let mut result = compute_for_context(&interventions, &rules, safe_mode, now, context);
        crate::selector::annotate(&mut result.eligible);
        Ok(result)
    }

    /// Pre-check before showing an intervention's UI shell.
    ///
    /// Infallible by design: a registry failure yields a calm
    /// `can_invoke = false` with a neutral reason instead of an error.
    pub fn can_invoke(&self, user_id: &str, intervention_id: &str) -> CanInvoke {
        self.can_invoke_at(user_id, intervention_id, Local::now())
    }

    pub fn can_invoke_at(
        &self,
        user_id: &str,
        intervention_id: &str,
        now: DateTime<Local>,
    ) -> CanInvoke {
        let interventions = match self.registry.list_interventions(user_id) {
            Ok(list) => list,
            Err(_) => return CanInvoke::no(COULD_NOT_VERIFY),
        };
        let intervention = match interventions.iter().find(|i| i.id == intervention_id) {
            Some(i) => i,
            None => return CanInvoke::no("intervention not found"),
        };
        let rules = match self.registry.list_active_governance_rules(user_id) {
            Ok(rules) => rules,
            Err(_) => return CanInvoke::no(COULD_NOT_VERIFY),
        };
        let safe_mode = match self.registry.is_safe_mode_enabled(user_id) {
            Ok(flag) => flag,
            Err(_) => return CanInvoke::no(COULD_NOT_VERIFY),
        };
        check_invocation(intervention, &rules, safe_mode, now)
    }

    /// Pause every currently-active intervention. Returns how many changed.
    pub fn pause_all(&mut self, user_id: &str) -> Result<usize> {
        self.pause_where(user_id, |_| true)
    }

    /// Pause every currently-active intervention of one kind.
    pub fn pause_by_kind(&mut self, user_id: &str, kind: InterventionKind) -> Result<usize> {
        self.pause_where(user_id, |i| i.kind == kind)
    }

    /// Pause every currently-active intervention that can appear
    /// contextually; manual-only interventions are left untouched.
    pub fn pause_all_except_manual(&mut self, user_id: &str) -> Result<usize> {
        self.pause_where(user_id, |i| i.allow_contextual_trigger)
    }

    /// The documented inverse of the bulk actions: resume one paused
    /// intervention. Returns whether anything changed. Soft limits never
    /// gate this.
    pub fn resume(&mut self, user_id: &str, intervention_id: &str) -> Result<bool> {
        let intervention = self
            .registry
            .list_interventions(user_id)?
            .into_iter()
            .find(|i| i.id == intervention_id);
        match intervention {
            Some(i) if i.status == InterventionStatus::Paused => {
                self.registry
                    .set_intervention_status(user_id, intervention_id, InterventionStatus::Active)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Shared bulk-pause walk. Only transitions Active interventions, never
    /// sets Disabled, never touches deletion markers, so every bulk action
    /// is reversible by resuming individually.
    fn pause_where(
        &mut self,
        user_id: &str,
        mut include: impl FnMut(&Intervention) -> bool,
    ) -> Result<usize> {
        let targets: Vec<String> = self
            .registry
            .list_interventions(user_id)?
            .into_iter()
            .filter(|i| i.status == InterventionStatus::Active && include(i))
            .map(|i| i.id)
            .collect();
        for id in &targets {
            self.registry
                .set_intervention_status(user_id, id, InterventionStatus::Paused)?;
        }
        Ok(targets.len())
    }
}
