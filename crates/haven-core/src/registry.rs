//! Registry access: the engine's one external collaborator.
//!
//! In the product this is a database layer; the engine depends only on the
//! query contract below and never mutates anything itself except through the
//! explicit mutation surface the bulk actions delegate to. The registry must
//! provide read-after-write consistency for the caller's own writes (pausing
//! an intervention then immediately re-auditing reflects the pause).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;
use crate::governance::rule::{GovernanceRule, GovernanceSettings, RuleId, RuleStatus};
use crate::intervention::{Intervention, InterventionId, InterventionStatus, UserId};

/// Read/write contract the engine requires from its storage collaborator.
///
/// A user with no data is an expected condition: reads return empty lists,
/// default settings, and safe mode off, never an error.
pub trait Registry {
    /// All non-deleted interventions for this user, in `(created_at, id)`
    /// order.
    fn list_interventions(&self, user_id: &str) -> Result<Vec<Intervention>, RegistryError>;

    /// All Active governance rules for this user, in creation order.
    fn list_active_governance_rules(
        &self,
        user_id: &str,
    ) -> Result<Vec<GovernanceRule>, RegistryError>;

    /// This user's soft-limit settings.
    fn governance_settings(&self, user_id: &str) -> Result<GovernanceSettings, RegistryError>;

    /// This user's safe-mode flag, read fresh on every call.
    fn is_safe_mode_enabled(&self, user_id: &str) -> Result<bool, RegistryError>;

    /// Set the status of one non-deleted intervention. The mutation surface
    /// the engine's bulk actions and resume delegate to.
    fn set_intervention_status(
        &mut self,
        user_id: &str,
        intervention_id: &str,
        status: InterventionStatus,
    ) -> Result<(), RegistryError>;
}

/// Everything the registry holds for one user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct UserRecord {
    interventions: Vec<Intervention>,
    rules: Vec<GovernanceRule>,
    settings: GovernanceSettings,
    safe_mode_enabled: bool,
}

/// In-memory registry: the reference [`Registry`] implementation.
///
/// Backs the CLI's JSON snapshot store and the test suites. All lifecycle
/// operations (create, pause/resume, soft-delete) happen through explicit
/// methods here; the engine itself only reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryRegistry {
    users: BTreeMap<UserId, UserRecord>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new intervention.
    pub fn insert_intervention(&mut self, intervention: Intervention) {
        let record = self.users.entry(intervention.owner_id.clone()).or_default();
        record.interventions.push(intervention);
    }

    /// Store a new governance rule.
    pub fn insert_rule(&mut self, rule: GovernanceRule) {
        let record = self.users.entry(rule.owner_id.clone()).or_default();
        record.rules.push(rule);
    }

    /// Replace this user's soft-limit settings.
    pub fn set_settings(&mut self, user_id: &str, settings: GovernanceSettings) {
        self.users.entry(user_id.to_string()).or_default().settings = settings;
    }

    /// Flip this user's safe-mode flag.
    pub fn set_safe_mode(&mut self, user_id: &str, enabled: bool) {
        self.users
            .entry(user_id.to_string())
            .or_default()
            .safe_mode_enabled = enabled;
    }

    /// Fetch one non-deleted intervention.
    pub fn get_intervention(
        &self,
        user_id: &str,
        intervention_id: &str,
    ) -> Result<Intervention, RegistryError> {
        self.users
            .get(user_id)
            .and_then(|r| {
                r.interventions
                    .iter()
                    .find(|i| i.id == intervention_id && !i.is_deleted())
            })
            .cloned()
            .ok_or_else(|| RegistryError::InterventionNotFound {
                intervention_id: intervention_id.to_string(),
            })
    }

    /// Soft-delete one intervention. Idempotent once deleted.
    pub fn soft_delete_intervention(
        &mut self,
        user_id: &str,
        intervention_id: &str,
    ) -> Result<(), RegistryError> {
        let record = self.users.get_mut(user_id).ok_or(RegistryError::UserNotFound {
            user_id: user_id.to_string(),
        })?;
        let intervention = record
            .interventions
            .iter_mut()
            .find(|i| i.id == intervention_id && !i.is_deleted())
            .ok_or_else(|| RegistryError::InterventionNotFound {
                intervention_id: intervention_id.to_string(),
            })?;
        intervention.deleted_at = Some(chrono::Utc::now());
        Ok(())
    }

    /// All rules for this user, including paused and malformed ones, in
    /// creation order. Backs the CLI's rule listing.
    pub fn list_all_rules(&self, user_id: &str) -> Result<Vec<GovernanceRule>, RegistryError> {
        let mut rules = self
            .users
            .get(user_id)
            .map(|r| r.rules.clone())
            .unwrap_or_default();
        rules.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        Ok(rules)
    }

    /// Pause or resume one rule.
    pub fn set_rule_status(
        &mut self,
        user_id: &str,
        rule_id: &RuleId,
        status: RuleStatus,
    ) -> Result<(), RegistryError> {
        let record = self.users.get_mut(user_id).ok_or(RegistryError::UserNotFound {
            user_id: user_id.to_string(),
        })?;
        let rule = record
            .rules
            .iter_mut()
            .find(|r| &r.id == rule_id)
            .ok_or_else(|| RegistryError::InterventionNotFound {
                intervention_id: rule_id.clone(),
            })?;
        rule.status = status;
        Ok(())
    }
}

impl Registry for InMemoryRegistry {
    fn list_interventions(&self, user_id: &str) -> Result<Vec<Intervention>, RegistryError> {
        let mut interventions: Vec<Intervention> = self
            .users
            .get(user_id)
            .map(|r| {
                r.interventions
                    .iter()
                    .filter(|i| !i.is_deleted())
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        interventions.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        Ok(interventions)
    }

    fn list_active_governance_rules(
        &self,
        user_id: &str,
    ) -> Result<Vec<GovernanceRule>, RegistryError> {
        let mut rules: Vec<GovernanceRule> = self
            .users
            .get(user_id)
            .map(|r| {
                r.rules
                    .iter()
                    .filter(|rule| rule.status == RuleStatus::Active)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        rules.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        Ok(rules)
    }

    fn governance_settings(&self, user_id: &str) -> Result<GovernanceSettings, RegistryError> {
        Ok(self
            .users
            .get(user_id)
            .map(|r| r.settings.clone())
            .unwrap_or_default())
    }

    fn is_safe_mode_enabled(&self, user_id: &str) -> Result<bool, RegistryError> {
        Ok(self
            .users
            .get(user_id)
            .map(|r| r.safe_mode_enabled)
            .unwrap_or(false))
    }

    fn set_intervention_status(
        &mut self,
        user_id: &str,
        intervention_id: &str,
        status: InterventionStatus,
    ) -> Result<(), RegistryError> {
        let record = self.users.get_mut(user_id).ok_or(RegistryError::UserNotFound {
            user_id: user_id.to_string(),
        })?;
        let intervention = record
            .interventions
            .iter_mut()
            .find(|i| i.id == intervention_id && !i.is_deleted())
            .ok_or_else(|| RegistryError::InterventionNotFound {
                intervention_id: intervention_id.to_string(),
            })?;
        intervention.status = status;
        Ok(())
    }
}
