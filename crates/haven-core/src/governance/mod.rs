//! Governance: user-authored constraints on when interventions may appear.

pub mod evaluator;
pub mod rule;

pub use evaluator::{evaluate, RuleOutcome};
pub use rule::{GovernanceRule, GovernanceSettings, RuleKind, RuleStatus};
