//! # Haven Core Library
//!
//! This library is the intervention eligibility and governance engine for
//! Haven: given one user's support interventions, governance rules, soft
//! limits, and safe-mode flag, it decides which interventions are currently
//! allowed to appear for a given context, which are blocked and why, and
//! which single one would show first.
//!
//! ## Architecture
//!
//! - **Registry**: the one external collaborator; the engine is a pure
//!   reader over its snapshot, plus an explicit mutation surface for the
//!   bulk pause actions
//! - **Eligibility**: per-context filtering through the safe-mode gate,
//!   status, and every active governance rule, with a reason for every
//!   blocked entry
//! - **Selection**: deterministic `(created_at, id)` ordering, never ranking
//! - **Audit**: the full explainable report across all contexts; pure by
//!   construction, nothing is logged or tracked anywhere
//!
//! Every evaluation is synchronous and on-demand. There is no background
//! scheduler, no polling loop, and no queue in this library; nothing happens
//! unless the user acts.
//!
//! ## Key Components
//!
//! - [`GovernanceEngine`]: the caller-facing facade
//! - [`Registry`]: the storage contract, with [`InMemoryRegistry`] as the
//!   reference implementation
//! - [`AuditReport`]: the explainability snapshot
//! - [`evaluate`](governance::evaluate): single-rule evaluation

pub mod audit;
pub mod context;
pub mod eligibility;
pub mod engine;
pub mod error;
pub mod governance;
pub mod intervention;
pub mod registry;
pub mod safe_mode;
pub mod selector;

pub use audit::{AuditReport, CanInvoke, ContextReport};
pub use context::Context;
pub use eligibility::{BlockedEntry, ContextEligibility, EligibleEntry};
pub use engine::GovernanceEngine;
pub use error::{EngineError, RegistryError};
pub use governance::{GovernanceRule, GovernanceSettings, RuleKind, RuleStatus};
pub use intervention::{Intervention, InterventionKind, InterventionStatus};
pub use registry::{InMemoryRegistry, Registry};
