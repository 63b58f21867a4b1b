//! Interventions: user-authored support actions.
//!
//! An intervention is something the user set up for themselves (a reminder,
//! a reflection prompt, a simplified view...). The engine only ever reads
//! these records; creating, editing, pausing, and deleting them happens
//! through the registry by explicit user action.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::context::Context;

/// Unique identifier for an intervention.
pub type InterventionId = String;

/// Unique identifier for a user.
pub type UserId = String;

/// The closed set of intervention kinds.
///
/// Each kind maps to at most one fixed context that can trigger it
/// contextually; a kind with no trigger context is manual-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterventionKind {
    /// Show a reminder the user wrote for themselves.
    ReminderDisplay,
    /// Prompt the user to reflect on what they just finished.
    ReflectionPrompt,
    /// Offer a reduced, lower-stimulation view.
    SimplifiedView,
    /// Suppress distracting surfaces while focusing.
    FocusSuppression,
    /// Offer a bounded work session.
    TimeboxedSession,
    /// Share progress with an accountability partner. Manual-only.
    AccountabilityShare,
}

impl InterventionKind {
    /// Every known kind.
    pub const ALL: [InterventionKind; 6] = [
        InterventionKind::ReminderDisplay,
        InterventionKind::ReflectionPrompt,
        InterventionKind::SimplifiedView,
        InterventionKind::FocusSuppression,
        InterventionKind::TimeboxedSession,
        InterventionKind::AccountabilityShare,
    ];

    /// The fixed context that can trigger this kind contextually, if any.
    pub fn trigger_context(&self) -> Option<Context> {
        match self {
            InterventionKind::ReminderDisplay => Some(Context::ProjectOpened),
            InterventionKind::ReflectionPrompt => Some(Context::TaskCompleted),
            InterventionKind::SimplifiedView => Some(Context::TaskCreated),
            InterventionKind::FocusSuppression => Some(Context::FocusModeStarted),
            InterventionKind::TimeboxedSession => Some(Context::FocusModeStarted),
            InterventionKind::AccountabilityShare => None,
        }
    }

    /// Human-readable label for audit and CLI output.
    pub fn label(&self) -> &'static str {
        match self {
            InterventionKind::ReminderDisplay => "reminder display",
            InterventionKind::ReflectionPrompt => "reflection prompt",
            InterventionKind::SimplifiedView => "simplified view",
            InterventionKind::FocusSuppression => "focus suppression",
            InterventionKind::TimeboxedSession => "timeboxed session",
            InterventionKind::AccountabilityShare => "accountability share",
        }
    }
}

impl std::fmt::Display for InterventionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for InterventionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reminder_display" | "reminder-display" => Ok(InterventionKind::ReminderDisplay),
            "reflection_prompt" | "reflection-prompt" => Ok(InterventionKind::ReflectionPrompt),
            "simplified_view" | "simplified-view" => Ok(InterventionKind::SimplifiedView),
            "focus_suppression" | "focus-suppression" => Ok(InterventionKind::FocusSuppression),
            "timeboxed_session" | "timeboxed-session" => Ok(InterventionKind::TimeboxedSession),
            "accountability_share" | "accountability-share" => {
                Ok(InterventionKind::AccountabilityShare)
            }
            other => Err(format!("unknown intervention kind: {other}")),
        }
    }
}

/// Tri-state intervention status, controlled only by the user.
///
/// A non-Active intervention is never eligible, regardless of rules.
/// `Disabled` is invisible to manual invocation too; `Paused` is visible but
/// not invocable until resumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterventionStatus {
    Active,
    Paused,
    Disabled,
}

impl InterventionStatus {
    /// Label used in blocking reasons ("paused", "disabled").
    pub fn label(&self) -> &'static str {
        match self {
            InterventionStatus::Active => "active",
            InterventionStatus::Paused => "paused",
            InterventionStatus::Disabled => "disabled",
        }
    }
}

/// A user-authored support action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intervention {
    /// Unique identifier.
    pub id: InterventionId,
    /// User who owns this intervention.
    pub owner_id: UserId,
    /// What this intervention does.
    pub kind: InterventionKind,
    /// Current status.
    pub status: InterventionStatus,
    /// Whether this intervention may appear contextually at all.
    /// When false it can only ever be invoked manually.
    pub allow_contextual_trigger: bool,
    /// Kind-specific payload. Opaque to the engine.
    pub parameters: serde_json::Value,
    /// Creation time. Immutable; the sole tie-break key for selection.
    pub created_at: DateTime<Utc>,
    /// Soft-delete marker. Deleted interventions are excluded from every
    /// computation.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Intervention {
    /// Create a new active intervention owned by `owner_id`.
    pub fn new(owner_id: impl Into<UserId>, kind: InterventionKind) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            owner_id: owner_id.into(),
            kind,
            status: InterventionStatus::Active,
            allow_contextual_trigger: true,
            parameters: serde_json::Value::Null,
            created_at: Utc::now(),
            deleted_at: None,
        }
    }

    /// Whether this intervention has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Whether this intervention is a candidate for the given context:
    /// not deleted, opted into contextual triggering, and its kind's fixed
    /// trigger context is exactly `context`.
    ///
    /// Status is deliberately not part of candidacy: a paused candidate
    /// shows up in the blocked list with its status as the reason, whereas
    /// a non-candidate is simply not relevant to the context.
    pub fn is_candidate_for(&self, context: Context) -> bool {
        !self.is_deleted()
            && self.allow_contextual_trigger
            && self.kind.trigger_context() == Some(context)
    }
}
