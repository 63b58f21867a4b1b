//! Governance rule and settings records.
//!
//! Rule kinds are a closed sum type so that adding a kind forces the
//! evaluator and the audit text generator to handle it explicitly. A
//! persisted payload that no longer matches its declared kind deserializes
//! to [`RuleKind::Malformed`] instead of failing the whole load: it must
//! never block anything extra, but it must also never silently vanish from
//! the audit.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc, Weekday};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::context::Context;
use crate::intervention::{Intervention, InterventionKind, InterventionStatus, UserId};

/// Unique identifier for a governance rule.
pub type RuleId = String;

/// Rule status. A paused rule has zero effect but is not deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleStatus {
    Active,
    Paused,
}

/// The week in display order, used wherever allowed days are formatted.
pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Lowercase full day name for reason text ("monday", ...).
pub fn day_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// Format an allowed-day set in Mon..Sun order. An empty set formats as
/// "no days" so the degenerate always-blocked rule still reads truthfully.
pub fn format_allowed_days(days: &[Weekday]) -> String {
    let listed: Vec<&str> = WEEK
        .into_iter()
        .filter(|d| days.contains(d))
        .map(day_label)
        .collect();
    if listed.is_empty() {
        "no days".to_string()
    } else {
        listed.join(", ")
    }
}

/// One governance rule kind with its payload.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleKind {
    /// Blocks on days not in the set. An empty set blocks every day.
    TimeWindow { allowed_days: Vec<Weekday> },
    /// Blocks when the current context is in the set.
    ContextExclusion { excluded_contexts: BTreeSet<Context> },
    /// Advisory only: never alters eligibility, only audit text.
    SessionCap { max_per_session: u32 },
    /// A persisted payload that did not match its declared kind.
    Malformed { declared_kind: String },
}

impl RuleKind {
    /// Descriptive audit text for this rule kind.
    pub fn describe(&self) -> String {
        match self {
            RuleKind::TimeWindow { allowed_days } => {
                format!(
                    "time window: interventions allowed only on: {}",
                    format_allowed_days(allowed_days)
                )
            }
            RuleKind::ContextExclusion { excluded_contexts } => {
                let labels: Vec<&str> = excluded_contexts.iter().map(|c| c.label()).collect();
                format!("context exclusion: no interventions during: {}", labels.join(", "))
            }
            RuleKind::SessionCap { max_per_session } => {
                format!(
                    "session cap: at most {max_per_session} per session (advisory, never blocks)"
                )
            }
            RuleKind::Malformed { declared_kind } => {
                format!("unevaluable: payload does not match declared kind '{declared_kind}'")
            }
        }
    }
}

/// Mirror of the well-formed kinds, used for the tagged wire shape.
#[derive(Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum TaggedRuleKind {
    TimeWindow { allowed_days: Vec<Weekday> },
    ContextExclusion { excluded_contexts: BTreeSet<Context> },
    SessionCap { max_per_session: u32 },
}

impl From<TaggedRuleKind> for RuleKind {
    fn from(tagged: TaggedRuleKind) -> Self {
        match tagged {
            TaggedRuleKind::TimeWindow { allowed_days } => RuleKind::TimeWindow { allowed_days },
            TaggedRuleKind::ContextExclusion { excluded_contexts } => {
                RuleKind::ContextExclusion { excluded_contexts }
            }
            TaggedRuleKind::SessionCap { max_per_session } => {
                RuleKind::SessionCap { max_per_session }
            }
        }
    }
}

impl Serialize for RuleKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RuleKind::TimeWindow { allowed_days } => TaggedRuleKind::TimeWindow {
                allowed_days: allowed_days.clone(),
            }
            .serialize(serializer),
            RuleKind::ContextExclusion { excluded_contexts } => {
                TaggedRuleKind::ContextExclusion {
                    excluded_contexts: excluded_contexts.clone(),
                }
                .serialize(serializer)
            }
            RuleKind::SessionCap { max_per_session } => TaggedRuleKind::SessionCap {
                max_per_session: *max_per_session,
            }
            .serialize(serializer),
            RuleKind::Malformed { declared_kind } => {
                // Round-trips as just the tag; still malformed on reload.
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("type", declared_kind)?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for RuleKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        match serde_json::from_value::<TaggedRuleKind>(value.clone()) {
            Ok(tagged) => Ok(tagged.into()),
            Err(_) => {
                let declared_kind = value
                    .get("type")
                    .and_then(|v| v.as_str())
                    .unwrap_or("unknown")
                    .to_string();
                Ok(RuleKind::Malformed { declared_kind })
            }
        }
    }
}

/// A user-authored constraint on when interventions may be shown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GovernanceRule {
    /// Unique identifier.
    pub id: RuleId,
    /// User who owns this rule.
    pub owner_id: UserId,
    /// Only Active rules are ever evaluated.
    pub status: RuleStatus,
    /// Creation time; rules are evaluated in creation order so the first
    /// blocking reason is reproducible.
    pub created_at: DateTime<Utc>,
    /// The constraint itself.
    pub kind: RuleKind,
}

impl GovernanceRule {
    /// Create a new active rule owned by `owner_id`.
    pub fn new(owner_id: impl Into<UserId>, kind: RuleKind) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            owner_id: owner_id.into(),
            status: RuleStatus::Active,
            created_at: Utc::now(),
            kind,
        }
    }

    /// Whether this rule's payload failed to match its declared kind.
    pub fn is_malformed(&self) -> bool {
        matches!(self.kind, RuleKind::Malformed { .. })
    }
}

/// Per-user soft limits.
///
/// These are warnings only. They must never reduce the eligible set or
/// block creating, activating, or resuming an intervention; making them
/// hard limits is a correctness bug.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceSettings {
    /// Soft ceiling on the number of active interventions.
    pub max_active_interventions: Option<u32>,
    /// Soft ceiling on the number of active reminder displays.
    pub max_reminders: Option<u32>,
}

impl GovernanceSettings {
    /// Advisory texts for any soft limit the user is currently over.
    /// Informational only; callers never act on these.
    pub fn advisories(&self, interventions: &[Intervention]) -> Vec<String> {
        let mut notes = Vec::new();

        let active = interventions
            .iter()
            .filter(|i| !i.is_deleted() && i.status == InterventionStatus::Active)
            .count() as u32;
        if let Some(max) = self.max_active_interventions {
            if active > max {
                notes.push(format!(
                    "you have {active} active interventions, above your soft limit of {max} (informational only)"
                ));
            }
        }

        let reminders = interventions
            .iter()
            .filter(|i| {
                !i.is_deleted()
                    && i.status == InterventionStatus::Active
                    && i.kind == InterventionKind::ReminderDisplay
            })
            .count() as u32;
        if let Some(max) = self.max_reminders {
            if reminders > max {
                notes.push(format!(
                    "you have {reminders} active reminders, above your soft limit of {max} (informational only)"
                ));
            }
        }

        notes
    }
}
