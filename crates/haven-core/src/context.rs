//! Contexts: the moments inside the host application that can surface an
//! intervention.
//!
//! Contexts are always supplied by the caller when something happens in the
//! product (opening a project, starting focus mode, ...). The engine never
//! infers a context and never records that one occurred.

use serde::{Deserialize, Serialize};

/// A named moment in the host application.
///
/// This is a closed set: adding a context means teaching the whole product
/// about it, so every consumer matches on it exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Context {
    /// The user opened a project.
    ProjectOpened,
    /// The user started focus mode.
    FocusModeStarted,
    /// The user created a task.
    TaskCreated,
    /// The user completed a task.
    TaskCompleted,
}

impl Context {
    /// Every known context, in the order the audit report iterates them.
    pub const ALL: [Context; 4] = [
        Context::ProjectOpened,
        Context::FocusModeStarted,
        Context::TaskCreated,
        Context::TaskCompleted,
    ];

    /// Human-readable label used in blocking reasons and audit text.
    pub fn label(&self) -> &'static str {
        match self {
            Context::ProjectOpened => "project opened",
            Context::FocusModeStarted => "focus mode started",
            Context::TaskCreated => "task created",
            Context::TaskCompleted => "task completed",
        }
    }

    /// Stable machine name (matches the serde representation).
    pub fn name(&self) -> &'static str {
        match self {
            Context::ProjectOpened => "project_opened",
            Context::FocusModeStarted => "focus_mode_started",
            Context::TaskCreated => "task_created",
            Context::TaskCompleted => "task_completed",
        }
    }
}

impl std::fmt::Display for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Context {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "project_opened" | "project-opened" => Ok(Context::ProjectOpened),
            "focus_mode_started" | "focus-mode-started" => Ok(Context::FocusModeStarted),
            "task_created" | "task-created" => Ok(Context::TaskCreated),
            "task_completed" | "task-completed" => Ok(Context::TaskCompleted),
            other => Err(format!("unknown context: {other}")),
        }
    }
}
