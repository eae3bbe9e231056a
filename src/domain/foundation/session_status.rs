//! SessionStatus enum and the lifecycle actions that move it.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::state_machine::StateMachine;

/// Lifecycle status of a teaching session.
///
/// ```text
/// Scheduled ──start──▶ InProgress ──end──▶ PendingLog ──submit_log──▶ Completed
///     │                    │
///     └──────cancel────────┴──────▶ Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    #[default]
    Scheduled,
    InProgress,
    PendingLog,
    Completed,
    Cancelled,
}

impl SessionStatus {
    pub const ALL: [SessionStatus; 5] = [
        SessionStatus::Scheduled,
        SessionStatus::InProgress,
        SessionStatus::PendingLog,
        SessionStatus::Completed,
        SessionStatus::Cancelled,
    ];

    /// Stable storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Scheduled => "SCHEDULED",
            SessionStatus::InProgress => "IN_PROGRESS",
            SessionStatus::PendingLog => "PENDING_LOG",
            SessionStatus::Completed => "COMPLETED",
            SessionStatus::Cancelled => "CANCELLED",
        }
    }

    /// Parses the storage representation.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }
}

impl StateMachine for SessionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SessionStatus::*;
        matches!(
            (self, target),
            (Scheduled, InProgress)
                | (InProgress, PendingLog)
                | (PendingLog, Completed)
                | (Scheduled, Cancelled)
                | (InProgress, Cancelled)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SessionStatus::*;
        match self {
            Scheduled => vec![InProgress, Cancelled],
            InProgress => vec![PendingLog, Cancelled],
            PendingLog => vec![Completed],
            Completed | Cancelled => vec![],
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Operator-facing lifecycle operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleAction {
    Start,
    End,
    SubmitLog,
    Cancel,
}

impl LifecycleAction {
    /// Status this action moves a session into.
    pub fn target(&self) -> SessionStatus {
        match self {
            LifecycleAction::Start => SessionStatus::InProgress,
            LifecycleAction::End => SessionStatus::PendingLog,
            LifecycleAction::SubmitLog => SessionStatus::Completed,
            LifecycleAction::Cancel => SessionStatus::Cancelled,
        }
    }

    /// Whether the action is an edge out of `from`.
    pub fn is_allowed_from(&self, from: SessionStatus) -> bool {
        from.can_transition_to(&self.target())
    }
}

impl fmt::Display for LifecycleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LifecycleAction::Start => "start",
            LifecycleAction::End => "end",
            LifecycleAction::SubmitLog => "submit_log",
            LifecycleAction::Cancel => "cancel",
        };
        write!(f, "{}", s)
    }
}
