use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::SessionStatus;

/// Every state change in the session produces an Event.
/// Hosts render from events or poll for a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    HoldStarted {
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    HoldTick {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    /// The final tick completed the hold. Emitted before any side effect
    /// (persistence, celebration) runs.
    HoldCompleted {
        at: DateTime<Utc>,
    },
    /// The user gave up mid-hold. Leaves no durable trace.
    HoldAbandoned {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    /// The completion view was dismissed. Pure view transition.
    CompletionDismissed {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        status: SessionStatus,
        remaining_secs: u32,
        duration_secs: u32,
        completed_at: Option<DateTime<Utc>>,
        /// `HH:MM:SS` until the next hold becomes available.
        next_hold_in: String,
        at: DateTime<Utc>,
    },
}
