//! Roster Events
//!
//! Events emitted by the roster store for external consumers to react to
//! signup and unregistration activity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Events emitted by the roster store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RosterEvent {
    /// A student signed up for an activity
    Enrolled {
        activity: String,
        email: String,
        /// Spots remaining after this signup
        spots_left: u32,
        at: DateTime<Utc>,
    },

    /// A student was unregistered from an activity
    Unenrolled {
        activity: String,
        email: String,
        /// Spots remaining after this unregistration
        spots_left: u32,
        at: DateTime<Utc>,
    },
}

impl RosterEvent {
    /// Get the activity name associated with this event
    pub fn activity(&self) -> &str {
        match self {
            RosterEvent::Enrolled { activity, .. } => activity,
            RosterEvent::Unenrolled { activity, .. } => activity,
        }
    }

    /// Get the student email associated with this event
    pub fn email(&self) -> &str {
        match self {
            RosterEvent::Enrolled { email, .. } => email,
            RosterEvent::Unenrolled { email, .. } => email,
        }
    }

    /// Check if this event added a participant
    pub fn is_enrollment(&self) -> bool {
        matches!(self, RosterEvent::Enrolled { .. })
    }
}
