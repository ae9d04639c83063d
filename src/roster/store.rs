//! Activity Roster Store
//!
//! The single stateful component of the service: an in-memory mapping from
//! activity name to its record, owned for the lifetime of the process. The
//! catalog of activities is fixed at construction; enroll/unenroll are the
//! only mutations. Listing preserves the seeded catalog order.

use crate::error::{Error, Result};
use crate::roster::RosterEvent;
use chrono::Utc;
use indexmap::IndexMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Capacity of the roster event channel
const EVENT_CHANNEL_CAPACITY: usize = 256;

// =============================================================================
// Activity Record
// =============================================================================

/// One extracurricular activity and its roster.
///
/// The activity name is the store's map key, not a record field. Description
/// and schedule are display strings, opaque to the store. `participants`
/// holds unique emails in signup order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    #[serde(default)]
    pub participants: Vec<String>,
}

impl Activity {
    /// Create an activity with an empty roster
    pub fn new(
        description: impl Into<String>,
        schedule: impl Into<String>,
        max_participants: u32,
    ) -> Self {
        Self {
            description: description.into(),
            schedule: schedule.into(),
            max_participants,
            participants: Vec::new(),
        }
    }

    /// Add initial participants (builder-style, for seeding)
    pub fn with_participants<I, S>(mut self, emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.participants = emails.into_iter().map(Into::into).collect();
        self
    }

    /// Check if an email is already on the roster
    pub fn has_participant(&self, email: &str) -> bool {
        self.participants.iter().any(|p| p == email)
    }

    /// Check if the roster is at capacity
    pub fn is_full(&self) -> bool {
        self.participants.len() as u32 >= self.max_participants
    }

    /// Spots remaining on the roster
    pub fn spots_left(&self) -> u32 {
        self.max_participants
            .saturating_sub(self.participants.len() as u32)
    }
}

// =============================================================================
// Store Statistics
// =============================================================================

/// Mutation counters for the store, exposed via the metrics surface
#[derive(Debug, Default)]
pub struct RosterStats {
    /// Signups processed since startup
    pub signups: AtomicU64,
    /// Unregistrations processed since startup
    pub unregistrations: AtomicU64,
    /// Requests rejected by a roster check
    pub rejections: AtomicU64,
}

impl RosterStats {
    /// Create a snapshot of current counters
    pub fn snapshot(&self) -> RosterStatsSnapshot {
        RosterStatsSnapshot {
            signups: self.signups.load(Ordering::Relaxed),
            unregistrations: self.unregistrations.load(Ordering::Relaxed),
            rejections: self.rejections.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of store counters
#[derive(Debug, Clone, Serialize)]
pub struct RosterStatsSnapshot {
    pub signups: u64,
    pub unregistrations: u64,
    pub rejections: u64,
}

// =============================================================================
// Roster Store
// =============================================================================

/// In-memory activity roster store.
///
/// All operations take the store lock for their whole check-then-act
/// sequence, so enroll/unenroll are atomic within the process.
pub struct RosterStore {
    /// Activity records keyed by name, in catalog order
    activities: RwLock<IndexMap<String, Activity>>,
    /// Mutation counters
    stats: RosterStats,
    /// Event broadcaster
    event_sender: broadcast::Sender<RosterEvent>,
}

impl RosterStore {
    /// Create a store seeded with the given activity catalog
    pub fn new(catalog: IndexMap<String, Activity>) -> Arc<Self> {
        let (event_sender, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Arc::new(Self {
            activities: RwLock::new(catalog),
            stats: RosterStats::default(),
            event_sender,
        })
    }

    /// Get an event receiver
    pub fn subscribe(&self) -> broadcast::Receiver<RosterEvent> {
        self.event_sender.subscribe()
    }

    /// Snapshot of the full name-to-record mapping, in catalog order
    pub fn list(&self) -> IndexMap<String, Activity> {
        self.activities.read().clone()
    }

    /// Snapshot of one activity by name
    pub fn get(&self, name: &str) -> Option<Activity> {
        self.activities.read().get(name).cloned()
    }

    /// Check if an activity exists
    pub fn contains(&self, name: &str) -> bool {
        self.activities.read().contains_key(name)
    }

    /// Names of all activities, in catalog order
    pub fn activity_names(&self) -> Vec<String> {
        self.activities.read().keys().cloned().collect()
    }

    /// Number of activities in the catalog
    pub fn activity_count(&self) -> usize {
        self.activities.read().len()
    }

    /// Total participants enrolled across all activities
    pub fn total_enrollments(&self) -> usize {
        self.activities
            .read()
            .values()
            .map(|a| a.participants.len())
            .sum()
    }

    /// Sign a student up for an activity.
    ///
    /// The duplicate check runs before the capacity check: re-enrolling an
    /// existing participant in a full activity reports `AlreadyEnrolled`,
    /// not `ActivityFull`.
    pub fn enroll(&self, name: &str, email: &str) -> Result<Activity> {
        let snapshot = {
            let mut activities = self.activities.write();
            let activity =
                activities
                    .get_mut(name)
                    .ok_or_else(|| Error::ActivityNotFound {
                        name: name.to_string(),
                    })?;

            if activity.has_participant(email) {
                self.stats.rejections.fetch_add(1, Ordering::Relaxed);
                return Err(Error::AlreadyEnrolled {
                    email: email.to_string(),
                    activity: name.to_string(),
                });
            }

            if activity.is_full() {
                self.stats.rejections.fetch_add(1, Ordering::Relaxed);
                return Err(Error::ActivityFull {
                    activity: name.to_string(),
                    max_participants: activity.max_participants,
                });
            }

            activity.participants.push(email.to_string());
            activity.clone()
        };

        self.stats.signups.fetch_add(1, Ordering::Relaxed);

        let _ = self.event_sender.send(RosterEvent::Enrolled {
            activity: name.to_string(),
            email: email.to_string(),
            spots_left: snapshot.spots_left(),
            at: Utc::now(),
        });

        Ok(snapshot)
    }

    /// Remove a student from an activity's roster.
    ///
    /// Signup order of the remaining participants is preserved.
    pub fn unenroll(&self, name: &str, email: &str) -> Result<Activity> {
        let snapshot = {
            let mut activities = self.activities.write();
            let activity =
                activities
                    .get_mut(name)
                    .ok_or_else(|| Error::ActivityNotFound {
                        name: name.to_string(),
                    })?;

            let position = activity.participants.iter().position(|p| p == email);
            let Some(position) = position else {
                self.stats.rejections.fetch_add(1, Ordering::Relaxed);
                return Err(Error::NotRegistered {
                    email: email.to_string(),
                    activity: name.to_string(),
                });
            };

            activity.participants.remove(position);
            activity.clone()
        };

        self.stats.unregistrations.fetch_add(1, Ordering::Relaxed);

        let _ = self.event_sender.send(RosterEvent::Unenrolled {
            activity: name.to_string(),
            email: email.to_string(),
            spots_left: snapshot.spots_left(),
            at: Utc::now(),
        });

        Ok(snapshot)
    }

    /// Get mutation counters
    pub fn stats(&self) -> RosterStatsSnapshot {
        self.stats.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn test_store() -> Arc<RosterStore> {
        let mut catalog = IndexMap::new();
        catalog.insert(
            "Chess Club".to_string(),
            Activity::new("Learn chess strategies", "Fridays, 3:30 PM - 5:00 PM", 2)
                .with_participants(["michael@mergington.edu"]),
        );
        catalog.insert(
            "Art Club".to_string(),
            Activity::new("Painting and drawing", "Thursdays, 3:30 PM - 5:00 PM", 15),
        );
        RosterStore::new(catalog)
    }

    #[test]
    fn test_list_preserves_catalog_order() {
        let store = test_store();
        let names: Vec<_> = store.list().keys().cloned().collect();
        assert_eq!(names, vec!["Chess Club", "Art Club"]);
    }

    #[test]
    fn test_enroll_appends_in_arrival_order() {
        let store = test_store();
        store.enroll("Art Club", "a@mergington.edu").unwrap();
        let updated = store.enroll("Art Club", "b@mergington.edu").unwrap();
        assert_eq!(
            updated.participants,
            vec!["a@mergington.edu", "b@mergington.edu"]
        );
        assert_eq!(store.total_enrollments(), 3);
    }

    #[test]
    fn test_enroll_unknown_activity() {
        let store = test_store();
        let result = store.enroll("Robotics Club", "a@mergington.edu");
        assert_matches!(result, Err(Error::ActivityNotFound { .. }));
        // No side effect on the store
        assert_eq!(store.stats().signups, 0);
    }

    #[test]
    fn test_enroll_duplicate_email() {
        let store = test_store();
        let result = store.enroll("Chess Club", "michael@mergington.edu");
        assert_matches!(result, Err(Error::AlreadyEnrolled { .. }));
        assert_eq!(store.get("Chess Club").unwrap().participants.len(), 1);
    }

    #[test]
    fn test_enroll_full_activity() {
        let store = test_store();
        store.enroll("Chess Club", "daniel@mergington.edu").unwrap();
        assert!(store.get("Chess Club").unwrap().is_full());

        let result = store.enroll("Chess Club", "late@mergington.edu");
        assert_matches!(
            result,
            Err(Error::ActivityFull {
                max_participants: 2,
                ..
            })
        );
    }

    #[test]
    fn test_duplicate_check_precedes_capacity_check() {
        let store = test_store();
        store.enroll("Chess Club", "daniel@mergington.edu").unwrap();
        assert!(store.get("Chess Club").unwrap().is_full());

        // Re-enrolling an existing participant in a full activity must
        // report the duplicate, not the full roster.
        let result = store.enroll("Chess Club", "michael@mergington.edu");
        assert_matches!(result, Err(Error::AlreadyEnrolled { .. }));
    }

    #[test]
    fn test_unenroll_removes_and_preserves_order() {
        let store = test_store();
        store.enroll("Art Club", "a@mergington.edu").unwrap();
        store.enroll("Art Club", "b@mergington.edu").unwrap();
        store.enroll("Art Club", "c@mergington.edu").unwrap();

        let updated = store.unenroll("Art Club", "b@mergington.edu").unwrap();
        assert_eq!(
            updated.participants,
            vec!["a@mergington.edu", "c@mergington.edu"]
        );
    }

    #[test]
    fn test_unenroll_unknown_activity() {
        let store = test_store();
        let result = store.unenroll("Robotics Club", "a@mergington.edu");
        assert_matches!(result, Err(Error::ActivityNotFound { .. }));
    }

    #[test]
    fn test_unenroll_not_registered() {
        let store = test_store();
        let result = store.unenroll("Art Club", "ghost@mergington.edu");
        assert_matches!(result, Err(Error::NotRegistered { .. }));
    }

    #[test]
    fn test_same_email_across_activities() {
        let store = test_store();
        store.enroll("Chess Club", "a@mergington.edu").unwrap();
        store.enroll("Art Club", "a@mergington.edu").unwrap();
        assert!(store.get("Chess Club").unwrap().has_participant("a@mergington.edu"));
        assert!(store.get("Art Club").unwrap().has_participant("a@mergington.edu"));
    }

    #[test]
    fn test_events_emitted() {
        let store = test_store();
        let mut rx = store.subscribe();

        store.enroll("Art Club", "a@mergington.edu").unwrap();
        store.unenroll("Art Club", "a@mergington.edu").unwrap();

        let event = rx.try_recv().unwrap();
        assert!(event.is_enrollment());
        assert_eq!(event.activity(), "Art Club");
        assert_eq!(event.email(), "a@mergington.edu");

        let event = rx.try_recv().unwrap();
        assert!(!event.is_enrollment());
    }

    #[test]
    fn test_stats_counters() {
        let store = test_store();
        store.enroll("Art Club", "a@mergington.edu").unwrap();
        store.enroll("Art Club", "a@mergington.edu").unwrap_err();
        store.unenroll("Art Club", "a@mergington.edu").unwrap();
        store.unenroll("Art Club", "a@mergington.edu").unwrap_err();

        let stats = store.stats();
        assert_eq!(stats.signups, 1);
        assert_eq!(stats.unregistrations, 1);
        assert_eq!(stats.rejections, 2);
    }
}
