//! Inactivity tracking for one watch session.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::time::Instant;

use crate::event::{ActivityKind, WatchEvent};

/// Effect of a single event on a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    /// The inactivity clock was reset.
    Refreshed,
    /// The watched root itself was deleted; the session is over.
    RootRemoved,
}

/// Last-activity bookkeeping for one watched root.
#[derive(Debug, Clone)]
pub struct ActivityTracker {
    root: PathBuf,
    last_activity: Instant,
    active: bool,
    events_seen: u64,
}

impl ActivityTracker {
    /// Start tracking `root`, counting `now` as the last activity.
    pub fn new(root: impl Into<PathBuf>, now: Instant) -> Self {
        Self {
            root: root.into(),
            last_activity: now,
            active: true,
            events_seen: 0,
        }
    }

    /// Record an event observed at `now`.
    ///
    /// Every event resets the inactivity clock. Deleting the root itself
    /// also deactivates the session.
    pub fn record(&mut self, event: &WatchEvent, now: Instant) -> Activity {
        self.last_activity = now;
        self.events_seen += 1;

        if event.kind == ActivityKind::Removed && event.path == self.root {
            self.active = false;
            return Activity::RootRemoved;
        }
        Activity::Refreshed
    }

    /// Time since the last recorded activity.
    pub fn idle_for(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_activity)
    }

    /// Whether the session is active and has been idle for longer than `grace_period`.
    pub fn grace_expired(&self, now: Instant, grace_period: Duration) -> bool {
        self.active && self.idle_for(now) > grace_period
    }

    /// The watched root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// When the last activity happened.
    pub fn last_activity(&self) -> Instant {
        self.last_activity
    }

    /// False once the root has been deleted.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Number of events recorded so far.
    pub fn events_seen(&self) -> u64 {
        self.events_seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRACE: Duration = Duration::from_secs(600);

    #[test]
    fn test_idle_past_grace_expires() {
        let start = Instant::now();
        let tracker = ActivityTracker::new("/drop", start);

        assert!(!tracker.grace_expired(start + GRACE, GRACE));
        assert!(tracker.grace_expired(start + GRACE + Duration::from_millis(1), GRACE));
    }

    #[test]
    fn test_last_activity_follows_latest_event() {
        let start = Instant::now();
        let mut tracker = ActivityTracker::new("/drop", start);

        let events = [
            WatchEvent::created("/drop/a.wav"),
            WatchEvent::modified("/drop/a.wav"),
            WatchEvent::removed("/drop/tmp"),
            WatchEvent::created("/drop/sub"),
        ];

        let mut now = start;
        for event in &events {
            now += Duration::from_secs(300);
            assert_eq!(tracker.record(event, now), Activity::Refreshed);
            assert_eq!(tracker.last_activity(), now);
            assert!(!tracker.grace_expired(now, GRACE));
        }

        assert_eq!(tracker.events_seen(), 4);
        // 20 minutes of events, none more than 5 minutes apart
        assert!(!tracker.grace_expired(now + GRACE, GRACE));
        assert!(tracker.grace_expired(now + GRACE + Duration::from_secs(1), GRACE));
    }

    #[test]
    fn test_root_removal_deactivates() {
        let start = Instant::now();
        let mut tracker = ActivityTracker::new("/drop", start);

        let activity = tracker.record(&WatchEvent::removed("/drop"), start);
        assert_eq!(activity, Activity::RootRemoved);
        assert!(!tracker.is_active());

        // Never expires once inactive, however long it has been
        assert!(!tracker.grace_expired(start + GRACE * 10, GRACE));
    }

    #[test]
    fn test_only_exact_root_deactivates() {
        let start = Instant::now();
        let mut tracker = ActivityTracker::new("/drop", start);

        assert_eq!(
            tracker.record(&WatchEvent::removed("/drop/inner"), start),
            Activity::Refreshed
        );
        assert_eq!(
            tracker.record(&WatchEvent::modified("/drop"), start),
            Activity::Refreshed
        );
        assert_eq!(
            tracker.record(&WatchEvent::removed("/drop_other"), start),
            Activity::Refreshed
        );
        assert!(tracker.is_active());
    }
}
