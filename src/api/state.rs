//! Application state for the Attendance Engine API.

use std::sync::Arc;

use crate::tracker::AttendanceTracker;

/// Shared application state.
///
/// Cloned into every handler; the tracker itself is shared behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    tracker: Arc<AttendanceTracker>,
}

impl AppState {
    /// Creates application state around a tracker.
    pub fn new(tracker: AttendanceTracker) -> Self {
        Self {
            tracker: Arc::new(tracker),
        }
    }

    /// Returns the tracker.
    pub fn tracker(&self) -> &AttendanceTracker {
        &self.tracker
    }
}
