//! Keeps the main window at a fixed width/height ratio.
//!
//! Applying a corrective size raises another resize event of its own. While a
//! correction is settling the governor ignores resize events, and a deferred
//! task releases it after [`SETTLE_DELAY`].

use super::deferred::{DeferredQueue, TaskId};
use std::time::{Duration, Instant};
use tracing::debug;

/// Time the corrected geometry is given to settle before events are observed again.
pub const SETTLE_DELAY: Duration = Duration::from_millis(10);

/// Where a resize notification came from. Only the top-level window is governed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventOrigin {
    Window,
    Child,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResizeEvent {
    pub origin: EventOrigin,
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizeLock {
    /// Listening for resize events.
    Idle,
    /// A correction was applied; events are ignored until `release` runs.
    Correcting { release: TaskId },
}

enum GovernorTask {
    Release,
}

pub struct ResizeGovernor {
    ratio: f64,
    settle_delay: Duration,
    lock: ResizeLock,
    tasks: DeferredQueue<GovernorTask>,
}

impl ResizeGovernor {
    /// `ratio` is width divided by height, e.g. `9.0 / 16.0`.
    pub fn new(ratio: f64) -> Self {
        Self::with_settle_delay(ratio, SETTLE_DELAY)
    }

    pub fn with_settle_delay(ratio: f64, settle_delay: Duration) -> Self {
        Self {
            ratio,
            settle_delay,
            lock: ResizeLock::Idle,
            tasks: DeferredQueue::new(),
        }
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    pub fn lock(&self) -> ResizeLock {
        self.lock
    }

    pub fn is_correcting(&self) -> bool {
        matches!(self.lock, ResizeLock::Correcting { .. })
    }

    /// Height that matches `width` at the governed ratio.
    pub fn target_height(&self, width: u32) -> u32 {
        (f64::from(width) / self.ratio).round() as u32
    }

    /// Geometry of a window `width` wide at the governed ratio.
    pub fn geometry_for_width(&self, width: u32) -> Geometry {
        Geometry {
            width,
            height: self.target_height(width),
        }
    }

    /// Handles one resize notification. Returns the corrective geometry to
    /// apply, at most once until the settle delay has elapsed.
    pub fn on_resize(&mut self, event: ResizeEvent, now: Instant) -> Option<Geometry> {
        if event.origin != EventOrigin::Window || self.is_correcting() {
            return None;
        }

        let corrected = self.geometry_for_width(event.width);
        if event.height == corrected.height {
            return None;
        }

        let release = self.tasks.schedule(now, self.settle_delay, GovernorTask::Release);
        self.lock = ResizeLock::Correcting { release };
        debug!(
            "Correcting window {}x{} to {}x{}",
            event.width, event.height, corrected.width, corrected.height
        );
        Some(corrected)
    }

    /// Runs due deferred tasks. Call once per frame.
    pub fn poll(&mut self, now: Instant) {
        for task in self.tasks.poll_due(now) {
            match task {
                GovernorTask::Release => self.lock = ResizeLock::Idle,
            }
        }
    }

    /// When the next deferred task is due, for scheduling a repaint.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.tasks.next_deadline()
    }

    /// Cancels a pending release and returns to listening immediately.
    pub fn release(&mut self) {
        if let ResizeLock::Correcting { release } = self.lock {
            self.tasks.cancel(release);
        }
        self.lock = ResizeLock::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(width: u32, height: u32) -> ResizeEvent {
        ResizeEvent {
            origin: EventOrigin::Window,
            width,
            height,
        }
    }

    #[test]
    fn test_mismatched_event_corrected_once() {
        let start = Instant::now();
        let mut governor = ResizeGovernor::new(9.0 / 16.0);

        let correction = governor.on_resize(window(400, 300), start);
        assert_eq!(
            correction,
            Some(Geometry {
                width: 400,
                height: 711
            })
        );
        assert!(governor.is_correcting());

        // The correction raises its own event; it must not trigger another one.
        assert_eq!(governor.on_resize(window(400, 711), start), None);
        // Further events from the same drag are ignored as well.
        assert_eq!(
            governor.on_resize(window(420, 300), start + Duration::from_millis(5)),
            None
        );
    }

    #[test]
    fn test_settled_geometry_is_not_corrected_again() {
        let start = Instant::now();
        let mut governor = ResizeGovernor::new(9.0 / 16.0);
        governor.on_resize(window(400, 300), start);

        governor.poll(start + Duration::from_millis(9));
        assert!(governor.is_correcting());

        governor.poll(start + SETTLE_DELAY);
        assert_eq!(governor.lock(), ResizeLock::Idle);
        assert_eq!(governor.on_resize(window(400, 711), start + SETTLE_DELAY), None);
    }

    #[test]
    fn test_new_gesture_after_settling_is_corrected() {
        let start = Instant::now();
        let mut governor = ResizeGovernor::new(9.0 / 16.0);
        governor.on_resize(window(400, 300), start);
        governor.poll(start + SETTLE_DELAY);

        let later = start + Duration::from_millis(100);
        assert_eq!(
            governor.on_resize(window(360, 700), later),
            Some(Geometry {
                width: 360,
                height: 640
            })
        );
    }

    #[test]
    fn test_child_events_are_ignored() {
        let mut governor = ResizeGovernor::new(9.0 / 16.0);
        let event = ResizeEvent {
            origin: EventOrigin::Child,
            width: 400,
            height: 300,
        };
        assert_eq!(governor.on_resize(event, Instant::now()), None);
        assert!(!governor.is_correcting());
    }

    #[test]
    fn test_matching_event_needs_no_correction() {
        let mut governor = ResizeGovernor::new(9.0 / 16.0);
        assert_eq!(governor.on_resize(window(450, 800), Instant::now()), None);
        assert_eq!(governor.next_deadline(), None);
    }

    #[test]
    fn test_release_cancels_pending_task() {
        let start = Instant::now();
        let mut governor = ResizeGovernor::new(9.0 / 16.0);
        governor.on_resize(window(400, 300), start);
        assert!(governor.next_deadline().is_some());

        governor.release();
        assert!(!governor.is_correcting());
        assert_eq!(governor.next_deadline(), None);
    }
}
