//! Tile activation gestures
//!
//! A single tap calls the gate, a double tap previews its tones and a long
//! press opens it for editing. `TapTracker` sorts raw press/release input into
//! those actions; the caller supplies the clock and polls for timeouts.

use std::time::{Duration, Instant};

use crate::config::GestureConfig;

/// What a gesture asks the tile to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapAction {
    /// Place the call
    Call,
    /// Play the code's tones
    Preview,
    /// Open the gate for editing
    Edit,
}

/// Where a tracker is in a gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapState {
    /// Nothing in progress
    Idle,
    /// Pointer down. `first_tap` is set when this press may be a second tap.
    Pressing { since: Instant, first_tap: Option<Instant> },
    /// One tap seen, waiting to see whether another follows
    AwaitingSecondTap { first: Instant },
    /// Long press fired, waiting for the pointer to lift
    LongPressed,
    /// Pointer moved while down, no long press or tap from this press
    Dragging { first_tap: Option<Instant> },
}

/// Per-tile gesture state machine
#[derive(Debug, Clone)]
pub struct TapTracker {
    state: TapState,
    double_tap: Duration,
    long_press: Duration,
}

impl TapTracker {
    /// Create a tracker with the given double tap window and long press threshold
    pub fn new(double_tap: Duration, long_press: Duration) -> Self {
        Self {
            state: TapState::Idle,
            double_tap,
            long_press,
        }
    }

    /// Current state
    pub fn state(&self) -> TapState {
        self.state
    }

    /// Pointer went down
    pub fn press(&mut self, now: Instant) {
        self.state = match self.state {
            TapState::Idle => TapState::Pressing { since: now, first_tap: None },
            TapState::AwaitingSecondTap { first } => TapState::Pressing {
                since: now,
                first_tap: Some(first),
            },
            other => other,
        };
    }

    /// Pointer moved while down. Cancels the long press and the tap.
    pub fn moved(&mut self) {
        if let TapState::Pressing { first_tap, .. } = self.state {
            self.state = TapState::Dragging { first_tap };
        }
    }

    /// Pointer lifted
    pub fn release(&mut self, now: Instant) -> Option<TapAction> {
        let (next, action) = match self.state {
            TapState::Pressing { first_tap: Some(first), .. } if now.duration_since(first) < self.double_tap => {
                (TapState::Idle, Some(TapAction::Preview))
            }
            // The first tap expired without a poll: settle it, this one starts over
            TapState::Pressing { first_tap: Some(_), .. } => {
                (TapState::AwaitingSecondTap { first: now }, Some(TapAction::Call))
            }
            TapState::Pressing { first_tap: None, .. } => (TapState::AwaitingSecondTap { first: now }, None),
            TapState::Dragging { first_tap: Some(first) } => (TapState::AwaitingSecondTap { first }, None),
            TapState::Dragging { first_tap: None } | TapState::LongPressed => (TapState::Idle, None),
            other => (other, None),
        };
        self.state = next;
        action
    }

    /// Press and release at the same instant
    pub fn tap(&mut self, now: Instant) -> Option<TapAction> {
        self.press(now);
        self.release(now)
    }

    /// Resolve whatever has timed out by `now`, earliest deadline first
    pub fn poll(&mut self, now: Instant) -> Option<TapAction> {
        match self.state {
            TapState::Pressing { since, first_tap: Some(first) } if now.duration_since(first) >= self.double_tap => {
                self.state = TapState::Pressing { since, first_tap: None };
                Some(TapAction::Call)
            }
            TapState::Pressing { since, .. } if now.duration_since(since) >= self.long_press => {
                self.state = TapState::LongPressed;
                Some(TapAction::Edit)
            }
            TapState::AwaitingSecondTap { first } if now.duration_since(first) >= self.double_tap => {
                self.state = TapState::Idle;
                Some(TapAction::Call)
            }
            TapState::Dragging { first_tap: Some(first) } if now.duration_since(first) >= self.double_tap => {
                self.state = TapState::Dragging { first_tap: None };
                Some(TapAction::Call)
            }
            _ => None,
        }
    }

    /// When `poll` next needs to run, if anything is pending
    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            TapState::Pressing { since, first_tap: Some(first) } => {
                Some((first + self.double_tap).min(since + self.long_press))
            }
            TapState::Pressing { since, first_tap: None } => Some(since + self.long_press),
            TapState::AwaitingSecondTap { first } => Some(first + self.double_tap),
            TapState::Dragging { first_tap: Some(first) } => Some(first + self.double_tap),
            _ => None,
        }
    }

    /// Drop any gesture in progress
    pub fn reset(&mut self) {
        self.state = TapState::Idle;
    }
}

impl Default for TapTracker {
    fn default() -> Self {
        Self::new(Duration::from_millis(400), Duration::from_millis(600))
    }
}

impl From<&GestureConfig> for TapTracker {
    fn from(config: &GestureConfig) -> Self {
        Self::new(config.double_tap(), config.long_press())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_single_tap_calls_after_window() {
        let t0 = Instant::now();
        let mut tracker = TapTracker::default();

        assert_eq!(tracker.tap(t0), None);
        assert_eq!(tracker.deadline(), Some(t0 + ms(400)));
        assert_eq!(tracker.poll(t0 + ms(399)), None);
        assert_eq!(tracker.poll(t0 + ms(400)), Some(TapAction::Call));
        assert_eq!(tracker.state(), TapState::Idle);
        assert_eq!(tracker.poll(t0 + ms(2000)), None);
    }

    #[test]
    fn test_double_tap_previews() {
        let t0 = Instant::now();
        let mut tracker = TapTracker::default();

        assert_eq!(tracker.tap(t0), None);
        assert_eq!(tracker.tap(t0 + ms(250)), Some(TapAction::Preview));
        assert_eq!(tracker.state(), TapState::Idle);

        // The first tap must not also call
        assert_eq!(tracker.poll(t0 + ms(1000)), None);
    }

    #[test]
    fn test_slow_second_tap_settles_first() {
        let t0 = Instant::now();
        let mut tracker = TapTracker::default();

        tracker.tap(t0);
        assert_eq!(tracker.tap(t0 + ms(500)), Some(TapAction::Call));
        assert_eq!(tracker.poll(t0 + ms(900)), Some(TapAction::Call));
    }

    #[test]
    fn test_long_press_edits() {
        let t0 = Instant::now();
        let mut tracker = TapTracker::default();

        tracker.press(t0);
        assert_eq!(tracker.poll(t0 + ms(599)), None);
        assert_eq!(tracker.poll(t0 + ms(600)), Some(TapAction::Edit));
        assert_eq!(tracker.state(), TapState::LongPressed);

        assert_eq!(tracker.release(t0 + ms(800)), None);
        assert_eq!(tracker.state(), TapState::Idle);
        assert_eq!(tracker.poll(t0 + ms(5000)), None);
    }

    #[test]
    fn test_held_second_press_still_calls_first_tap() {
        let t0 = Instant::now();
        let mut tracker = TapTracker::default();

        tracker.tap(t0);
        tracker.press(t0 + ms(100));
        assert_eq!(tracker.deadline(), Some(t0 + ms(400)));

        let mut actions = Vec::new();
        for step in 1..=120 {
            actions.extend(tracker.poll(t0 + ms(step * 10)));
        }
        actions.extend(tracker.release(t0 + ms(1250)));

        assert_eq!(actions, vec![TapAction::Call, TapAction::Edit]);
        assert_eq!(tracker.state(), TapState::Idle);
    }

    #[test]
    fn test_expired_first_tap_leaves_long_press_deadline() {
        let t0 = Instant::now();
        let mut tracker = TapTracker::default();

        tracker.tap(t0);
        tracker.press(t0 + ms(100));
        assert_eq!(tracker.poll(t0 + ms(400)), Some(TapAction::Call));
        assert_eq!(tracker.deadline(), Some(t0 + ms(700)));
        assert_eq!(tracker.poll(t0 + ms(699)), None);
        assert_eq!(tracker.poll(t0 + ms(700)), Some(TapAction::Edit));
    }

    #[test]
    fn test_movement_cancels_long_press() {
        let t0 = Instant::now();
        let mut tracker = TapTracker::default();

        tracker.press(t0);
        tracker.moved();
        assert_eq!(tracker.poll(t0 + ms(1000)), None);
        assert_eq!(tracker.release(t0 + ms(1100)), None);
        assert_eq!(tracker.state(), TapState::Idle);
    }

    #[test]
    fn test_drag_keeps_pending_first_tap() {
        let t0 = Instant::now();
        let mut tracker = TapTracker::default();

        tracker.tap(t0);
        tracker.press(t0 + ms(100));
        tracker.moved();
        assert_eq!(tracker.release(t0 + ms(200)), None);
        assert_eq!(tracker.poll(t0 + ms(400)), Some(TapAction::Call));
    }

    #[test]
    fn test_press_then_quick_release_is_a_tap() {
        let t0 = Instant::now();
        let mut tracker = TapTracker::default();

        tracker.press(t0);
        assert_eq!(tracker.release(t0 + ms(100)), None);
        assert_eq!(tracker.state(), TapState::AwaitingSecondTap { first: t0 + ms(100) });
    }

    #[test]
    fn test_from_config() {
        let config = GestureConfig {
            double_tap_ms: 250,
            long_press_ms: 900,
        };
        let t0 = Instant::now();
        let mut tracker = TapTracker::from(&config);

        tracker.press(t0);
        assert_eq!(tracker.deadline(), Some(t0 + ms(900)));
        tracker.release(t0);
        assert_eq!(tracker.deadline(), Some(t0 + ms(250)));
    }

    #[test]
    fn test_reset() {
        let t0 = Instant::now();
        let mut tracker = TapTracker::new(ms(300), ms(500));

        tracker.tap(t0);
        tracker.reset();
        assert_eq!(tracker.deadline(), None);
        assert_eq!(tracker.poll(t0 + ms(1000)), None);
    }
}
