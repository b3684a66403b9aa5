//! DTMF tone schedule
//!
//! Every character of a code owns a fixed time slot of `TONE_MS + GAP_MS`.
//! Characters outside the keypad produce no tone but keep their slot, so a
//! stray symbol shows up as a silent gap rather than shifting later digits.

use std::time::Duration;

use super::keypad_pair;

/// Length of each tone in milliseconds
pub const TONE_MS: u64 = 150;

/// Silence after each tone in milliseconds
pub const GAP_MS: u64 = 100;

/// Gain applied to each oscillator by the synthesizer
pub const VOLUME: f64 = 0.5;

/// A single dual tone, positioned relative to the start of playback
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneEvent {
    /// The keypad symbol this tone encodes
    pub symbol: char,
    /// Row frequency in Hz
    pub low_freq_hz: f64,
    /// Column frequency in Hz
    pub high_freq_hz: f64,
    /// Start offset in seconds
    pub start_offset_secs: f64,
    /// Tone length in seconds
    pub duration_secs: f64,
}

impl ToneEvent {
    /// Both frequencies, low first
    pub fn frequencies(&self) -> [f64; 2] {
        [self.low_freq_hz, self.high_freq_hz]
    }

    /// Offset at which the tone stops, in seconds
    pub fn end_offset_secs(&self) -> f64 {
        self.start_offset_secs + self.duration_secs
    }
}

/// Ordered tone events for a code plus the time the whole sequence occupies
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToneSchedule {
    events: Vec<ToneEvent>,
    total_ms: u64,
}

impl ToneSchedule {
    /// Events in code order
    pub fn events(&self) -> &[ToneEvent] {
        &self.events
    }

    /// Number of tones that will sound
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True when no tone will sound
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Total playback time in milliseconds, gaps and silent slots included
    pub fn total_ms(&self) -> u64 {
        self.total_ms
    }

    /// Total playback time
    pub fn total_duration(&self) -> Duration {
        Duration::from_millis(self.total_ms)
    }

    /// Iterate over the events
    pub fn iter(&self) -> std::slice::Iter<'_, ToneEvent> {
        self.events.iter()
    }
}

impl<'a> IntoIterator for &'a ToneSchedule {
    type Item = &'a ToneEvent;
    type IntoIter = std::slice::Iter<'a, ToneEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

/// Build the tone schedule for a DTMF code
pub fn build_tone_schedule(code: &str) -> ToneSchedule {
    let slot_ms = TONE_MS + GAP_MS;
    let duration_secs = TONE_MS as f64 / 1000.0;

    let events = code
        .chars()
        .enumerate()
        .filter_map(|(i, symbol)| {
            keypad_pair(symbol).map(|(low, high)| ToneEvent {
                symbol,
                low_freq_hz: low as f64,
                high_freq_hz: high as f64,
                start_offset_secs: (i as u64 * slot_ms) as f64 / 1000.0,
                duration_secs,
            })
        })
        .collect();

    ToneSchedule {
        events,
        total_ms: code.chars().count() as u64 * slot_ms,
    }
}
