//! Sample-domain tone scheduling
//!
//! The mixer keeps a sample clock and a set of oscillators, each with a start
//! and stop time on that clock. Rendering advances the clock one sample at a
//! time and sums whatever is sounding.

use super::SineOscillator;

/// Identifies the oscillators scheduled by one `play` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScheduleId(pub u64);

/// A request to sound one sine oscillator between two session times
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledTone {
    /// Schedule this tone belongs to
    pub schedule: ScheduleId,
    /// Frequency in Hz
    pub frequency: f64,
    /// Linear gain
    pub gain: f64,
    /// Session time in seconds at which the tone starts
    pub start_secs: f64,
    /// Session time in seconds at which the tone stops
    pub stop_secs: f64,
}

struct ActiveTone {
    schedule: ScheduleId,
    oscillator: SineOscillator,
    gain: f64,
    start: u64,
    stop: u64,
}

/// Sums scheduled oscillators against a sample clock
pub struct Mixer {
    sample_rate: f64,
    clock: u64,
    tones: Vec<ActiveTone>,
}

impl Mixer {
    /// Create a mixer with its clock at zero
    pub fn new(sample_rate: f64) -> Self {
        Self {
            sample_rate,
            clock: 0,
            tones: Vec::new(),
        }
    }

    /// Get the sample rate
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Current clock position in seconds
    pub fn current_time(&self) -> f64 {
        self.clock as f64 / self.sample_rate
    }

    /// Number of tones still to sound or sounding
    pub fn pending(&self) -> usize {
        self.tones.len()
    }

    /// True once every scheduled tone has stopped
    pub fn is_idle(&self) -> bool {
        self.tones.is_empty()
    }

    /// Add a tone. Tones whose stop time has already passed are dropped.
    pub fn schedule(&mut self, tone: ScheduledTone) {
        let start = self.to_samples(tone.start_secs).max(self.clock);
        let stop = self.to_samples(tone.stop_secs);
        if stop <= start {
            return;
        }

        self.tones.push(ActiveTone {
            schedule: tone.schedule,
            oscillator: SineOscillator::new(tone.frequency, self.sample_rate),
            gain: tone.gain,
            start,
            stop,
        });
    }

    /// Drop every tone of a schedule, sounding or not. Returns how many were dropped.
    pub fn cancel(&mut self, schedule: ScheduleId) -> usize {
        let before = self.tones.len();
        self.tones.retain(|t| t.schedule != schedule);
        before - self.tones.len()
    }

    /// Generate the next sample and advance the clock
    pub fn process(&mut self) -> f64 {
        let now = self.clock;
        let mut output = 0.0;

        for tone in &mut self.tones {
            if tone.start <= now && now < tone.stop {
                output += tone.oscillator.generate() * tone.gain;
            }
        }

        self.clock += 1;
        let clock = self.clock;
        self.tones.retain(|t| t.stop > clock);

        output.clamp(-1.0, 1.0)
    }

    /// Fill a buffer with samples
    pub fn fill_buffer(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process() as f32;
        }
    }

    fn to_samples(&self, secs: f64) -> u64 {
        (secs.max(0.0) * self.sample_rate).round() as u64
    }
}
