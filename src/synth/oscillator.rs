//! Sine oscillator

use std::f64::consts::PI;

/// A phase-accumulating sine oscillator
#[derive(Debug, Clone)]
pub struct SineOscillator {
    phase: f64,
    frequency: f64,
    sample_rate: f64,
}

impl SineOscillator {
    /// Create an oscillator starting at phase zero
    pub fn new(frequency: f64, sample_rate: f64) -> Self {
        Self {
            phase: 0.0,
            frequency,
            sample_rate,
        }
    }

    /// Get the frequency in Hz
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Reset the phase
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    /// Generate the next sample in -1.0..=1.0
    pub fn generate(&mut self) -> f64 {
        let sample = (self.phase * 2.0 * PI).sin();

        self.phase += self.frequency / self.sample_rate;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }

        sample
    }
}
