//! Tone synthesis
//!
//! Sine oscillators and the mixer that plays them on a sample clock.

mod mixer;
mod oscillator;

pub use mixer::{Mixer, ScheduleId, ScheduledTone};
pub use oscillator::SineOscillator;
