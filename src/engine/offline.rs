//! Offline audio sessions
//!
//! Tones go into a shared `Mixer` that nothing drains automatically; the
//! owner pulls samples when it wants them, for WAV export or tests.

use std::sync::{Arc, Mutex, MutexGuard};

use super::{AudioBackend, AudioSession, SessionState, SynthError};
use crate::synth::{Mixer, ScheduleId, ScheduledTone};

/// Backend handing out sessions over one shared mixer
#[derive(Clone)]
pub struct OfflineBackend {
    mixer: Arc<Mutex<Mixer>>,
}

impl OfflineBackend {
    /// Create a backend rendering at the given sample rate
    pub fn new(sample_rate: u32) -> Self {
        Self {
            mixer: Arc::new(Mutex::new(Mixer::new(sample_rate as f64))),
        }
    }

    /// The mixer sessions schedule into
    pub fn mixer(&self) -> Arc<Mutex<Mixer>> {
        self.mixer.clone()
    }
}

impl AudioBackend for OfflineBackend {
    fn open(&self) -> Result<Box<dyn AudioSession>, SynthError> {
        Ok(Box::new(OfflineSession {
            mixer: self.mixer.clone(),
        }))
    }
}

/// Session over a manually rendered mixer. Always running.
pub struct OfflineSession {
    mixer: Arc<Mutex<Mixer>>,
}

impl OfflineSession {
    fn mixer(&self) -> MutexGuard<'_, Mixer> {
        lock_mixer(&self.mixer)
    }
}

impl AudioSession for OfflineSession {
    fn state(&self) -> SessionState {
        SessionState::Running
    }

    fn resume(&mut self) -> Result<(), SynthError> {
        Ok(())
    }

    fn current_time(&self) -> f64 {
        self.mixer().current_time()
    }

    fn schedule(&mut self, tone: ScheduledTone) {
        self.mixer().schedule(tone);
    }

    fn cancel(&mut self, schedule: ScheduleId) -> usize {
        self.mixer().cancel(schedule)
    }
}

/// Lock a shared mixer, recovering it if a holder panicked
pub(crate) fn lock_mixer(mixer: &Mutex<Mixer>) -> MutexGuard<'_, Mixer> {
    mixer.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
