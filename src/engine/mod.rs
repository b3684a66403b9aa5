//! Tone playback
//!
//! `ToneSynthesizer` owns the audio session for the life of the process and
//! turns tone schedules into pairs of scheduled sine oscillators. The session
//! comes from an `AudioBackend`: the sound card through cpal, or an offline
//! mixer rendered by hand.

mod offline;
mod player;
mod recorder;

pub use offline::{OfflineBackend, OfflineSession};
pub use player::{CpalBackend, OutputDevice};
pub use recorder::{render_to_wav, WavSink};

use std::time::Duration;

use thiserror::Error;

use crate::codec::{ToneSchedule, VOLUME};
use crate::synth::{ScheduleId, ScheduledTone};

/// Audio failures. None of them affect dialing.
#[derive(Debug, Error)]
pub enum SynthError {
    #[error("audio output unavailable: {0}")]
    CapabilityUnavailable(String),

    #[error("audio stream error: {0}")]
    Stream(String),
}

/// Whether a session is producing sound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Created but held back until resumed
    Suspended,
    /// Advancing its clock and playing scheduled tones
    Running,
}

/// An open audio output with its own clock
pub trait AudioSession {
    /// Current state
    fn state(&self) -> SessionState;

    /// Start or restart the clock
    fn resume(&mut self) -> Result<(), SynthError>;

    /// Session time in seconds
    fn current_time(&self) -> f64;

    /// Queue one oscillator against the session clock
    fn schedule(&mut self, tone: ScheduledTone);

    /// Silence every oscillator of a schedule, returning how many were dropped
    fn cancel(&mut self, schedule: ScheduleId) -> usize;
}

/// Something that can open an audio session
pub trait AudioBackend {
    /// Open a new session
    fn open(&self) -> Result<Box<dyn AudioSession>, SynthError>;
}

/// Plays tone schedules through a lazily opened session
pub struct ToneSynthesizer {
    backend: Box<dyn AudioBackend>,
    session: Option<Box<dyn AudioSession>>,
    next_schedule: u64,
}

impl ToneSynthesizer {
    /// Create a synthesizer. No session is opened until it is needed.
    pub fn new(backend: impl AudioBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            session: None,
            next_schedule: 0,
        }
    }

    /// True once a session has been opened
    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    /// Return the session, opening it on first use and resuming it if suspended
    pub fn ensure_session(&mut self) -> Result<&mut dyn AudioSession, SynthError> {
        let session = match self.session.take() {
            Some(session) => session,
            None => {
                let session = self.backend.open()?;
                tracing::debug!("opened audio session");
                session
            }
        };
        let session = self.session.insert(session);

        if session.state() == SessionState::Suspended {
            tracing::debug!("resuming suspended audio session");
            session.resume()?;
        }

        Ok(&mut **session)
    }

    /// Schedule a tone schedule to start now.
    ///
    /// Returns immediately. Tones from earlier calls keep sounding; callers
    /// wait `schedule.total_duration()` to know when playback is over. An empty
    /// schedule touches nothing and returns `None`.
    pub fn play(&mut self, schedule: &ToneSchedule) -> Result<Option<ScheduleId>, SynthError> {
        if schedule.is_empty() {
            return Ok(None);
        }

        self.next_schedule += 1;
        let id = ScheduleId(self.next_schedule);

        let session = self.ensure_session()?;
        let now = session.current_time();

        for event in schedule {
            for frequency in event.frequencies() {
                session.schedule(ScheduledTone {
                    schedule: id,
                    frequency,
                    gain: VOLUME,
                    start_secs: now + event.start_offset_secs,
                    stop_secs: now + event.end_offset_secs(),
                });
            }
        }

        tracing::debug!("scheduled {} tones at t={:.3}s", schedule.len(), now);
        Ok(Some(id))
    }

    /// Silence a schedule started by `play`
    pub fn cancel(&mut self, schedule: ScheduleId) -> usize {
        self.session.as_mut().map_or(0, |session| session.cancel(schedule))
    }
}

/// Extra wait after the last tone so the stream is not dropped mid-buffer
const PLAYBACK_TAIL: Duration = Duration::from_millis(150);

/// How a blocking preview ended
#[derive(Debug)]
pub enum PreviewOutcome {
    /// Tones played for this long
    Played(Duration),
    /// The schedule had no tones
    NothingToPlay,
    /// No audio; dialing is unaffected
    Unavailable(SynthError),
}

/// Play a schedule and block on a timer until it has finished.
///
/// Audio failures come back as `PreviewOutcome::Unavailable`, never as an error.
pub fn preview_blocking(synth: &mut ToneSynthesizer, schedule: &ToneSchedule) -> PreviewOutcome {
    match synth.play(schedule) {
        Ok(Some(_)) => {}
        Ok(None) => return PreviewOutcome::NothingToPlay,
        Err(e) => {
            tracing::warn!("tone preview unavailable: {}", e);
            return PreviewOutcome::Unavailable(e);
        }
    }

    let wait = schedule.total_duration() + PLAYBACK_TAIL;
    let rt = match tokio::runtime::Builder::new_current_thread().enable_time().build() {
        Ok(rt) => rt,
        Err(e) => return PreviewOutcome::Unavailable(SynthError::Stream(e.to_string())),
    };
    rt.block_on(tokio::time::sleep(wait));

    PreviewOutcome::Played(schedule.total_duration())
}
