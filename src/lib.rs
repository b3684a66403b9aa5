//! Portal - speed-dial for gates and intercoms
//!
//! Keeps a small list of gates, each a phone number plus the DTMF code that
//! opens it. A gate becomes a `tel:` dial string with pauses before the code,
//! and its code can be previewed as the actual keypad tones.

pub mod codec;
pub mod config;
pub mod engine;
pub mod gate;
pub mod gesture;
pub mod store;
pub mod synth;
pub mod telephony;

pub use codec::{build_dial_string, build_tone_schedule, ToneEvent, ToneSchedule};
pub use config::PortalConfig;
pub use engine::ToneSynthesizer;
pub use gate::{Gate, GateBook, GateDraft};
