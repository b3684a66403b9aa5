//! Gate codec
//!
//! Pure translation from gate data to a dial string and to a DTMF tone
//! schedule. Nothing here performs I/O.

mod dial;
mod keypad;
mod schedule;

pub use dial::{build_dial_string, PAUSE, TEL_PREFIX};
pub use keypad::{is_keypad_symbol, keypad_pair, KEYPAD_SYMBOLS};
pub use schedule::{build_tone_schedule, ToneEvent, ToneSchedule, GAP_MS, TONE_MS, VOLUME};
