//! Identifier generation for new gates

use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::OsRng;
use rand::{Rng, RngCore};

/// Source of fresh gate identifiers
pub trait IdGenerator {
    /// Produce an identifier not handed out before
    fn next_id(&mut self) -> String;
}

/// Random version 4 UUIDs from the operating system RNG.
///
/// Falls back to a base-36 timestamp joined with a thread-local random suffix
/// when the OS RNG cannot be read.
#[derive(Debug, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> String {
        let mut bytes = [0u8; 16];
        match OsRng.try_fill_bytes(&mut bytes) {
            Ok(()) => format_uuid_v4(bytes),
            Err(e) => {
                tracing::warn!("OS random source unavailable ({}), using timestamp id", e);
                timestamp_id()
            }
        }
    }
}

fn format_uuid_v4(mut bytes: [u8; 16]) -> String {
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    let hex: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();
    format!("{}-{}-{}-{}-{}", &hex[0..8], &hex[8..12], &hex[12..16], &hex[16..20], &hex[20..32])
}

fn timestamp_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();
    let suffix: u64 = rand::thread_rng().gen();

    format!("{}{}", base36(millis), base36(suffix))
}

fn base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}
