//! Dial string encoding

use crate::gate::Gate;

/// Scheme prefix handed to the telephony launcher
pub const TEL_PREFIX: &str = "tel:";

/// Pause separator, one per unit of delay
pub const PAUSE: char = ',';

/// Build the dial string for a gate.
///
/// The result is `tel:<phone>` followed by `delay` pause separators and then
/// the code, untouched. Nothing is escaped or checked here; the launcher
/// rejects numbers it cannot dial.
pub fn build_dial_string(gate: &Gate) -> String {
    let delay = gate.delay as usize;
    let mut dial = String::with_capacity(TEL_PREFIX.len() + gate.phone.len() + delay + gate.code.len());

    dial.push_str(TEL_PREFIX);
    dial.push_str(&gate.phone);
    dial.extend(std::iter::repeat(PAUSE).take(delay));
    dial.push_str(&gate.code);
    dial
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate(phone: &str, code: &str, delay: u32) -> Gate {
        Gate {
            id: "g1".to_string(),
            name: "Front door".to_string(),
            phone: phone.to_string(),
            code: code.to_string(),
            delay,
            color: "#4A90D9".to_string(),
        }
    }

    #[test]
    fn test_dial_string_with_delay() {
        let dial = build_dial_string(&gate("0601020304", "1234", 3));
        assert_eq!(dial, "tel:0601020304,,,1234");
    }

    #[test]
    fn test_no_delay() {
        let dial = build_dial_string(&gate("0601020304", "1234", 0));
        assert_eq!(dial, "tel:06010203041234");
    }

    #[test]
    fn test_empty_code() {
        let dial = build_dial_string(&gate("0601020304", "", 2));
        assert_eq!(dial, "tel:0601020304,,");
    }

    #[test]
    fn test_phone_passes_through() {
        let dial = build_dial_string(&gate("+33 6 01 02 03 04;ext=12", "#9", 1));
        assert!(dial.starts_with("tel:+33 6 01 02 03 04;ext=12"));
        assert!(dial.ends_with(",#9"));
    }

    #[test]
    fn test_structure_holds_for_many_delays() {
        for delay in 0..20 {
            let g = gate("555", "*42#", delay);
            let dial = build_dial_string(&g);
            let rest = dial.strip_prefix("tel:555").unwrap();
            let pauses = rest.chars().take_while(|c| *c == PAUSE).count();

            assert_eq!(pauses, delay as usize);
            assert_eq!(&rest[pauses..], "*42#");
        }
    }

    #[test]
    fn test_delay_only_changes_pause_count() {
        let short = build_dial_string(&gate("555", "12", 1));
        let long = build_dial_string(&gate("555", "12", 4));

        assert_eq!(short.replace(PAUSE, ""), long.replace(PAUSE, ""));
        assert_eq!(long.len() - short.len(), 3);
    }
}
