//! Telephone keypad frequency table

/// The twelve symbols of a telephone keypad
pub const KEYPAD_SYMBOLS: [char; 12] = ['1', '2', '3', '4', '5', '6', '7', '8', '9', '*', '0', '#'];

/// Look up the `(low, high)` frequency pair in Hz for a keypad symbol.
///
/// Rows select the low tone, columns the high tone.
pub fn keypad_pair(symbol: char) -> Option<(u16, u16)> {
    let pair = match symbol {
        '1' => (697, 1209),
        '2' => (697, 1336),
        '3' => (697, 1477),
        '4' => (770, 1209),
        '5' => (770, 1336),
        '6' => (770, 1477),
        '7' => (852, 1209),
        '8' => (852, 1336),
        '9' => (852, 1477),
        '*' => (941, 1209),
        '0' => (941, 1336),
        '#' => (941, 1477),
        _ => return None,
    };
    Some(pair)
}

/// Check whether a character is one of the keypad symbols
pub fn is_keypad_symbol(symbol: char) -> bool {
    keypad_pair(symbol).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_pairs() {
        assert_eq!(keypad_pair('5'), Some((770, 1336)));
        assert_eq!(keypad_pair('*'), Some((941, 1209)));
        assert_eq!(keypad_pair('0'), Some((941, 1336)));
        assert_eq!(keypad_pair('#'), Some((941, 1477)));
        assert_eq!(keypad_pair('1'), Some((697, 1209)));
    }

    #[test]
    fn test_grid_layout() {
        let lows = [697, 770, 852, 941];
        let highs = [1209, 1336, 1477];

        for (i, symbol) in KEYPAD_SYMBOLS.iter().enumerate() {
            let expected = (lows[i / 3], highs[i % 3]);
            assert_eq!(keypad_pair(*symbol), Some(expected), "symbol {}", symbol);
        }
    }

    #[test]
    fn test_unknown_symbols() {
        for symbol in ['A', 'p', ',', ' ', 'w', '+'] {
            assert_eq!(keypad_pair(symbol), None);
            assert!(!is_keypad_symbol(symbol));
        }
    }
}
