//! Gate data model and form validation

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codec::is_keypad_symbol;

/// Color given to gates created without one
pub const DEFAULT_COLOR: &str = "#4A90D9";

/// A stored access point: a number to call and the code to send once connected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gate {
    /// Opaque identifier, fixed at creation
    pub id: String,

    /// Display label
    pub name: String,

    /// Number to dial, any format the launcher accepts
    pub phone: String,

    /// DTMF code sent after the delay
    pub code: String,

    /// Pause units between connection and code
    pub delay: u32,

    /// Display color
    pub color: String,
}

/// Why a draft could not become a gate
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("code symbol {symbol:?} at position {position} is not a keypad symbol (0-9, *, #)")]
    InvalidCodeSymbol { symbol: char, position: usize },
}

/// User input for a new or edited gate, before validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GateDraft {
    pub name: String,
    pub phone: String,
    pub code: String,
    pub delay: u32,
    pub color: String,
}

impl GateDraft {
    /// Trim and check the draft, producing a gate with the given id.
    ///
    /// An empty color is replaced by `default_color`.
    pub fn validate(&self, id: impl Into<String>, default_color: &str) -> Result<Gate, ValidationError> {
        let name = required("name", &self.name)?;
        let phone = required("phone", &self.phone)?;
        let code = required("code", &self.code)?;

        if let Some((position, symbol)) = code.chars().enumerate().find(|(_, c)| !is_keypad_symbol(*c)) {
            return Err(ValidationError::InvalidCodeSymbol { symbol, position });
        }

        let color = match self.color.trim() {
            "" => default_color.to_string(),
            color => color.to_string(),
        };

        Ok(Gate {
            id: id.into(),
            name,
            phone,
            code,
            delay: self.delay,
            color,
        })
    }
}

fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(value.to_string())
}

impl From<&Gate> for GateDraft {
    fn from(gate: &Gate) -> Self {
        Self {
            name: gate.name.clone(),
            phone: gate.phone.clone(),
            code: gate.code.clone(),
            delay: gate.delay,
            color: gate.color.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> GateDraft {
        GateDraft {
            name: "  Garage ".to_string(),
            phone: " 0601020304".to_string(),
            code: "1234#".to_string(),
            delay: 2,
            color: String::new(),
        }
    }

    #[test]
    fn test_validate_trims_and_defaults_color() {
        let gate = draft().validate("abc", DEFAULT_COLOR).unwrap();

        assert_eq!(gate.id, "abc");
        assert_eq!(gate.name, "Garage");
        assert_eq!(gate.phone, "0601020304");
        assert_eq!(gate.code, "1234#");
        assert_eq!(gate.delay, 2);
        assert_eq!(gate.color, DEFAULT_COLOR);
    }

    #[test]
    fn test_missing_fields() {
        let mut d = draft();
        d.name = "   ".to_string();
        assert_eq!(d.validate("x", DEFAULT_COLOR), Err(ValidationError::MissingField("name")));

        let mut d = draft();
        d.phone.clear();
        assert_eq!(d.validate("x", DEFAULT_COLOR), Err(ValidationError::MissingField("phone")));

        let mut d = draft();
        d.code.clear();
        assert_eq!(d.validate("x", DEFAULT_COLOR), Err(ValidationError::MissingField("code")));
    }

    #[test]
    fn test_invalid_code_symbol() {
        let mut d = draft();
        d.code = "12A4".to_string();

        assert_eq!(
            d.validate("x", DEFAULT_COLOR),
            Err(ValidationError::InvalidCodeSymbol { symbol: 'A', position: 2 })
        );
    }

    #[test]
    fn test_explicit_color_kept() {
        let mut d = draft();
        d.color = "#E74C3C".to_string();
        assert_eq!(d.validate("x", DEFAULT_COLOR).unwrap().color, "#E74C3C");
    }

    #[test]
    fn test_serialized_field_names() {
        let gate = draft().validate("abc", DEFAULT_COLOR).unwrap();
        let value = serde_json::to_value(&gate).unwrap();

        for field in ["id", "name", "phone", "code", "delay", "color"] {
            assert!(value.get(field).is_some(), "missing {}", field);
        }
        assert_eq!(value["delay"], 2);
    }

    #[test]
    fn test_draft_from_gate() {
        let gate = draft().validate("abc", DEFAULT_COLOR).unwrap();
        let prefilled = GateDraft::from(&gate);

        assert_eq!(prefilled.validate("abc", DEFAULT_COLOR).unwrap(), gate);
    }
}
