use crate::point::{Point, PointError};
use crate::signed::{SignedValue, ValueError, BAR_MARKER};

/// Malformed textual point notation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("point notation must be wrapped in parentheses: {0:?}")]
    MissingParens(String),

    #[error("slot {slot} is empty")]
    EmptySlot { slot: usize },

    #[error("slot {slot} is not an integer optionally followed by '{BAR_MARKER}': {text:?}")]
    InvalidValue { slot: usize, text: String },

    #[error("slot {slot}: {source}")]
    Value {
        slot: usize,
        #[source]
        source: ValueError,
    },

    #[error(transparent)]
    Point(#[from] PointError),
}

/// Parse one value: a positive decimal integer, optionally suffixed by the bar marker.
pub fn parse_value(text: &str) -> Result<SignedValue, ParseError> {
    parse_slot(text, 1)
}

/// Parse `(v1 | v2 | ... | vk)`. Whitespace is allowed around every token.
pub fn parse_point(text: &str) -> Result<Point, ParseError> {
    let inner = text
        .trim()
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| ParseError::MissingParens(text.to_string()))?;

    let values = inner
        .split('|')
        .enumerate()
        .map(|(i, raw)| parse_slot(raw, i + 1))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Point::new(values)?)
}

fn parse_slot(raw: &str, slot: usize) -> Result<SignedValue, ParseError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(ParseError::EmptySlot { slot });
    }
    let (digits, barred) = match text.strip_suffix(BAR_MARKER) {
        Some(digits) => (digits, true),
        None => (text, false),
    };
    let invalid = || ParseError::InvalidValue {
        slot,
        text: text.to_string(),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let magnitude: u32 = digits.parse().map_err(|_| invalid())?;
    SignedValue::new(magnitude, barred).map_err(|source| ParseError::Value { slot, source })
}
