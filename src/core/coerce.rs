//! Request-boundary coercion of loosely typed JSON into entry fields
//!
//! Clients send numbers as text or as JSON numbers, and `present` as the word
//! shown in their attendance column. These helpers turn such values into the
//! typed [`EntryPatch`] the stores understand. Numeric coercion never fails:
//! unreadable input becomes NaN. Values of an unusable JSON type for a text or
//! flag field are reported as [`CoercionError`].

use crate::core::entry::{EntryField, EntryPatch, FieldKind, FieldValue};
use crate::core::error::CoercionError;
use serde_json::{Map, Value};

/// Literal that marks a driver as present, compared case-insensitively
pub const PRESENT_MARKER: &str = "present";

/// Coerce a create request body into a complete patch
///
/// Every numeric field is written (absent ones become NaN) and `present` is
/// always written. Text fields are written only when the body names them.
/// Keys that are not entry fields are dropped.
pub fn patch_for_create(body: &Map<String, Value>) -> Result<EntryPatch, CoercionError> {
    let mut patch = EntryPatch::new();

    for field in EntryField::ALL {
        let value = body.get(field.as_str());
        match field.kind() {
            FieldKind::Number => {
                patch.set(field, FieldValue::Number(to_number(value)));
            }
            FieldKind::Flag => {
                patch.set(field, FieldValue::Flag(to_present(field, value)?));
            }
            FieldKind::Text => {
                if let Some(value) = value {
                    patch.set(field, FieldValue::Text(to_text(field, value)?));
                }
            }
        }
    }

    Ok(patch)
}

/// Coerce an update request body into a partial patch
///
/// Uses the same per-field rules as [`patch_for_create`], applied only to the
/// fields the body provides.
pub fn patch_for_update(body: &Map<String, Value>) -> Result<EntryPatch, CoercionError> {
    let mut patch = EntryPatch::new();

    for (key, value) in body {
        let Some(field) = EntryField::from_key(key) else {
            continue;
        };

        let coerced = match field.kind() {
            FieldKind::Number => FieldValue::Number(to_number(Some(value))),
            FieldKind::Flag => FieldValue::Flag(to_present(field, Some(value))?),
            FieldKind::Text => FieldValue::Text(to_text(field, value)?),
        };
        patch.set(field, coerced);
    }

    Ok(patch)
}

/// Read any JSON value as a number
///
/// `null` and blank text read as zero, booleans as one or zero. An array is
/// read through its text form: empty is zero, a single element is read as that
/// element's text, longer arrays are NaN. A missing value, objects and text
/// that is not a number read as NaN.
pub fn to_number(value: Option<&Value>) -> f64 {
    match value {
        None => f64::NAN,
        Some(Value::Null) => 0.0,
        Some(Value::Bool(flag)) => {
            if *flag {
                1.0
            } else {
                0.0
            }
        }
        Some(Value::Number(number)) => number.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(text)) => parse_numeric_text(text),
        Some(Value::Array(items)) => match items.as_slice() {
            [] => 0.0,
            [item] => array_item_number(item),
            _ => f64::NAN,
        },
        Some(Value::Object(_)) => f64::NAN,
    }
}

fn array_item_number(item: &Value) -> f64 {
    match item {
        Value::Null => 0.0,
        Value::Bool(_) | Value::Object(_) => f64::NAN,
        other => to_number(Some(other)),
    }
}

/// Read the attendance marker
///
/// Text equal to "present" in any case is `true`, any other text is `false`.
/// A missing or `null` value is `false`; other JSON types are rejected.
pub fn to_present(field: EntryField, value: Option<&Value>) -> Result<bool, CoercionError> {
    match value {
        None | Some(Value::Null) => Ok(false),
        Some(Value::String(text)) => Ok(text.to_lowercase() == PRESENT_MARKER),
        Some(other) => Err(CoercionError::new(field, "text", json_type_name(other))),
    }
}

/// Read a text field
///
/// Numbers and booleans are kept in their textual form; `null` clears the
/// field.
pub fn to_text(field: EntryField, value: &Value) -> Result<Option<String>, CoercionError> {
    match value {
        Value::Null => Ok(None),
        Value::String(text) => Ok(Some(text.clone())),
        Value::Number(number) => Ok(Some(number.to_string())),
        Value::Bool(flag) => Ok(Some(flag.to_string())),
        other => Err(CoercionError::new(field, "text", json_type_name(other))),
    }
}

fn parse_numeric_text(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    if let Some(radix_value) = parse_prefixed_integer(trimmed) {
        return radix_value;
    }

    // Rust's float parser also accepts "inf" and "nan"; only plain decimal
    // notation is a number here.
    let is_decimal = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if !is_decimal {
        return f64::NAN;
    }

    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_prefixed_integer(text: &str) -> Option<f64> {
    let (digits, radix) = match text.get(..2) {
        Some("0x") | Some("0X") => (&text[2..], 16),
        Some("0o") | Some("0O") => (&text[2..], 8),
        Some("0b") | Some("0B") => (&text[2..], 2),
        _ => return None,
    };

    if digits.is_empty() {
        return Some(f64::NAN);
    }

    // Bare digits only; a sign after the prefix makes the text NaN.
    let value = digits.chars().try_fold(0.0, |acc: f64, c| {
        c.to_digit(radix)
            .map(|d| acc * f64::from(radix) + f64::from(d))
    });
    Some(value.unwrap_or(f64::NAN))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "text",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
