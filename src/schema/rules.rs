//! Field rules and the interpreter that checks a JSON payload against them

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

use super::time::parse_time;

/// Kind of value a field carries on the wire
#[derive(Clone, Copy)]
pub enum FieldKind {
    Text,
    Integer,
    /// Time of day, "HH:MM" or "HH:MM:SS"
    Time,
    /// Closed set of string values
    Enum(fn() -> Vec<String>),
}

impl fmt::Debug for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Text => f.write_str("Text"),
            FieldKind::Integer => f.write_str("Integer"),
            FieldKind::Time => f.write_str("Time"),
            FieldKind::Enum(values) => write!(f, "Enum({:?})", values()),
        }
    }
}

/// Constraints of a single payload field
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    /// JSON key
    pub name: &'static str,
    /// Display name used in messages
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub nullable: bool,
    /// Whitespace-only text counts as missing
    pub trim: bool,
    /// Minimum length in characters (text only)
    pub min_chars: Option<usize>,
    /// Minimum value (integers only)
    pub min_value: Option<i64>,
    /// Message for an absent or blank required value
    pub missing_message: Option<&'static str>,
    /// Message for a value below `min_chars`
    pub min_chars_message: Option<&'static str>,
}

impl FieldRule {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
            nullable: false,
            trim: false,
            min_chars: None,
            min_value: None,
            missing_message: None,
            min_chars_message: None,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub const fn trimmed(mut self) -> Self {
        self.trim = true;
        self
    }

    pub const fn min_chars(mut self, min: usize, message: &'static str) -> Self {
        self.min_chars = Some(min);
        self.min_chars_message = Some(message);
        self
    }

    pub const fn min_value(mut self, min: i64) -> Self {
        self.min_value = Some(min);
        self
    }

    pub const fn missing_message(mut self, message: &'static str) -> Self {
        self.missing_message = Some(message);
        self
    }

    fn missing(&self) -> String {
        match self.missing_message {
            Some(msg) => msg.to_string(),
            None => format!("{} 항목은 필수입니다", self.label),
        }
    }
}

/// Whether absent required fields are an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Every required field must be present
    Create,
    /// Only the fields present are checked
    Update,
}

/// A rejected field and the user-facing reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// All field errors found in one payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// First message reported for `field`
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&summary)
    }
}

impl std::error::Error for ValidationErrors {}

/// Check `payload` against `schema`, returning the payload object on success.
///
/// Keys not named by the schema are ignored. All failing fields are reported,
/// at most one message per field.
pub fn validate<'a>(
    schema: &[FieldRule],
    payload: &'a Value,
    mode: Mode,
) -> Result<&'a Map<String, Value>, ValidationErrors> {
    let Some(obj) = payload.as_object() else {
        return Err(ValidationErrors::single("", "요청 본문은 JSON 객체여야 합니다"));
    };

    let mut errors = ValidationErrors::new();
    for rule in schema {
        if let Some(message) = check_field(rule, obj.get(rule.name), mode) {
            errors.push(rule.name, message);
        }
    }

    errors.into_result().map(|_| obj)
}

fn check_field(rule: &FieldRule, value: Option<&Value>, mode: Mode) -> Option<String> {
    let value = match value {
        None => {
            return (rule.required && mode == Mode::Create).then(|| rule.missing());
        }
        Some(Value::Null) => {
            if rule.nullable {
                return None;
            }
            return Some(rule.missing());
        }
        Some(v) => v,
    };

    match rule.kind {
        FieldKind::Text => {
            let Some(text) = value.as_str() else {
                return Some(format!("{}은(는) 문자열이어야 합니다", rule.label));
            };
            let blank = if rule.trim { text.trim().is_empty() } else { text.is_empty() };
            if rule.required && blank {
                return Some(rule.missing());
            }
            if let (Some(min), Some(message)) = (rule.min_chars, rule.min_chars_message) {
                if text.chars().count() < min {
                    return Some(message.to_string());
                }
            }
            None
        }
        FieldKind::Integer => {
            let Some(n) = value.as_i64().filter(|n| i32::try_from(*n).is_ok()) else {
                return Some(format!("{}은(는) 정수여야 합니다", rule.label));
            };
            match rule.min_value {
                Some(min) if n < min => Some(format!("{}은(는) {} 이상이어야 합니다", rule.label, min)),
                _ => None,
            }
        }
        FieldKind::Time => match value.as_str().and_then(parse_time) {
            Some(_) => None,
            None => Some(format!("{}은(는) HH:MM 형식이어야 합니다", rule.label)),
        },
        FieldKind::Enum(values) => {
            let allowed = values();
            match value.as_str() {
                Some(v) if allowed.iter().any(|a| a == v) => None,
                _ => Some(format!(
                    "{}은(는) 다음 중 하나여야 합니다: {}",
                    rule.label,
                    allowed.join(", ")
                )),
            }
        }
    }
}
