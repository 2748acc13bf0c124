//! Form field value objects

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Three-valued answer for the "permitted" / "conforming" / "compliant" flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum Answer {
    #[default]
    Unanswered,
    Yes,
    No,
}

impl Answer {
    pub fn is_answered(self) -> bool {
        !matches!(self, Self::Unanswered)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Unanswered => "unanswered",
            Self::Yes => "yes",
            Self::No => "no",
        }
    }
}

impl From<Option<bool>> for Answer {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => Self::Unanswered,
            Some(true) => Self::Yes,
            Some(false) => Self::No,
        }
    }
}

impl From<Answer> for Option<bool> {
    fn from(value: Answer) -> Self {
        match value {
            Answer::Unanswered => None,
            Answer::Yes => Some(true),
            Answer::No => Some(false),
        }
    }
}

/// Numeric field that holds text until the user has typed a number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericText {
    Number(f64),
    Text(String),
}

impl NumericText {
    #[allow(dead_code)]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Text(s) if s.is_empty())
    }
}

impl Default for NumericText {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl fmt::Display for NumericText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Declared value kind of a record field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Numeric,
    Answer,
}

impl FieldKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Numeric => "numeric",
            Self::Answer => "yes/no",
        }
    }
}

/// Type-safe field values
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Numeric(NumericText),
    Answer(Answer),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl FieldValue {
    /// True while the field still holds its initial empty/unset value
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Numeric(n) => n.is_empty(),
            FieldValue::Answer(a) => !a.is_answered(),
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Numeric(n) => n.to_string(),
            FieldValue::Answer(a) => a.label().to_string(),
        }
    }
}

/// Raw host input that cannot be turned into a field's value kind
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldParseError {
    #[error("unknown field `{0}`")]
    UnknownField(String),
    #[error("`{input}` is not a yes/no answer (expected yes, no or unset)")]
    InvalidAnswer { input: String },
}

/// Value types that can be stored in a record field
pub trait RecordValue: Sized {
    const KIND: FieldKind;

    fn to_field_value(&self) -> FieldValue;

    fn parse_input(input: &str) -> Result<Self, FieldParseError>;
}

impl RecordValue for String {
    const KIND: FieldKind = FieldKind::Text;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Text(self.clone())
    }

    fn parse_input(input: &str) -> Result<Self, FieldParseError> {
        Ok(input.to_string())
    }
}

impl RecordValue for NumericText {
    const KIND: FieldKind = FieldKind::Numeric;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Numeric(self.clone())
    }

    // Only input that prints back unchanged becomes a number, so "007" or
    // "1e3" keep their spelling. Checking the text is the step UI's job.
    fn parse_input(input: &str) -> Result<Self, FieldParseError> {
        let trimmed = input.trim();
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() && n.to_string() == trimmed => Ok(NumericText::Number(n)),
            _ => Ok(NumericText::Text(input.to_string())),
        }
    }
}

impl RecordValue for Answer {
    const KIND: FieldKind = FieldKind::Answer;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Answer(*self)
    }

    fn parse_input(input: &str) -> Result<Self, FieldParseError> {
        match input.trim().to_ascii_lowercase().as_str() {
            "yes" | "y" | "true" => Ok(Answer::Yes),
            "no" | "n" | "false" => Ok(Answer::No),
            "" | "unset" | "unanswered" => Ok(Answer::Unanswered),
            _ => Err(FieldParseError::InvalidAnswer {
                input: input.to_string(),
            }),
        }
    }
}
