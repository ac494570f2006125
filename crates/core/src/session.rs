//! Session records: one completed work or break interval.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::types::{RecordDate, RecordId};
use crate::validation::{check_fields, parse_record_date, required};

/// Allowed values of the `type` field.
pub const VALID_KINDS: &[&str] = &["work", "break"];

// ---------------------------------------------------------------------------
// SessionKind
// ---------------------------------------------------------------------------

/// Kind of interval a session records. Doubles as the timer's phase flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    Work,
    Break,
}

impl SessionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Break => "break",
        }
    }

    /// The phase that follows this one.
    pub fn opposite(self) -> Self {
        match self {
            Self::Work => Self::Break,
            Self::Break => Self::Work,
        }
    }

    /// Default note attached to records the timer emits.
    pub fn default_note(self) -> &'static str {
        match self {
            Self::Work => "Work session",
            Self::Break => "Break session",
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "work" => Ok(Self::Work),
            "break" => Ok(Self::Break),
            _ => Err(CoreError::Validation(format!(
                "Invalid session type '{s}'. Must be one of: {}",
                VALID_KINDS.join(", ")
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A stored session, as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: RecordId,
    #[serde(rename = "type")]
    pub kind: SessionKind,
    /// Length of the completed interval in seconds.
    pub duration: u32,
    /// Completion time, in the text the creator sent.
    pub date: RecordDate,
    pub notes: Option<String>,
}

/// A validated session ready to be persisted. Also the body the timer
/// client posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewSession {
    #[serde(rename = "type")]
    pub kind: SessionKind,
    pub duration: u32,
    pub date: RecordDate,
    pub notes: Option<String>,
}

impl NewSession {
    /// Attach a store-assigned identity.
    pub fn into_session(self, id: RecordId) -> Session {
        Session {
            id,
            kind: self.kind,
            duration: self.duration,
            date: self.date,
            notes: self.notes,
        }
    }
}

/// Raw `POST /sessions` body. Every field is optional here so that missing
/// fields surface as validation errors instead of deserialization failures.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateSession {
    #[serde(rename = "type")]
    #[validate(required, length(min = 1))]
    pub kind: Option<String>,
    #[validate(required, range(min = 1))]
    pub duration: Option<i64>,
    #[validate(required, length(min = 1))]
    pub date: Option<String>,
    pub notes: Option<String>,
}

impl CreateSession {
    /// Check required fields and parse them into a typed [`NewSession`].
    pub fn validate_into(self) -> Result<NewSession, CoreError> {
        check_fields(&self, wire_name)?;

        let kind: SessionKind = required(self.kind, "type")?.parse()?;
        let duration = u32::try_from(required(self.duration, "duration")?).map_err(|_| {
            CoreError::Validation("duration must be a positive number of seconds".to_string())
        })?;
        let date = parse_record_date("date", required(self.date, "date")?)?;

        Ok(NewSession {
            kind,
            duration,
            date,
            notes: self.notes,
        })
    }
}

fn wire_name(field: &str) -> &str {
    match field {
        "kind" => "type",
        other => other,
    }
}
