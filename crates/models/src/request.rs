use crate::Id;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A student's request to move from one shift of a course to another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftRequest {
    pub id: Id,
    /// The shift the student wants to move into
    pub shift_id: Id,
    /// The shift the student currently attends
    pub old_shift_id: Id,
    pub course_id: Id,
    pub student_id: Id,
    /// Director's answer; `None` while the request is open
    pub response: Option<String>,
    #[serde(default)]
    pub alternative_shift_id: Option<Id>,
    #[serde(default)]
    pub response_seen_by_student: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(with = "created_at")]
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub accepted: bool,
}

impl ShiftRequest {
    pub fn is_open(&self) -> bool {
        self.response.is_none()
    }
}

/// A teacher's request to move a shift to another classroom
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassroomRequest {
    pub id: Id,
    pub classroom_id: Id,
    pub old_classroom_id: Id,
    pub teacher_id: Id,
    pub response: Option<String>,
    #[serde(default)]
    pub response_seen_by_teacher: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(with = "created_at")]
    pub created_at: NaiveDateTime,
}

/// Timestamps are stored as `YYYY/MM/DD HH:mm`
pub mod created_at {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error as DeError};

    pub const FORMAT: &str = "%Y/%m/%d %H:%M";

    pub fn format(value: &NaiveDateTime) -> String {
        value.format(FORMAT).to_string()
    }

    pub fn parse(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
        NaiveDateTime::parse_from_str(s, FORMAT)
    }

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse(&s).map_err(|e| D::Error::custom(format!("invalid timestamp {s:?}: {e}")))
    }
}
