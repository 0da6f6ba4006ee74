use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of per-day attendance states.
///
/// Serialized (and stored) as the lowercase strings `present`, `absent`,
/// `late`; these are the wire values exchanged with the backend and the
/// values written to the `attendance.status` column.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Late => "late",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(AttendanceStatus::Present),
            "absent" => Ok(AttendanceStatus::Absent),
            "late" => Ok(AttendanceStatus::Late),
            other => Err(format!("unknown attendance status: {}", other)),
        }
    }
}

/// One stored attendance row. At most one record exists per
/// (`student_id`, `date`) pair; marking the same pair again overwrites the
/// status in place.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AttendanceRecord {
    pub id: String,
    pub student_id: String,
    /// Calendar date in ISO `YYYY-MM-DD` form, no time component.
    pub date: String,
    pub status: AttendanceStatus,
    /// Present in the schema, unused by any view.
    pub notes: Option<String>,
    pub created_at: String,
}

/// The identity fields of the student an attendance row refers to, as
/// returned by the history listing's join.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct StudentRef {
    pub name: String,
    pub roll_number: String,
    pub grade: String,
}

/// An attendance row joined with the referenced student's identity.
///
/// `status` stays a raw string here so that a value outside the known set is
/// displayed as-is by the history view instead of failing deserialization.
/// `student` is `None` only if the row somehow outlived its student; the
/// cascade on deletion normally prevents that.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AttendanceEntry {
    pub id: String,
    pub student_id: String,
    pub date: String,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: String,
    pub student: Option<StudentRef>,
}
