use serde::{Deserialize, Serialize};

use crate::model::attendance::AttendanceStatus;

/// Request payload for creating a student from the registry form.
/// `email` is `None` when the optional field was left blank.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NewStudent {
    pub name: String,
    pub roll_number: String,
    pub grade: String,
    pub email: Option<String>,
}

/// Request payload for marking attendance. Upserted with
/// (`student_id`, `date`) as the conflict key: an existing row for the pair
/// has its status overwritten rather than a second row created.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AttendanceMark {
    pub student_id: String,
    pub date: String,
    pub status: AttendanceStatus,
}
