use common::model::attendance::{AttendanceEntry, AttendanceStatus};
use common::model::student::Student;

pub enum Msg {
    SetDate(String),
    DataLoaded {
        seq: u32,
        students: Vec<Student>,
        records: Vec<AttendanceEntry>,
    },
    LoadFailed {
        seq: u32,
        error: String,
    },
    Mark {
        student_id: String,
        status: AttendanceStatus,
    },
    SaveSucceeded {
        student_id: String,
        status: AttendanceStatus,
    },
    SaveFailed {
        student_id: String,
    },
    ClearSaveStatus,
}
