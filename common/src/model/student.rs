use serde::{Deserialize, Serialize};

/// A roster entry as stored by the backend.
///
/// `id` and `created_at` are assigned by the store on insertion; clients only
/// ever hold re-fetchable copies. There is no edit flow: a student is created
/// once and later removed, which cascades to their attendance rows.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub roll_number: String,
    pub grade: String,
    /// `None` when no email was provided. A blank submission is coerced to
    /// `None` rather than stored as an empty string.
    pub email: Option<String>,
    pub created_at: String,
}
