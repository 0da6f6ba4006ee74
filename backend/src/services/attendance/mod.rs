//! # Attendance Service Module
//!
//! API endpoints for daily attendance under `/api/attendance`.
//!
//! ## Registered routes
//!
//! *   **`GET `** (`history::process`): lists attendance rows joined with the
//!     referenced student's identity, newest date first. The optional `date`
//!     and `student_id` query parameters each add an equality predicate,
//!     combined with AND when both are present.
//!
//! *   **`POST `** (`mark::process`): upserts one record from an
//!     `AttendanceMark` payload with (`student_id`, `date`) as the conflict
//!     key, so re-marking a student for the same day overwrites the status
//!     in place instead of adding a second row.

pub(crate) mod history;
pub(crate) mod mark;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/attendance";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(history::process))
        .route("", post().to(mark::process))
}
