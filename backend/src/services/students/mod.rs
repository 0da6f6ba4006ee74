//! # Student Service Module
//!
//! Aggregates the API endpoints for the student roster under `/api/students`.
//!
//! ## Registered routes
//!
//! *   **`GET `** (`list::process`): returns all students. The `order` query
//!     parameter selects one of the three sort keys the views use:
//!     `name` (filter dropdown), `roll_number` (attendance marker) or
//!     `created_at` (registry list, newest first).
//!
//! *   **`POST `** (`create::process`): inserts one student from a
//!     `NewStudent` payload. The store assigns the id and creation timestamp;
//!     a blank email is stored as NULL, never as an empty string.
//!
//! *   **`DELETE /{student_id}`** (`delete::process`): removes a student by
//!     id. Their attendance rows cascade at the store layer.

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod list;

use actix_web::web::{delete, get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/students";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("", post().to(create::process))
        .route("/{student_id}", delete().to(delete::process))
}
