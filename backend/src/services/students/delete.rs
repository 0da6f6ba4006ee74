use actix_web::{web, HttpResponse, Responder};
use rusqlite::{params, Connection};
use std::sync::Mutex;

pub(crate) async fn process(
    store: web::Data<Mutex<Connection>>,
    student_id: web::Path<String>,
) -> impl Responder {
    match store
        .lock()
        .map_err(|e| e.to_string())
        .and_then(|conn| delete_student(&conn, &student_id))
    {
        Ok(true) => HttpResponse::Ok().body("Student deleted"),
        Ok(false) => HttpResponse::NotFound().body("Student not found"),
        Err(e) => {
            HttpResponse::ServiceUnavailable().body(format!("Error deleting student: {}", e))
        }
    }
}

/// Deletes one student by id. Returns whether a row was removed. Attendance
/// rows referencing the student go with it via the schema's ON DELETE CASCADE.
pub(crate) fn delete_student(conn: &Connection, id: &str) -> Result<bool, String> {
    conn.execute("DELETE FROM students WHERE id = ?1", params![id])
        .map(|affected| affected > 0)
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::services::attendance::mark::mark_attendance;
    use crate::services::students::create::create_student;
    use common::model::attendance::AttendanceStatus;
    use common::requests::{AttendanceMark, NewStudent};

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        db::init_schema(&conn).unwrap();
        conn
    }

    fn seed_student(conn: &Connection, name: &str, roll: &str) -> String {
        create_student(
            conn,
            &NewStudent {
                name: name.to_string(),
                roll_number: roll.to_string(),
                grade: "9B".to_string(),
                email: None,
            },
        )
        .unwrap()
        .id
    }

    #[test]
    fn deleting_a_student_cascades_to_their_attendance() {
        let conn = test_conn();
        let ana = seed_student(&conn, "Ana", "R100");
        let ben = seed_student(&conn, "Ben", "R101");
        for id in [&ana, &ben] {
            mark_attendance(
                &conn,
                &AttendanceMark {
                    student_id: id.clone(),
                    date: "2024-01-10".to_string(),
                    status: AttendanceStatus::Present,
                },
            )
            .unwrap();
        }

        assert!(delete_student(&conn, &ana).unwrap());

        let remaining: i64 = conn
            .query_row("SELECT COUNT(*) FROM attendance", [], |r| r.get(0))
            .unwrap();
        assert_eq!(remaining, 1);
        let owner: String = conn
            .query_row("SELECT student_id FROM attendance", [], |r| r.get(0))
            .unwrap();
        assert_eq!(owner, ben);
    }

    #[test]
    fn deleting_an_unknown_id_reports_no_row_removed() {
        let conn = test_conn();
        assert!(!delete_student(&conn, "missing").unwrap());
    }
}
