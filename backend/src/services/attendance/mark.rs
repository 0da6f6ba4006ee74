use actix_web::{web, HttpResponse, Responder};
use chrono::{NaiveDate, Utc};
use common::model::attendance::AttendanceRecord;
use common::requests::AttendanceMark;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Mutex;
use uuid::Uuid;

pub(crate) async fn process(
    store: web::Data<Mutex<Connection>>,
    payload: web::Json<AttendanceMark>,
) -> impl Responder {
    if NaiveDate::parse_from_str(&payload.date, "%Y-%m-%d").is_err() {
        return HttpResponse::BadRequest().body("date must be in YYYY-MM-DD form");
    }

    // The lock spans the existence check and the upsert, so the student
    // cannot be deleted between the two.
    let conn = match store.lock() {
        Ok(conn) => conn,
        Err(e) => {
            return HttpResponse::ServiceUnavailable()
                .body(format!("Error saving attendance: {}", e))
        }
    };

    match student_exists(&conn, &payload.student_id) {
        Ok(true) => {}
        Ok(false) => return HttpResponse::BadRequest().body("unknown student"),
        Err(e) => {
            return HttpResponse::ServiceUnavailable()
                .body(format!("Error saving attendance: {}", e))
        }
    }

    match mark_attendance(&conn, &payload) {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(e) => {
            HttpResponse::ServiceUnavailable().body(format!("Error saving attendance: {}", e))
        }
    }
}

fn student_exists(conn: &Connection, student_id: &str) -> Result<bool, String> {
    conn.query_row(
        "SELECT 1 FROM students WHERE id = ?1",
        params![student_id],
        |r| r.get::<_, i64>(0),
    )
    .optional()
    .map(|v| v.is_some())
    .map_err(|e| e.to_string())
}

/// Upserts one attendance row keyed on (`student_id`, `date`).
///
/// On conflict only the status is replaced; the existing row keeps its id and
/// creation timestamp. Returns the row as stored.
pub(crate) fn mark_attendance(
    conn: &Connection,
    mark: &AttendanceMark,
) -> Result<AttendanceRecord, String> {
    conn.execute(
        "INSERT INTO attendance (id, student_id, date, status, notes, created_at)
         VALUES (?1, ?2, ?3, ?4, NULL, ?5)
         ON CONFLICT(student_id, date) DO UPDATE SET status = excluded.status",
        params![
            Uuid::new_v4().to_string(),
            mark.student_id,
            mark.date,
            mark.status.as_str(),
            Utc::now().to_rfc3339()
        ],
    )
    .map_err(|e| e.to_string())?;

    conn.query_row(
        "SELECT id, student_id, date, status, notes, created_at
         FROM attendance WHERE student_id = ?1 AND date = ?2",
        params![mark.student_id, mark.date],
        |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, Option<String>>(4)?,
                row.get::<_, String>(5)?,
            ))
        },
    )
    .map_err(|e| e.to_string())
    .and_then(|(id, student_id, date, status, notes, created_at)| {
        Ok(AttendanceRecord {
            id,
            student_id,
            date,
            status: status.parse()?,
            notes,
            created_at,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::services::students::create::create_student;
    use std::sync::Arc;
    use std::thread;
    use common::model::attendance::AttendanceStatus;
    use common::requests::NewStudent;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        db::init_schema(&conn).unwrap();
        conn
    }

    fn seed_student(conn: &Connection) -> String {
        create_student(
            conn,
            &NewStudent {
                name: "Ana Lee".to_string(),
                roll_number: "R100".to_string(),
                grade: "9B".to_string(),
                email: None,
            },
        )
        .unwrap()
        .id
    }

    fn mark(conn: &Connection, student_id: &str, date: &str, status: AttendanceStatus) -> AttendanceRecord {
        mark_attendance(
            conn,
            &AttendanceMark {
                student_id: student_id.to_string(),
                date: date.to_string(),
                status,
            },
        )
        .unwrap()
    }

    #[test]
    fn remarking_the_same_day_overwrites_instead_of_duplicating() {
        let conn = test_conn();
        let ana = seed_student(&conn);

        let first = mark(&conn, &ana, "2024-01-10", AttendanceStatus::Absent);
        let second = mark(&conn, &ana, "2024-01-10", AttendanceStatus::Present);

        assert_eq!(second.status, AttendanceStatus::Present);
        // The existing row is updated in place: same id, same created_at.
        assert_eq!(second.id, first.id);
        assert_eq!(second.created_at, first.created_at);

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM attendance WHERE student_id = ?1 AND date = '2024-01-10'",
                params![ana],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn marking_one_day_leaves_other_days_untouched() {
        let conn = test_conn();
        let ana = seed_student(&conn);

        mark(&conn, &ana, "2024-01-09", AttendanceStatus::Late);
        mark(&conn, &ana, "2024-01-10", AttendanceStatus::Absent);
        mark(&conn, &ana, "2024-01-10", AttendanceStatus::Present);

        let other_day: String = conn
            .query_row(
                "SELECT status FROM attendance WHERE student_id = ?1 AND date = '2024-01-09'",
                params![ana],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(other_day, "late");
    }

    #[test]
    fn marks_for_different_students_are_independent() {
        let conn = test_conn();
        let ana = seed_student(&conn);
        let ben = create_student(
            &conn,
            &NewStudent {
                name: "Ben Kim".to_string(),
                roll_number: "R101".to_string(),
                grade: "9B".to_string(),
                email: None,
            },
        )
        .unwrap()
        .id;

        mark(&conn, &ana, "2024-01-10", AttendanceStatus::Present);
        mark(&conn, &ben, "2024-01-10", AttendanceStatus::Absent);

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM attendance", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 2);
    }

    // Marks arriving on separate worker threads go through the one shared
    // connection; both land, neither fails on a file lock.
    #[test]
    fn concurrent_marks_serialize_through_the_shared_store() {
        let conn = test_conn();
        let ana = seed_student(&conn);
        let ben = create_student(
            &conn,
            &NewStudent {
                name: "Ben Kim".to_string(),
                roll_number: "R101".to_string(),
                grade: "9B".to_string(),
                email: None,
            },
        )
        .unwrap()
        .id;
        let store = Arc::new(Mutex::new(conn));

        let writers: Vec<_> = [(ana, AttendanceStatus::Present), (ben, AttendanceStatus::Absent)]
            .into_iter()
            .map(|(student_id, status)| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    let conn = store.lock().unwrap();
                    mark_attendance(
                        &conn,
                        &AttendanceMark {
                            student_id,
                            date: "2024-01-10".to_string(),
                            status,
                        },
                    )
                    .unwrap();
                })
            })
            .collect();
        for writer in writers {
            writer.join().unwrap();
        }

        let conn = store.lock().unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM attendance", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn wire_payload_shape_matches_the_frontend() {
        let mark: AttendanceMark = serde_json::from_str(
            r#"{"student_id": "s1", "date": "2024-01-10", "status": "late"}"#,
        )
        .unwrap();
        assert_eq!(mark.status, AttendanceStatus::Late);
    }
}
