use actix_web::{web, HttpResponse, Responder};
use common::model::attendance::{AttendanceEntry, StudentRef};
use rusqlite::{Connection, ToSql};
use serde::Deserialize;
use std::sync::Mutex;

#[derive(Deserialize)]
pub(crate) struct HistoryQuery {
    pub date: Option<String>,
    pub student_id: Option<String>,
}

pub(crate) async fn process(
    store: web::Data<Mutex<Connection>>,
    query: web::Query<HistoryQuery>,
) -> impl Responder {
    match store.lock().map_err(|e| e.to_string()).and_then(|conn| {
        list_attendance(&conn, query.date.as_deref(), query.student_id.as_deref())
    }) {
        Ok(entries) => HttpResponse::Ok().json(entries),
        Err(e) => {
            HttpResponse::ServiceUnavailable().body(format!("Error listing attendance: {}", e))
        }
    }
}

/// Lists attendance rows joined with the referenced student's identity,
/// newest date first. Each present filter contributes an equality predicate;
/// both combined with AND.
pub(crate) fn list_attendance(
    conn: &Connection,
    date: Option<&str>,
    student_id: Option<&str>,
) -> Result<Vec<AttendanceEntry>, String> {
    let mut sql = String::from(
        "SELECT a.id, a.student_id, a.date, a.status, a.notes, a.created_at,
                s.name, s.roll_number, s.grade
         FROM attendance a
         LEFT JOIN students s ON s.id = a.student_id",
    );
    let mut conditions: Vec<&str> = Vec::new();
    let mut params: Vec<&dyn ToSql> = Vec::new();
    if let Some(date) = &date {
        conditions.push("a.date = ?");
        params.push(date);
    }
    if let Some(student_id) = &student_id {
        conditions.push("a.student_id = ?");
        params.push(student_id);
    }
    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }
    sql.push_str(" ORDER BY a.date DESC, a.created_at DESC");

    let mut stmt = conn.prepare(&sql).map_err(|e| e.to_string())?;
    stmt.query_map(params.as_slice(), |row| {
        let name: Option<String> = row.get(6)?;
        let roll_number: Option<String> = row.get(7)?;
        let grade: Option<String> = row.get(8)?;
        let student = match (name, roll_number, grade) {
            (Some(name), Some(roll_number), Some(grade)) => Some(StudentRef {
                name,
                roll_number,
                grade,
            }),
            _ => None,
        };
        Ok(AttendanceEntry {
            id: row.get(0)?,
            student_id: row.get(1)?,
            date: row.get(2)?,
            status: row.get(3)?,
            notes: row.get(4)?,
            created_at: row.get(5)?,
            student,
        })
    })
    .and_then(|rows| rows.collect::<Result<Vec<_>, _>>())
    .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::services::attendance::mark::mark_attendance;
    use crate::services::students::create::create_student;
    use crate::services::students::delete::delete_student;
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

    fn mark(conn: &Connection, student_id: &str, date: &str, status: AttendanceStatus) {
        mark_attendance(
            conn,
            &AttendanceMark {
                student_id: student_id.to_string(),
                date: date.to_string(),
                status,
            },
        )
        .unwrap();
    }

    #[test]
    fn date_filter_returns_exactly_that_days_records() {
        let conn = test_conn();
        let ana = seed_student(&conn, "Ana", "R100");
        let ben = seed_student(&conn, "Ben", "R101");
        mark(&conn, &ana, "2024-01-09", AttendanceStatus::Late);
        mark(&conn, &ana, "2024-01-10", AttendanceStatus::Present);
        mark(&conn, &ben, "2024-01-10", AttendanceStatus::Absent);

        let entries = list_attendance(&conn, Some("2024-01-10"), None).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.date == "2024-01-10"));
    }

    #[test]
    fn both_filters_combine_with_and() {
        let conn = test_conn();
        let ana = seed_student(&conn, "Ana", "R100");
        let ben = seed_student(&conn, "Ben", "R101");
        mark(&conn, &ana, "2024-01-10", AttendanceStatus::Present);
        mark(&conn, &ben, "2024-01-10", AttendanceStatus::Absent);
        mark(&conn, &ana, "2024-01-11", AttendanceStatus::Late);

        let entries = list_attendance(&conn, Some("2024-01-10"), Some(&ana)).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].student_id, ana);
        assert_eq!(entries[0].status, "present");
    }

    #[test]
    fn unfiltered_listing_is_date_descending_with_joined_identity() {
        let conn = test_conn();
        let ana = seed_student(&conn, "Ana", "R100");
        mark(&conn, &ana, "2024-01-09", AttendanceStatus::Absent);
        mark(&conn, &ana, "2024-01-11", AttendanceStatus::Present);
        mark(&conn, &ana, "2024-01-10", AttendanceStatus::Late);

        let entries = list_attendance(&conn, None, None).unwrap();
        let dates: Vec<&str> = entries.iter().map(|e| e.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-01-11", "2024-01-10", "2024-01-09"]);

        let student = entries[0].student.as_ref().unwrap();
        assert_eq!(student.name, "Ana");
        assert_eq!(student.roll_number, "R100");
        assert_eq!(student.grade, "9B");
    }

    #[test]
    fn deleted_students_rows_are_unreachable_from_history() {
        let conn = test_conn();
        let ana = seed_student(&conn, "Ana", "R100");
        mark(&conn, &ana, "2024-01-10", AttendanceStatus::Present);

        delete_student(&conn, &ana).unwrap();

        assert!(list_attendance(&conn, None, None).unwrap().is_empty());
    }

    // End-to-end flow over the store layer: add a student, mark them
    // present, then read history filtered by that student.
    #[test]
    fn add_mark_and_filter_round_trip() {
        let conn = test_conn();
        let ana = create_student(
            &conn,
            &NewStudent {
                name: "Ana Lee".to_string(),
                roll_number: "R100".to_string(),
                grade: "9B".to_string(),
                email: None,
            },
        )
        .unwrap();
        mark(&conn, &ana.id, "2024-01-10", AttendanceStatus::Present);

        let entries = list_attendance(&conn, None, Some(&ana.id)).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].date, "2024-01-10");
        assert_eq!(entries[0].status, "present");
        assert_eq!(entries[0].student.as_ref().unwrap().name, "Ana Lee");
    }
}
