use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use common::model::student::Student;
use common::requests::NewStudent;
use rusqlite::{params, Connection};
use std::sync::Mutex;
use uuid::Uuid;

pub(crate) async fn process(
    store: web::Data<Mutex<Connection>>,
    payload: web::Json<NewStudent>,
) -> impl Responder {
    if payload.name.trim().is_empty()
        || payload.roll_number.trim().is_empty()
        || payload.grade.trim().is_empty()
    {
        return HttpResponse::BadRequest().body("name, roll_number and grade are required");
    }

    match store
        .lock()
        .map_err(|e| e.to_string())
        .and_then(|conn| create_student(&conn, &payload))
    {
        Ok(student) => HttpResponse::Ok().json(student),
        Err(e) => {
            HttpResponse::ServiceUnavailable().body(format!("Error adding student: {}", e))
        }
    }
}

/// Inserts one roster row. The store owns id generation and the creation
/// timestamp; a blank or whitespace-only email is coerced to NULL.
pub(crate) fn create_student(conn: &Connection, new: &NewStudent) -> Result<Student, String> {
    let student = Student {
        id: Uuid::new_v4().to_string(),
        name: new.name.clone(),
        roll_number: new.roll_number.clone(),
        grade: new.grade.clone(),
        email: new
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(str::to_string),
        created_at: Utc::now().to_rfc3339(),
    };

    conn.execute(
        "INSERT INTO students (id, name, roll_number, grade, email, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            student.id,
            student.name,
            student.roll_number,
            student.grade,
            student.email,
            student.created_at
        ],
    )
    .map_err(|e| e.to_string())?;

    Ok(student)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        db::init_schema(&conn).unwrap();
        conn
    }

    fn new_student(email: Option<&str>) -> NewStudent {
        NewStudent {
            name: "Ana Lee".to_string(),
            roll_number: "R100".to_string(),
            grade: "9B".to_string(),
            email: email.map(str::to_string),
        }
    }

    #[test]
    fn missing_email_is_stored_as_null_not_empty_string() {
        let conn = test_conn();
        for blank in [None, Some(""), Some("   ")] {
            conn.execute("DELETE FROM students", []).unwrap();
            let created = create_student(&conn, &new_student(blank)).unwrap();
            assert_eq!(created.email, None);

            let stored: Option<String> = conn
                .query_row("SELECT email FROM students WHERE id = ?1", [&created.id], |r| {
                    r.get(0)
                })
                .unwrap();
            assert_eq!(stored, None);
        }
    }

    #[test]
    fn provided_email_is_kept_verbatim_after_trim() {
        let conn = test_conn();
        let created = create_student(&conn, &new_student(Some(" ana@example.com "))).unwrap();
        assert_eq!(created.email.as_deref(), Some("ana@example.com"));
    }

    #[test]
    fn each_creation_adds_exactly_one_row() {
        let conn = test_conn();
        create_student(&conn, &new_student(None)).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM students", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
