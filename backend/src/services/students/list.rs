use actix_web::{web, HttpResponse, Responder};
use common::model::student::Student;
use rusqlite::Connection;
use serde::Deserialize;
use std::sync::Mutex;

#[derive(Deserialize)]
pub(crate) struct ListQuery {
    pub order: Option<String>,
}

pub(crate) async fn process(
    store: web::Data<Mutex<Connection>>,
    query: web::Query<ListQuery>,
) -> impl Responder {
    match store
        .lock()
        .map_err(|e| e.to_string())
        .and_then(|conn| list_students(&conn, query.order.as_deref()))
    {
        Ok(students) => HttpResponse::Ok().json(students),
        Err(e) => {
            HttpResponse::ServiceUnavailable().body(format!("Error listing students: {}", e))
        }
    }
}

/// Lists the full roster with one of the three sort keys the views use.
/// The key is mapped onto a whitelisted ORDER BY clause; anything else falls
/// back to name order.
pub(crate) fn list_students(
    conn: &Connection,
    order: Option<&str>,
) -> Result<Vec<Student>, String> {
    let order_clause = match order {
        Some("created_at") => "created_at DESC",
        Some("roll_number") => "roll_number ASC",
        _ => "name ASC",
    };

    let sql = format!(
        "SELECT id, name, roll_number, grade, email, created_at
         FROM students ORDER BY {}",
        order_clause
    );
    let mut stmt = conn.prepare(&sql).map_err(|e| e.to_string())?;
    stmt.query_map([], |row| {
        Ok(Student {
            id: row.get(0)?,
            name: row.get(1)?,
            roll_number: row.get(2)?,
            grade: row.get(3)?,
            email: row.get(4)?,
            created_at: row.get(5)?,
        })
    })
    .and_then(|rows| rows.collect::<Result<Vec<_>, _>>())
    .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use rusqlite::params;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        db::init_schema(&conn).unwrap();
        conn
    }

    fn insert(conn: &Connection, id: &str, name: &str, roll: &str, created_at: &str) {
        conn.execute(
            "INSERT INTO students (id, name, roll_number, grade, email, created_at)
             VALUES (?1, ?2, ?3, '9B', NULL, ?4)",
            params![id, name, roll, created_at],
        )
        .unwrap();
    }

    #[test]
    fn created_at_order_puts_newest_first() {
        let conn = test_conn();
        insert(&conn, "s1", "Ana", "R2", "2024-01-01T08:00:00Z");
        insert(&conn, "s2", "Ben", "R1", "2024-02-01T08:00:00Z");

        let students = list_students(&conn, Some("created_at")).unwrap();
        assert_eq!(students[0].id, "s2");
        assert_eq!(students[1].id, "s1");
    }

    #[test]
    fn roll_number_order_is_ascending() {
        let conn = test_conn();
        insert(&conn, "s1", "Ana", "R2", "2024-01-01T08:00:00Z");
        insert(&conn, "s2", "Ben", "R1", "2024-02-01T08:00:00Z");

        let students = list_students(&conn, Some("roll_number")).unwrap();
        assert_eq!(students[0].roll_number, "R1");
    }

    #[test]
    fn unknown_order_key_falls_back_to_name() {
        let conn = test_conn();
        insert(&conn, "s1", "Zoe", "R1", "2024-01-01T08:00:00Z");
        insert(&conn, "s2", "Ana", "R2", "2024-02-01T08:00:00Z");

        let students = list_students(&conn, Some("id; DROP TABLE students")).unwrap();
        assert_eq!(students[0].name, "Ana");
        assert_eq!(students.len(), 2);
    }
}
