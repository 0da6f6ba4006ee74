//! Update function for the attendance marker.
//!
//! Key behaviors
//! - Date changes re-fetch the roster and that day's records; responses are
//!   tagged with a sequence number and stale ones are dropped.
//! - Marking applies the status to the local mapping before the upsert is
//!   sent; a failed save reverts that one entry to the last value the store
//!   confirmed, not to whatever was displayed at click time.
//! - Save outcomes surface as a transient banner that clears itself after
//!   2 s ("Saved") or 3 s ("Error saving").

use gloo_console::error;
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::model::attendance::{AttendanceEntry, AttendanceStatus};
use common::model::student::Student;
use common::requests::AttendanceMark;

use super::messages::Msg;
use super::state::AttendanceMarker;

pub fn update(
    component: &mut AttendanceMarker,
    ctx: &Context<AttendanceMarker>,
    msg: Msg,
) -> bool {
    match msg {
        Msg::SetDate(date) => {
            if date.is_empty() || date == component.selected_date {
                return false;
            }
            component.selected_date = date;
            start_fetch(component, ctx);
            true
        }
        Msg::DataLoaded {
            seq,
            students,
            records,
        } => {
            if seq != component.fetch_seq {
                return false;
            }
            component.loading = false;
            component.students = students;
            component.attendance = records
                .iter()
                .filter_map(|record| {
                    record
                        .status
                        .parse::<AttendanceStatus>()
                        .ok()
                        .map(|status| (record.student_id.clone(), status))
                })
                .collect();
            component.confirmed = component.attendance.clone();
            true
        }
        Msg::LoadFailed { seq, error } => {
            if seq != component.fetch_seq {
                return false;
            }
            component.loading = false;
            error!("Error fetching attendance data:", error);
            true
        }
        Msg::Mark { student_id, status } => {
            component.attendance.insert(student_id.clone(), status);

            let payload = AttendanceMark {
                student_id: student_id.clone(),
                date: component.selected_date.clone(),
                status,
            };
            let link = ctx.link().clone();
            spawn_local(async move {
                let outcome = Request::post("/api/attendance")
                    .json(&payload)
                    .unwrap()
                    .send()
                    .await;
                match outcome {
                    Ok(resp) if resp.status() == 200 => {
                        link.send_message(Msg::SaveSucceeded { student_id, status })
                    }
                    _ => link.send_message(Msg::SaveFailed { student_id }),
                }
            });
            true
        }
        Msg::SaveSucceeded { student_id, status } => {
            component.confirmed.insert(student_id, status);
            component.save_status = Some("Saved");
            clear_save_status_after(ctx, 2000);
            true
        }
        Msg::SaveFailed { student_id } => {
            revert_to_confirmed(&mut component.attendance, &component.confirmed, &student_id);
            error!("Error saving attendance for student:", student_id);
            component.save_status = Some("Error saving");
            clear_save_status_after(ctx, 3000);
            true
        }
        Msg::ClearSaveStatus => {
            if component.save_status.is_none() {
                return false;
            }
            component.save_status = None;
            true
        }
    }
}

/// Issues the two fetches for the currently selected date, bumping the
/// sequence number so any response still in flight becomes stale.
pub(super) fn start_fetch(component: &mut AttendanceMarker, ctx: &Context<AttendanceMarker>) {
    component.fetch_seq += 1;
    component.loading = true;

    let seq = component.fetch_seq;
    let date = component.selected_date.clone();
    let link = ctx.link().clone();
    spawn_local(async move {
        match fetch_day(&date).await {
            Ok((students, records)) => link.send_message(Msg::DataLoaded {
                seq,
                students,
                records,
            }),
            Err(error) => link.send_message(Msg::LoadFailed { seq, error }),
        }
    });
}

async fn fetch_day(date: &str) -> Result<(Vec<Student>, Vec<AttendanceEntry>), String> {
    let students: Vec<Student> = get_json("/api/students?order=roll_number").await?;
    let records: Vec<AttendanceEntry> =
        get_json(&format!("/api/attendance?date={}", date)).await?;
    Ok((students, records))
}

async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, String> {
    let resp = Request::get(url).send().await.map_err(|e| e.to_string())?;
    if resp.status() != 200 {
        return Err(resp.text().await.unwrap_or_default());
    }
    resp.json::<T>().await.map_err(|e| e.to_string())
}

fn clear_save_status_after(ctx: &Context<AttendanceMarker>, millis: u32) {
    let link = ctx.link().clone();
    wasm_bindgen_futures::spawn_local(async move {
        TimeoutFuture::new(millis).await;
        link.send_message(Msg::ClearSaveStatus);
    });
}

/// Restores one student's displayed status to the last store-confirmed
/// value, removing the entry when no save for them ever got through.
fn revert_to_confirmed(
    attendance: &mut HashMap<String, AttendanceStatus>,
    confirmed: &HashMap<String, AttendanceStatus>,
    student_id: &str,
) {
    match confirmed.get(student_id) {
        Some(status) => {
            attendance.insert(student_id.to_string(), *status);
        }
        None => {
            attendance.remove(student_id);
        }
    }
}
