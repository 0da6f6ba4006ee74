//! View rendering for the attendance marker: a date picker capped at today,
//! one row per student with three mutually exclusive status buttons, and a
//! transient save indicator.

use web_sys::{Event, HtmlInputElement};
use yew::html::Scope;
use yew::prelude::*;

use common::model::attendance::AttendanceStatus;

use super::messages::Msg;
use super::state::AttendanceMarker;
use crate::helpers::today;

pub fn view(component: &AttendanceMarker, ctx: &Context<AttendanceMarker>) -> Html {
    let link = ctx.link();

    if component.loading {
        return html! {
            <div class="card"><div class="placeholder">{"Loading..."}</div></div>
        };
    }

    html! {
        <div class="card">
            <div class="card-header">
                <h2>{"Mark Attendance"}</h2>
                {
                    if let Some(status) = component.save_status {
                        html! { <span class="save-status">{ status }</span> }
                    } else {
                        html! {}
                    }
                }
            </div>

            <div class="form-field">
                <label for="date">{"Select Date"}</label>
                <input
                    id="date"
                    type="date"
                    value={component.selected_date.clone()}
                    max={today()}
                    onchange={link.callback(|e: Event| {
                        Msg::SetDate(e.target_unchecked_into::<HtmlInputElement>().value())
                    })}
                />
            </div>

            {
                if component.students.is_empty() {
                    html! {
                        <p class="placeholder">{"No students found. Please add students first."}</p>
                    }
                } else {
                    component.students.iter().map(|student| {
                        let current = component.attendance.get(&student.id).copied();
                        html! {
                            <div class="marker-row" key={student.id.clone()}>
                                <div>
                                    <div class="emph">{ &student.name }</div>
                                    <div class="muted">
                                        { format!("{} \u{2022} {}", student.roll_number, student.grade) }
                                    </div>
                                </div>
                                <div class="status-buttons">
                                    { status_button(link, &student.id, AttendanceStatus::Present, "Present", current) }
                                    { status_button(link, &student.id, AttendanceStatus::Absent, "Absent", current) }
                                    { status_button(link, &student.id, AttendanceStatus::Late, "Late", current) }
                                </div>
                            </div>
                        }
                    }).collect::<Html>()
                }
            }
        </div>
    }
}

/// One of the three mutually exclusive status controls. The button matching
/// the student's current mapped status gets a highlighted variant class.
fn status_button(
    link: &Scope<AttendanceMarker>,
    student_id: &str,
    status: AttendanceStatus,
    label: &'static str,
    current: Option<AttendanceStatus>,
) -> Html {
    let selected = current == Some(status);
    let variant = selected.then(|| match status {
        AttendanceStatus::Present => "selected-present",
        AttendanceStatus::Absent => "selected-absent",
        AttendanceStatus::Late => "selected-late",
    });
    let student_id = student_id.to_string();

    html! {
        <button
            class={classes!("status-btn", variant)}
            onclick={link.callback(move |_| Msg::Mark {
                student_id: student_id.clone(),
                status,
            })}
        >
            { label }
        </button>
    }
}
