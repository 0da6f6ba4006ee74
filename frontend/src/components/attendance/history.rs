//! Attendance history: browses all recorded attendance, newest date first,
//! filterable by date and/or student. Each filter adds an equality predicate
//! on the backend query; both combine with AND. Fetches carry a sequence
//! number so a slow response for an old filter cannot overwrite the data of
//! a newer one.

use gloo_net::http::Request;
use web_sys::{Event, HtmlInputElement, HtmlSelectElement};
use yew::platform::spawn_local;
use yew::prelude::*;

use common::model::attendance::AttendanceEntry;
use common::model::student::Student;

use crate::helpers::format_date;

pub enum Msg {
    StudentsLoaded(Vec<Student>),
    SetDateFilter(String),
    SetStudentFilter(String),
    ClearFilters,
    RecordsLoaded { seq: u32, records: Vec<AttendanceEntry> },
    LoadFailed { seq: u32, error: String },
}

pub struct AttendanceHistory {
    records: Vec<AttendanceEntry>,
    /// Roster in name order, for the filter dropdown.
    students: Vec<Student>,
    filter_date: String,
    filter_student: String,
    loading: bool,
    error: Option<String>,
    fetch_seq: u32,
    loaded: bool,
}

impl AttendanceHistory {
    fn fetch_records(&mut self, ctx: &Context<Self>) {
        self.fetch_seq += 1;
        self.loading = true;

        let seq = self.fetch_seq;
        let mut query: Vec<String> = Vec::new();
        if !self.filter_date.is_empty() {
            query.push(format!("date={}", self.filter_date));
        }
        if !self.filter_student.is_empty() {
            query.push(format!("student_id={}", self.filter_student));
        }
        let url = if query.is_empty() {
            "/api/attendance".to_string()
        } else {
            format!("/api/attendance?{}", query.join("&"))
        };

        let link = ctx.link().clone();
        spawn_local(async move {
            let outcome = match Request::get(&url).send().await {
                Ok(resp) if resp.status() == 200 => resp
                    .json::<Vec<AttendanceEntry>>()
                    .await
                    .map_err(|e| e.to_string()),
                Ok(resp) => Err(resp.text().await.unwrap_or_default()),
                Err(err) => Err(err.to_string()),
            };
            match outcome {
                Ok(records) => link.send_message(Msg::RecordsLoaded { seq, records }),
                Err(error) => link.send_message(Msg::LoadFailed { seq, error }),
            }
        });
    }

    fn fetch_students(ctx: &Context<Self>) {
        let link = ctx.link().clone();
        spawn_local(async move {
            if let Ok(resp) = Request::get("/api/students?order=name").send().await {
                if let Ok(students) = resp.json::<Vec<Student>>().await {
                    link.send_message(Msg::StudentsLoaded(students));
                }
            }
        });
    }

    fn has_active_filter(&self) -> bool {
        !self.filter_date.is_empty() || !self.filter_student.is_empty()
    }
}

impl Component for AttendanceHistory {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        AttendanceHistory {
            records: Vec::new(),
            students: Vec::new(),
            filter_date: String::new(),
            filter_student: String::new(),
            loading: true,
            error: None,
            fetch_seq: 0,
            loaded: false,
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.loaded {
            self.loaded = true;
            Self::fetch_students(ctx);
            self.fetch_records(ctx);
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::StudentsLoaded(students) => {
                self.students = students;
                true
            }
            Msg::SetDateFilter(date) => {
                self.filter_date = date;
                self.fetch_records(ctx);
                true
            }
            Msg::SetStudentFilter(student_id) => {
                self.filter_student = student_id;
                self.fetch_records(ctx);
                true
            }
            Msg::ClearFilters => {
                self.filter_date.clear();
                self.filter_student.clear();
                self.fetch_records(ctx);
                true
            }
            Msg::RecordsLoaded { seq, records } => {
                if seq != self.fetch_seq {
                    return false;
                }
                self.loading = false;
                self.error = None;
                self.records = records;
                true
            }
            Msg::LoadFailed { seq, error } => {
                if seq != self.fetch_seq {
                    return false;
                }
                self.loading = false;
                gloo_console::error!("Error fetching attendance:", error.clone());
                self.error = Some(error);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();

        html! {
            <div class="card">
                <h2>{"Attendance History"}</h2>

                <div class="filter-row">
                    <div class="form-field">
                        <label for="filter-date">{"Filter by Date"}</label>
                        <input
                            id="filter-date"
                            type="date"
                            value={self.filter_date.clone()}
                            onchange={link.callback(|e: Event| {
                                Msg::SetDateFilter(e.target_unchecked_into::<HtmlInputElement>().value())
                            })}
                        />
                    </div>

                    <div class="form-field">
                        <label for="filter-student">{"Filter by Student"}</label>
                        <select
                            id="filter-student"
                            onchange={link.callback(|e: Event| {
                                Msg::SetStudentFilter(e.target_unchecked_into::<HtmlSelectElement>().value())
                            })}
                        >
                            <option value="" selected={self.filter_student.is_empty()}>
                                {"All Students"}
                            </option>
                            {
                                self.students.iter().map(|student| {
                                    html! {
                                        <option
                                            value={student.id.clone()}
                                            selected={student.id == self.filter_student}
                                        >
                                            { format!("{} ({})", student.name, student.roll_number) }
                                        </option>
                                    }
                                }).collect::<Html>()
                            }
                        </select>
                    </div>

                    {
                        if self.has_active_filter() {
                            html! {
                                <button class="clear-filters" onclick={link.callback(|_| Msg::ClearFilters)}>
                                    {"Clear Filters"}
                                </button>
                            }
                        } else {
                            html! {}
                        }
                    }
                </div>

                {
                    if self.loading {
                        html! { <div class="placeholder">{"Loading..."}</div> }
                    } else if let Some(error) = &self.error {
                        html! { <div class="placeholder error">{ error }</div> }
                    } else if self.records.is_empty() {
                        html! { <p class="placeholder">{"No attendance records found."}</p> }
                    } else {
                        html! {
                            <table class="data-table">
                                <thead>
                                    <tr>
                                        <th>{"Date"}</th>
                                        <th>{"Student"}</th>
                                        <th>{"Roll No."}</th>
                                        <th>{"Grade"}</th>
                                        <th>{"Status"}</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    { self.records.iter().map(entry_row).collect::<Html>() }
                                </tbody>
                            </table>
                        }
                    }
                }
            </div>
        }
    }
}

fn entry_row(entry: &AttendanceEntry) -> Html {
    let (name, roll_number, grade) = match &entry.student {
        Some(student) => (
            student.name.as_str(),
            student.roll_number.as_str(),
            student.grade.as_str(),
        ),
        None => ("Unknown", "-", "-"),
    };

    html! {
        <tr key={entry.id.clone()}>
            <td>{ format_date(&entry.date) }</td>
            <td class="emph">{ name }</td>
            <td>{ roll_number }</td>
            <td>{ grade }</td>
            <td>{ status_badge(&entry.status) }</td>
        </tr>
    }
}

/// Three fixed badge variants; anything outside the known set is shown
/// as plain text rather than treated as an error.
fn status_badge(status: &str) -> Html {
    let class = match status {
        "present" => Some("badge badge-present"),
        "absent" => Some("badge badge-absent"),
        "late" => Some("badge badge-late"),
        _ => None,
    };
    match class {
        Some(class) => {
            let label = match status {
                "present" => "Present",
                "absent" => "Absent",
                _ => "Late",
            };
            html! { <span class={class}>{ label }</span> }
        }
        None => html! { <span>{ status }</span> },
    }
}
