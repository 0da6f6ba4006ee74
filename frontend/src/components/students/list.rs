//! Registry list: shows the roster newest-first and offers per-row deletion.
//!
//! Fetches on mount and again whenever the parent's refresh signal changes.
//! Deletion asks for confirmation (the student's attendance goes with them),
//! alerts on failure and re-fetches on success.

use common::model::student::Student;
use gloo_net::http::Request;
use yew::html::Scope;
use yew::platform::spawn_local;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct StudentListProps {
    /// Refresh signal: any change triggers a re-fetch.
    pub refresh_trigger: u32,
}

pub enum Msg {
    StudentsLoaded(Vec<Student>),
    LoadFailed(String),
    Delete(String),
    Deleted,
    DeleteFailed(String),
}

pub struct StudentList {
    students: Vec<Student>,
    loading: bool,
    error: Option<String>,
}

fn fetch_students(link: Scope<StudentList>) {
    spawn_local(async move {
        match Request::get("/api/students?order=created_at").send().await {
            Ok(resp) if resp.status() == 200 => match resp.json::<Vec<Student>>().await {
                Ok(students) => link.send_message(Msg::StudentsLoaded(students)),
                Err(err) => link.send_message(Msg::LoadFailed(err.to_string())),
            },
            Ok(resp) => {
                let body = resp.text().await.unwrap_or_default();
                let message = if body.is_empty() {
                    "Failed to fetch students".to_string()
                } else {
                    body
                };
                link.send_message(Msg::LoadFailed(message));
            }
            Err(err) => link.send_message(Msg::LoadFailed(err.to_string())),
        }
    });
}

impl Component for StudentList {
    type Message = Msg;
    type Properties = StudentListProps;

    fn create(_ctx: &Context<Self>) -> Self {
        StudentList {
            students: Vec::new(),
            loading: true,
            error: None,
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render {
            fetch_students(ctx.link().clone());
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().refresh_trigger != old_props.refresh_trigger {
            self.loading = true;
            fetch_students(ctx.link().clone());
        }
        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::StudentsLoaded(students) => {
                self.students = students;
                self.loading = false;
                self.error = None;
                true
            }
            Msg::LoadFailed(message) => {
                self.loading = false;
                self.error = Some(message);
                true
            }
            Msg::Delete(id) => {
                let confirmed = web_sys::window()
                    .and_then(|w| {
                        w.confirm_with_message(
                            "Are you sure you want to delete this student? \
                             This will also delete all their attendance records.",
                        )
                        .ok()
                    })
                    .unwrap_or(false);
                if !confirmed {
                    return false;
                }

                let link = ctx.link().clone();
                spawn_local(async move {
                    match Request::delete(&format!("/api/students/{}", id)).send().await {
                        Ok(resp) if resp.status() == 200 => link.send_message(Msg::Deleted),
                        Ok(resp) => {
                            let body = resp.text().await.unwrap_or_default();
                            let message = if body.is_empty() {
                                "Failed to delete student".to_string()
                            } else {
                                body
                            };
                            link.send_message(Msg::DeleteFailed(message));
                        }
                        Err(err) => link.send_message(Msg::DeleteFailed(err.to_string())),
                    }
                });
                false
            }
            Msg::Deleted => {
                self.loading = true;
                fetch_students(ctx.link().clone());
                true
            }
            Msg::DeleteFailed(message) => {
                // The list stays as-is; the failure is reported and nothing else.
                if let Some(window) = web_sys::window() {
                    let _ = window.alert_with_message(&message);
                }
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        if self.loading {
            return html! {
                <div class="card"><div class="placeholder">{"Loading students..."}</div></div>
            };
        }
        if let Some(error) = &self.error {
            return html! {
                <div class="card"><div class="placeholder error">{ error }</div></div>
            };
        }

        let link = ctx.link();
        html! {
            <div class="card">
                <h2>{ format!("Students ({})", self.students.len()) }</h2>
                {
                    if self.students.is_empty() {
                        html! {
                            <p class="placeholder">{"No students found. Add your first student above."}</p>
                        }
                    } else {
                        html! {
                            <table class="data-table">
                                <thead>
                                    <tr>
                                        <th>{"Roll No."}</th>
                                        <th>{"Name"}</th>
                                        <th>{"Grade"}</th>
                                        <th>{"Email"}</th>
                                        <th>{"Actions"}</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {
                                        self.students.iter().map(|student| {
                                            let id = student.id.clone();
                                            html! {
                                                <tr key={student.id.clone()}>
                                                    <td>{ &student.roll_number }</td>
                                                    <td class="emph">{ &student.name }</td>
                                                    <td>{ &student.grade }</td>
                                                    <td>{ student.email.as_deref().unwrap_or("-") }</td>
                                                    <td>
                                                        <button
                                                            class="delete-btn"
                                                            title="Delete student"
                                                            onclick={link.callback(move |_| Msg::Delete(id.clone()))}
                                                        >
                                                            {"Delete"}
                                                        </button>
                                                    </td>
                                                </tr>
                                            }
                                        }).collect::<Html>()
                                    }
                                </tbody>
                            </table>
                        }
                    }
                }
            </div>
        }
    }
}
