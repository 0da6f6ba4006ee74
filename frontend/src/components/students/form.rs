//! Registry form: creates one student per submission.
//!
//! Required fields rely on browser-level `required` gating; the optional
//! email is coerced to absent when left blank. While a request is in flight
//! the submit button is disabled and relabeled. On failure the store's error
//! text is shown inline and the fields stay populated for correction; on
//! success the fields clear and the parent is signaled to refresh the list.

use common::requests::NewStudent;
use gloo_net::http::Request;
use web_sys::{HtmlInputElement, InputEvent, SubmitEvent};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::helpers::blank_to_none;

#[derive(Properties, PartialEq, Clone)]
pub struct StudentFormProps {
    /// Emitted after a successful creation so the parent can bump the
    /// refresh signal the student list watches.
    pub on_student_added: Callback<()>,
}

pub enum Msg {
    UpdateName(String),
    UpdateRollNumber(String),
    UpdateGrade(String),
    UpdateEmail(String),
    Submit,
    SubmitSucceeded,
    SubmitFailed(String),
}

pub struct StudentForm {
    name: String,
    roll_number: String,
    grade: String,
    email: String,
    loading: bool,
    error: Option<String>,
}

impl Component for StudentForm {
    type Message = Msg;
    type Properties = StudentFormProps;

    fn create(_ctx: &Context<Self>) -> Self {
        StudentForm {
            name: String::new(),
            roll_number: String::new(),
            grade: String::new(),
            email: String::new(),
            loading: false,
            error: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::UpdateName(v) => {
                self.name = v;
                false
            }
            Msg::UpdateRollNumber(v) => {
                self.roll_number = v;
                false
            }
            Msg::UpdateGrade(v) => {
                self.grade = v;
                false
            }
            Msg::UpdateEmail(v) => {
                self.email = v;
                false
            }
            Msg::Submit => {
                if self.loading {
                    return false;
                }
                self.loading = true;
                self.error = None;

                let payload = NewStudent {
                    name: self.name.clone(),
                    roll_number: self.roll_number.clone(),
                    grade: self.grade.clone(),
                    email: blank_to_none(&self.email),
                };
                let link = ctx.link().clone();
                spawn_local(async move {
                    match Request::post("/api/students")
                        .json(&payload)
                        .unwrap()
                        .send()
                        .await
                    {
                        Ok(resp) if resp.status() == 200 => {
                            link.send_message(Msg::SubmitSucceeded);
                        }
                        Ok(resp) => {
                            let body = resp.text().await.unwrap_or_default();
                            let message = if body.is_empty() {
                                "Failed to add student".to_string()
                            } else {
                                body
                            };
                            link.send_message(Msg::SubmitFailed(message));
                        }
                        Err(err) => link.send_message(Msg::SubmitFailed(err.to_string())),
                    }
                });
                true
            }
            Msg::SubmitSucceeded => {
                self.loading = false;
                self.name.clear();
                self.roll_number.clear();
                self.grade.clear();
                self.email.clear();
                ctx.props().on_student_added.emit(());
                true
            }
            Msg::SubmitFailed(message) => {
                self.loading = false;
                self.error = Some(message);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let make_oninput = |to_msg: fn(String) -> Msg| {
            link.callback(move |e: InputEvent| {
                to_msg(e.target_unchecked_into::<HtmlInputElement>().value())
            })
        };

        html! {
            <div class="card">
                <h2>{"Add New Student"}</h2>

                <form onsubmit={link.callback(|e: SubmitEvent| {
                    e.prevent_default();
                    Msg::Submit
                })}>
                    <div class="form-field">
                        <label for="name">{"Full Name *"}</label>
                        <input
                            id="name"
                            type="text"
                            value={self.name.clone()}
                            oninput={make_oninput(Msg::UpdateName)}
                            required=true
                            placeholder="Enter student name"
                        />
                    </div>

                    <div class="form-row">
                        <div class="form-field">
                            <label for="roll-number">{"Roll Number *"}</label>
                            <input
                                id="roll-number"
                                type="text"
                                value={self.roll_number.clone()}
                                oninput={make_oninput(Msg::UpdateRollNumber)}
                                required=true
                                placeholder="e.g., 2024001"
                            />
                        </div>
                        <div class="form-field">
                            <label for="grade">{"Grade/Class *"}</label>
                            <input
                                id="grade"
                                type="text"
                                value={self.grade.clone()}
                                oninput={make_oninput(Msg::UpdateGrade)}
                                required=true
                                placeholder="e.g., 10A"
                            />
                        </div>
                    </div>

                    <div class="form-field">
                        <label for="email">{"Email (Optional)"}</label>
                        <input
                            id="email"
                            type="email"
                            value={self.email.clone()}
                            oninput={make_oninput(Msg::UpdateEmail)}
                            placeholder="student@example.com"
                        />
                    </div>

                    {
                        if let Some(error) = &self.error {
                            html! { <div class="form-error">{ error }</div> }
                        } else {
                            html! {}
                        }
                    }

                    <button type="submit" class="submit-btn" disabled={self.loading}>
                        { if self.loading { "Adding..." } else { "Add Student" } }
                    </button>
                </form>
            </div>
        }
    }
}
