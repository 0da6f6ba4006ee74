use yew::{classes, html, Component, Context, Html};

use crate::components::attendance::history::AttendanceHistory;
use crate::components::attendance::marker::AttendanceMarker;
use crate::components::students::form::StudentForm;
use crate::components::students::list::StudentList;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Students,
    Attendance,
    History,
}

impl Tab {
    const ALL: [Tab; 3] = [Tab::Students, Tab::Attendance, Tab::History];

    fn label(&self) -> &'static str {
        match self {
            Tab::Students => "Students",
            Tab::Attendance => "Mark Attendance",
            Tab::History => "History",
        }
    }
}

pub enum Msg {
    SetTab(Tab),
    /// Refresh signal from the registry form: bumps a counter the student
    /// list watches so it re-fetches after a creation.
    StudentAdded,
}

pub struct App {
    active_tab: Tab,
    refresh_trigger: u32,
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        App {
            active_tab: Tab::Students,
            refresh_trigger: 0,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SetTab(tab) => {
                self.active_tab = tab;
                true
            }
            Msg::StudentAdded => {
                self.refresh_trigger += 1;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();

        html! {
            <div class="app-root">
                <header class="app-header">
                    <h1>{"Student Attendance System"}</h1>
                    <p class="subtitle">{"Track and manage student attendance efficiently"}</p>
                </header>

                <nav class="tab-bar">
                    {
                        Tab::ALL.iter().map(|tab| {
                            let tab = *tab;
                            html! {
                                <button
                                    class={classes!("tab-btn", (self.active_tab == tab).then_some("active"))}
                                    onclick={link.callback(move |_| Msg::SetTab(tab))}
                                >
                                    { tab.label() }
                                </button>
                            }
                        }).collect::<Html>()
                    }
                </nav>

                <main class="app-main">
                    {
                        match self.active_tab {
                            Tab::Students => html! {
                                <>
                                    <StudentForm on_student_added={link.callback(|_| Msg::StudentAdded)} />
                                    <StudentList refresh_trigger={self.refresh_trigger} />
                                </>
                            },
                            Tab::Attendance => html! { <AttendanceMarker /> },
                            Tab::History => html! { <AttendanceHistory /> },
                        }
                    }
                </main>
            </div>
        }
    }
}
