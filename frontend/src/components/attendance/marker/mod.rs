//! Attendance marker: root module wiring the Yew `Component` implementation
//! with submodules for state, update logic and view rendering.
//!
//! For the selected date (defaulting to today, never in the future) it loads
//! the roster in roll-number order plus that day's attendance rows, and lets
//! the user cycle each student between present/absent/late. Every click is
//! applied to the local mapping first and then upserted, so the UI reflects
//! the choice before the round-trip completes; a failed save reverts the
//! entry to its last confirmed value.

mod messages;
mod state;
mod update;
mod view;

use yew::prelude::*;

pub use messages::Msg;
pub use state::AttendanceMarker;

impl Component for AttendanceMarker {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        AttendanceMarker::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.loaded {
            self.loaded = true;
            update::start_fetch(self, ctx);
        }
    }
}
