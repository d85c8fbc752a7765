use std::time::Duration;

use chrono::Utc;
use userreg_business::users::{FetchUsersCommand, FetchUsersCompute, ModalState};
use userreg_states::Time;

use crate::{state::State, widgets};

/// Repaint cadence while a request is in flight or a notice is shown.
const BUSY_REPAINT: Duration = Duration::from_millis(100);

pub struct UserRegApp {
    state: State,
    fetch_started: bool,
}

impl UserRegApp {
    /// Called once before the first frame.
    pub fn new(state: State) -> Self {
        Self {
            state,
            fetch_started: false,
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }

    fn is_busy(&mut self) -> bool {
        let ctx = &mut self.state.ctx;
        let now = ctx.state::<Time>().now();
        let notice_shown = ctx.state::<ModalState>().visible_notice(now).is_some();
        let loading = ctx
            .cached::<FetchUsersCompute>()
            .is_some_and(FetchUsersCompute::is_loading);

        notice_shown || loading || ctx.pending_tasks() > 0
    }
}

impl eframe::App for UserRegApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.ctx.update::<Time>(|time| *time.as_mut() = Utc::now());

        // Sync Compute for render
        self.state.ctx.sync_computes();

        if !self.fetch_started {
            self.fetch_started = true;
            self.state.ctx.dispatch::<FetchUsersCommand>();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            widgets::users_panel(&mut self.state.ctx, ui);
        });

        if self.is_busy() {
            ctx.request_repaint_after(BUSY_REPAINT);
        }

        self.state.ctx.run_computed();
    }
}
