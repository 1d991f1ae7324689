use eframe::egui;
use parking_lot::Mutex;
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use crate::{
    engine::ClickJob,
    jitter::Bounds,
    mouse::{self, EnigoMouse, MouseBackend},
    settings::{JitterSettings, SettingsError, SettingsForm},
};

const CURSOR_REFRESH: Duration = Duration::from_millis(60);

/// Stops whichever job is active, from any thread. Works without the UI
/// redrawing, so a minimized window still honors the stop key.
#[derive(Clone, Default)]
pub struct StopHandle {
    active: Arc<Mutex<Option<Arc<AtomicBool>>>>,
}

impl StopHandle {
    fn arm(&self, run_flag: Arc<AtomicBool>) {
        *self.active.lock() = Some(run_flag);
    }

    pub fn stop(&self) {
        if let Some(flag) = self.active.lock().take() {
            flag.store(false, Ordering::Relaxed);
        }
    }
}

// -------------- UI State --------------
pub struct AppState {
    form: SettingsForm,
    jitter: JitterSettings,
    job: Option<ClickJob>,
    error: Option<SettingsError>,
    cursor: (i32, i32),
    stopper: StopHandle,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SettingsForm::default(), JitterSettings::default())
    }
}

impl AppState {
    pub fn new(form: SettingsForm, jitter: JitterSettings) -> Self {
        Self {
            form,
            jitter,
            job: None,
            error: None,
            cursor: (0, 0),
            stopper: StopHandle::default(),
        }
    }

    #[cfg(feature = "hooks")]
    pub fn stop_handle(&self) -> StopHandle {
        self.stopper.clone()
    }

    fn start(&mut self) {
        self.start_with(EnigoMouse, mouse::desktop_bounds());
    }

    /// Validates the form and, if no run is active, spawns one.
    fn start_with<M: MouseBackend>(&mut self, mouse: M, desktop: Option<Bounds>) {
        match self.form.parse() {
            Ok(settings) => {
                if self.job.is_none() {
                    let job = ClickJob::spawn(settings, self.jitter, desktop, mouse);
                    self.stopper.arm(job.run_flag());
                    self.job = Some(job);
                }
            }
            Err(e) => {
                tracing::debug!("rejected settings: {e}");
                self.error = Some(e);
            }
        }
    }

    fn stop(&mut self) {
        self.stopper.stop();
        if let Some(job) = self.job.take() { job.stop(); }
    }

    fn is_running(&self) -> bool {
        self.job.is_some()
    }

    fn clicks(&self) -> u64 {
        self.job.as_ref().map_or(0, ClickJob::clicks)
    }

    // Picks up stops that didn't come from the Stop button.
    fn poll_external_stop(&mut self) {
        if self.job.as_ref().is_some_and(|job| !job.is_running()) {
            self.stop();
        }
    }

    fn error_dialog(&mut self, ctx: &egui::Context) {
        let Some(err) = self.error else { return };
        let mut dismissed = false;
        egui::Window::new(err.caption())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(err.to_string());
                if ui.button("OK").clicked() { dismissed = true; }
            });
        if dismissed { self.error = None; }
    }
}

impl eframe::App for AppState {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_external_stop();
        self.cursor = EnigoMouse.location();

        egui::CentralPanel::default().show(ctx, |ui| {
            let editable = !self.is_running() && self.error.is_none();
            ui.add_enabled_ui(editable, |ui| {
                egui::Grid::new("settings").num_columns(2).show(ui, |ui| {
                    ui.label("Min wait (ms)");
                    ui.text_edit_singleline(&mut self.form.min_wait);
                    ui.end_row();
                    ui.label("Max wait (ms)");
                    ui.text_edit_singleline(&mut self.form.max_wait);
                    ui.end_row();
                    ui.label("Min clicks between movement");
                    ui.text_edit_singleline(&mut self.form.min_clicks);
                    ui.end_row();
                    ui.label("Max clicks between movement");
                    ui.text_edit_singleline(&mut self.form.max_clicks);
                    ui.end_row();
                });
            });

            ui.separator();
            ui.horizontal(|ui| {
                if ui.add_enabled(editable, egui::Button::new("Start")).clicked() { self.start(); }
                if ui.button("Stop").clicked() { self.stop(); }
            });

            ui.separator();
            ui.label(format!("Mouse X Position: {}", self.cursor.0));
            ui.label(format!("Mouse Y position: {}", self.cursor.1));
            ui.label(format!("{} Total Mouse Clicks", self.clicks()));
        });

        self.error_dialog(ctx);
        ctx.request_repaint_after(CURSOR_REFRESH);
    }
}

impl Drop for AppState {
    fn drop(&mut self) { self.stop(); }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy)]
    struct IdleMouse;

    impl MouseBackend for IdleMouse {
        fn location(&self) -> (i32, i32) { (0, 0) }
        fn move_to(&mut self, _x: i32, _y: i32) {}
        fn left_click(&mut self) {}
    }

    #[test]
    fn test_app_state_defaults() {
        let state = AppState::default();
        assert!(state.job.is_none());
        assert!(state.error.is_none());
        assert_eq!(state.form.min_wait, "1600");
        assert_eq!(state.form.max_wait, "2600");
        assert_eq!(state.form.min_clicks, "1");
        assert_eq!(state.form.max_clicks, "30");
        assert_eq!(state.clicks(), 0);
    }

    #[test]
    fn test_start_and_stop() {
        let mut state = AppState::default();
        state.start_with(IdleMouse, None);
        assert!(state.is_running());
        assert!(state.error.is_none());

        state.stop();
        assert!(!state.is_running());
        assert_eq!(state.clicks(), 0);
    }

    #[test]
    fn test_second_start_keeps_single_job() {
        let mut state = AppState::default();
        state.start_with(IdleMouse, None);
        let flag = state.job.as_ref().map(ClickJob::run_flag).unwrap();
        state.start_with(IdleMouse, None);
        let again = state.job.as_ref().map(ClickJob::run_flag).unwrap();
        assert!(Arc::ptr_eq(&flag, &again));
        state.stop();
        assert!(!flag.load(Ordering::Relaxed));
    }

    #[test]
    fn test_invalid_form_shows_error() {
        let mut state = AppState::default();
        state.form.max_clicks = "abc".into();
        state.start_with(IdleMouse, None);
        assert!(!state.is_running());
        assert_eq!(state.error, Some(SettingsError::NotAnInteger));

        state.error = None;
        state.form.max_clicks = "0".into();
        state.start_with(IdleMouse, None);
        assert!(!state.is_running());
        assert_eq!(state.error, Some(SettingsError::MaxBelowMin));
    }

    #[test]
    fn test_cleared_run_flag_resets_state() {
        let mut state = AppState::default();
        state.start_with(IdleMouse, None);
        if let Some(job) = &state.job { job.stop(); }
        state.poll_external_stop();
        assert!(!state.is_running());
    }

    #[test]
    fn test_stop_handle_clears_flag_without_redraw() {
        let mut state = AppState::default();
        let handle = state.stopper.clone();
        state.start_with(IdleMouse, None);
        let flag = state.job.as_ref().map(ClickJob::run_flag).unwrap();

        handle.stop();
        assert!(!flag.load(Ordering::Relaxed));
        // the UI catches up whenever it next draws
        assert!(state.is_running());
        state.poll_external_stop();
        assert!(!state.is_running());
    }

    #[test]
    fn test_stop_handle_follows_restarts() {
        let mut state = AppState::default();
        let handle = state.stopper.clone();
        state.start_with(IdleMouse, None);
        state.stop();

        state.start_with(IdleMouse, None);
        let flag = state.job.as_ref().map(ClickJob::run_flag).unwrap();
        assert!(flag.load(Ordering::Relaxed));
        handle.stop();
        assert!(!flag.load(Ordering::Relaxed));
        // a second press with nothing running is harmless
        handle.stop();
    }

    #[cfg(feature = "hooks")]
    #[test]
    fn test_hotkey_handle_stops_active_job() {
        let mut state = AppState::default();
        let on_stop = {
            let handle = state.stop_handle();
            move || handle.stop()
        };
        state.start_with(IdleMouse, None);
        let flag = state.job.as_ref().map(ClickJob::run_flag).unwrap();

        on_stop();
        assert!(!flag.load(Ordering::Relaxed));
    }
}
