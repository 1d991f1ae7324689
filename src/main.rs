mod app;
mod cli;
mod draw;
mod engine;
mod error;
#[cfg(feature = "hooks")]
mod hotkey;
mod jitter;
mod mouse;
mod settings;

use clap::Parser;
use eframe::egui;
use std::{
    thread,
    time::{Duration, Instant},
};
use tracing_subscriber::EnvFilter;

use crate::{
    app::AppState,
    cli::Cli,
    engine::ClickJob,
    error::AppError,
    mouse::EnigoMouse,
    settings::SettingsForm,
};

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    if cli.headless { run_headless(&cli) } else { run_window(&cli) }
}

fn setup_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .try_init();
}

fn run_window(cli: &Cli) -> Result<(), AppError> {
    let state = AppState::new(SettingsForm::from(cli.settings()), cli.jitter());

    #[cfg(feature = "hooks")]
    {
        let stop = state.stop_handle();
        hotkey::spawn_listener(move || stop.stop());
    }

    let opts = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([360.0, 260.0])
            .with_min_inner_size([300.0, 220.0])
            .with_resizable(true),
        follow_system_theme: true,
        ..Default::default()
    };
    eframe::run_native(
        "Jitter Clicker",
        opts,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Box::new(state)
        }),
    )?;
    Ok(())
}

fn run_headless(cli: &Cli) -> Result<(), AppError> {
    let settings = cli.settings().validate()?;
    let job = ClickJob::spawn(settings, cli.jitter(), mouse::desktop_bounds(), EnigoMouse);

    #[cfg(feature = "hooks")]
    {
        let flag = job.run_flag();
        hotkey::spawn_listener(move || flag.store(false, std::sync::atomic::Ordering::Relaxed));
    }

    if let Some(secs) = cli.duration {
        let deadline = Instant::now() + Duration::from_secs(secs);
        while job.is_running() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(100));
        }
        job.stop();
    }
    job.join();
    Ok(())
}
