//! The click loop: a burst of clicks, a cursor nudge, repeat until stopped.

use std::{
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc,
    },
    thread,
    time::Duration,
};

use rand::Rng;
use tracing::{debug, info, trace};

use crate::{
    draw::draw_below,
    jitter::{Bounds, CursorAnchor},
    mouse::MouseBackend,
    settings::{ClickSettings, JitterSettings},
};

const SLEEP_SLICE_MS: u64 = 50;

pub struct ClickJob {
    running: Arc<AtomicBool>,
    clicks: Arc<AtomicU64>,
    handle: Option<thread::JoinHandle<()>>,
}

impl ClickJob {
    /// Starts the worker thread. The anchor is seeded from the cursor's
    /// position at this moment.
    pub fn spawn<M: MouseBackend>(
        settings: ClickSettings,
        jitter: JitterSettings,
        desktop: Option<Bounds>,
        mouse: M,
    ) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let clicks = Arc::new(AtomicU64::new(0));
        let anchor = CursorAnchor::new(mouse.location(), jitter.radius);

        info!(?settings, center = ?anchor.center(), "starting click job");

        let worker = Worker {
            running: Arc::clone(&running),
            clicks: Arc::clone(&clicks),
            settings,
            jitter,
            desktop,
            anchor,
            mouse,
        };
        let handle = thread::spawn(move || worker.run(&mut rand::thread_rng()));

        Self { running, clicks, handle: Some(handle) }
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::Relaxed);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Clicks performed since this job started.
    pub fn clicks(&self) -> u64 {
        self.clicks.load(Ordering::Relaxed)
    }

    /// Shared run flag, for stopping the job from another thread.
    pub fn run_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    /// Blocks until the worker thread has exited.
    pub fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!("click worker panicked");
            }
        }
    }
}

struct Worker<M> {
    running: Arc<AtomicBool>,
    clicks: Arc<AtomicU64>,
    settings: ClickSettings,
    jitter: JitterSettings,
    desktop: Option<Bounds>,
    anchor: CursorAnchor,
    mouse: M,
}

impl<M: MouseBackend> Worker<M> {
    fn run<R: Rng + ?Sized>(mut self, rng: &mut R) {
        while self.is_running() {
            self.burst(rng);
            if !self.is_running() { break; }
            self.nudge(rng);
            self.pause(self.jitter.settle_ms);
        }
        info!(clicks = self.clicks.load(Ordering::Relaxed), "click job stopped");
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    fn burst<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let s = self.settings;
        let threshold = draw_below(rng, s.min_clicks, s.max_clicks);
        debug!(threshold, "click burst");

        let mut counter = 0;
        while counter < threshold && self.is_running() {
            let delay = draw_below(rng, s.min_wait_ms, s.max_wait_ms);
            self.mouse.left_click();
            self.clicks.fetch_add(1, Ordering::Relaxed);
            if !self.pause(delay) { break; }
            counter += 1;
        }
    }

    fn nudge<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.anchor.follow(self.mouse.location()) {
            debug!(center = ?self.anchor.center(), "cursor moved by user, re-centering");
        }
        let mut target = self.anchor.next_target(rng);
        if let Some(desktop) = self.desktop {
            target = desktop.clamp(target);
        }
        trace!(?target, "nudging cursor");
        self.mouse.move_to(target.0, target.1);

        let dwell = draw_below(rng, self.jitter.dwell_min_ms, self.jitter.dwell_max_ms);
        self.pause(dwell);
    }

    /// Sleeps in short slices. Returns false if the job was stopped meanwhile.
    fn pause(&self, ms: u64) -> bool {
        let mut left = ms;
        while left > 0 {
            if !self.is_running() { return false; }
            let slice = left.min(SLEEP_SLICE_MS);
            thread::sleep(Duration::from_millis(slice));
            left -= slice;
        }
        self.is_running()
    }
}
