//! Global stop key, so a run can be ended while another window has focus.

use rdev::{listen, EventType, Key};
use std::thread;

pub const STOP_KEY: Key = Key::F8;

/// Calls `on_stop` every time the stop key is pressed, from a background thread.
pub fn spawn_listener<F>(on_stop: F)
where
    F: Fn() + Send + 'static,
{
    thread::spawn(move || {
        tracing::info!("press {:?} to stop clicking", STOP_KEY);
        let result = listen(move |event| {
            if is_stop(&event.event_type) {
                tracing::debug!("stop key pressed");
                on_stop();
            }
        });
        if let Err(e) = result {
            tracing::warn!("global hotkey unavailable: {e:?}");
        }
    });
}

fn is_stop(event: &EventType) -> bool {
    matches!(event, EventType::KeyPress(key) if *key == STOP_KEY)
}
