use display_info::DisplayInfo;
use enigo::{self, MouseButton, MouseControllable};
use once_cell::sync::Lazy;
use parking_lot::Mutex;

use crate::jitter::Bounds;

/// The two OS calls the clicker needs, plus reading the cursor back.
pub trait MouseBackend: Send + 'static {
    fn location(&self) -> (i32, i32);
    fn move_to(&mut self, x: i32, y: i32);
    /// Left down/up at wherever the cursor currently is.
    fn left_click(&mut self);
}

static ENIGO: Lazy<Mutex<enigo::Enigo>> = Lazy::new(|| Mutex::new(enigo::Enigo::new()));

/// Real input through the shared enigo handle.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnigoMouse;

impl MouseBackend for EnigoMouse {
    fn location(&self) -> (i32, i32) {
        ENIGO.lock().mouse_location()
    }

    fn move_to(&mut self, x: i32, y: i32) {
        ENIGO.lock().mouse_move_to(x, y);
    }

    fn left_click(&mut self) {
        ENIGO.lock().mouse_click(MouseButton::Left);
    }
}

/// Union of every attached display, or `None` when they can't be listed.
pub fn desktop_bounds() -> Option<Bounds> {
    let displays = match DisplayInfo::all() {
        Ok(displays) => displays,
        Err(e) => {
            tracing::warn!("could not enumerate displays: {e}");
            return None;
        }
    };
    union(displays.iter().map(|d| Bounds {
        min_x: d.x,
        max_x: d.x + d.width as i32,
        min_y: d.y,
        max_y: d.y + d.height as i32,
    }))
}

fn union(rects: impl Iterator<Item = Bounds>) -> Option<Bounds> {
    rects.filter(Bounds::is_valid).reduce(|a, b| Bounds {
        min_x: a.min_x.min(b.min_x),
        max_x: a.max_x.max(b.max_x),
        min_y: a.min_y.min(b.min_y),
        max_y: a.max_y.max(b.max_y),
    })
}
