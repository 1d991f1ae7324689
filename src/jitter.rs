//! Keeps the cursor wandering around a center point so clicks don't all
//! land on the same pixel.

use rand::Rng;

use crate::draw::draw_below;

/// Rectangle in screen coordinates, max edges exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds { pub min_x: i32, pub max_x: i32, pub min_y: i32, pub max_y: i32 }

impl Bounds {
    pub fn width(&self) -> i32 { self.max_x - self.min_x }
    pub fn height(&self) -> i32 { self.max_y - self.min_y }
    pub fn is_valid(&self) -> bool { self.width() > 0 && self.height() > 0 }

    pub fn clamp(&self, (x, y): (i32, i32)) -> (i32, i32) {
        if !self.is_valid() { return (x, y); }
        (x.clamp(self.min_x, self.max_x - 1), y.clamp(self.min_y, self.max_y - 1))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CursorAnchor {
    center: (i32, i32),
    radius: i32,
}

impl CursorAnchor {
    pub fn new(center: (i32, i32), radius: i32) -> Self {
        Self { center, radius }
    }

    pub fn center(&self) -> (i32, i32) { self.center }

    /// Re-centers on `pos` if the user dragged the cursor out of range.
    /// Returns whether the center moved.
    pub fn follow(&mut self, pos: (i32, i32)) -> bool {
        let strayed = (pos.0 - self.center.0).abs() > self.radius
            || (pos.1 - self.center.1).abs() > self.radius;
        if strayed {
            self.center = pos;
        }
        strayed
    }

    pub fn next_target<R: Rng + ?Sized>(&self, rng: &mut R) -> (i32, i32) {
        (self.center.0 + self.offset(rng), self.center.1 + self.offset(rng))
    }

    // magnitude in [1, radius), random sign
    fn offset<R: Rng + ?Sized>(&self, rng: &mut R) -> i32 {
        let magnitude = draw_below(rng, 1, self.radius);
        if rng.gen_bool(0.5) { magnitude } else { -magnitude }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_bounds_validation() {
        let valid = Bounds { min_x: 0, max_x: 1920, min_y: 0, max_y: 1080 };
        assert!(valid.is_valid());
        assert_eq!(valid.width(), 1920);
        assert_eq!(valid.height(), 1080);

        let invalid = Bounds { min_x: 200, max_x: 100, min_y: 200, max_y: 100 };
        assert!(!invalid.is_valid());
    }

    #[test]
    fn test_bounds_clamp() {
        let b = Bounds { min_x: -1280, max_x: 1920, min_y: 0, max_y: 1080 };
        assert_eq!(b.clamp((1921, -3)), (1919, 0));
        assert_eq!(b.clamp((-2000, 1080)), (-1280, 1079));
        assert_eq!(b.clamp((10, 10)), (10, 10));
    }

    #[test]
    fn test_targets_stay_within_radius() {
        let mut rng = StdRng::seed_from_u64(42);
        let anchor = CursorAnchor::new((500, 300), 3);
        let mut saw_negative = false;
        let mut saw_positive = false;
        for _ in 0..500 {
            let (x, y) = anchor.next_target(&mut rng);
            let (dx, dy) = (x - 500, y - 300);
            assert!((1..3).contains(&dx.abs()), "dx = {dx}");
            assert!((1..3).contains(&dy.abs()), "dy = {dy}");
            saw_negative |= dx < 0;
            saw_positive |= dx > 0;
        }
        assert!(saw_negative && saw_positive);
    }

    #[test]
    fn test_small_radius_still_moves_one_pixel() {
        let mut rng = StdRng::seed_from_u64(3);
        let anchor = CursorAnchor::new((10, 10), 1);
        for _ in 0..50 {
            let (x, y) = anchor.next_target(&mut rng);
            assert_eq!((x - 10).abs(), 1);
            assert_eq!((y - 10).abs(), 1);
        }
    }

    #[test]
    fn test_follow_ignores_own_jitter() {
        let mut anchor = CursorAnchor::new((100, 100), 3);
        assert!(!anchor.follow((102, 97)));
        assert!(!anchor.follow((103, 103)));
        assert_eq!(anchor.center(), (100, 100));
    }

    #[test]
    fn test_follow_recenters_after_user_move() {
        let mut anchor = CursorAnchor::new((100, 100), 3);
        assert!(anchor.follow((100, 104)));
        assert_eq!(anchor.center(), (100, 104));
        assert!(anchor.follow((50, 104)));
        assert_eq!(anchor.center(), (50, 104));
    }
}
