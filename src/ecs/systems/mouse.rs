use glam::Vec2;

use super::uniform;

/// Staged pointer position, read by every agent each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer(pub Vec2);

/// Where the pointer sits before the first move event: far enough off-surface
/// that no agent starts inside the repulsion zone.
pub const POINTER_PARKED: Vec2 = Vec2::new(-100.0, -100.0);

impl Pointer {
    pub fn parked() -> Self {
        Self(POINTER_PARKED)
    }

    /// Move the pointer. Non-finite input is dropped and the last position kept.
    pub fn set(&mut self, x: f32, y: f32) -> bool {
        if !(x.is_finite() && y.is_finite()) {
            log::debug!("Ignoring non-finite pointer position ({x}, {y})");
            return false;
        }
        self.0 = Vec2::new(x, y);
        true
    }
}

/// Heading that points an agent away from the pointer when it is inside the
/// repulsion zone, with random jitter. `None` leaves the heading alone.
///
/// An agent exactly on the pointer is still inside the zone; `atan2(0, 0)`
/// is 0 so the result stays finite.
pub fn repel(
    pos: Vec2,
    pointer: Pointer,
    radius: f32,
    jitter: f32,
    rng: &mut fastrand::Rng,
) -> Option<f32> {
    let away = pos - pointer.0;
    if away.length() >= radius {
        return None;
    }
    Some(away.y.atan2(away.x) + uniform(rng, -jitter, jitter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    /// Smallest signed difference between two angles.
    fn angle_diff(a: f32, b: f32) -> f32 {
        let d = (a - b).rem_euclid(2.0 * PI);
        if d > PI {
            d - 2.0 * PI
        } else {
            d
        }
    }

    #[test]
    fn inside_zone_points_away() {
        let mut rng = fastrand::Rng::with_seed(3);
        let pointer = Pointer(Vec2::new(200.0, 200.0));
        // Agent 50 units up-left of the pointer.
        let pos = pointer.0 + Vec2::new(-30.0, -40.0);
        let want = (-40.0f32).atan2(-30.0);
        for _ in 0..100 {
            let h = repel(pos, pointer, 100.0, 0.25, &mut rng).expect("inside zone");
            assert!(angle_diff(h, want).abs() <= 0.25 + 1e-5);
        }
    }

    #[test]
    fn outside_zone_is_untouched() {
        let mut rng = fastrand::Rng::with_seed(3);
        let pointer = Pointer(Vec2::ZERO);
        assert_eq!(repel(Vec2::new(100.0, 0.0), pointer, 100.0, 0.25, &mut rng), None);
        assert_eq!(repel(Vec2::new(80.0, 80.0), pointer, 100.0, 0.25, &mut rng), None);
    }

    #[test]
    fn zero_distance_is_finite() {
        let mut rng = fastrand::Rng::with_seed(3);
        let pointer = Pointer(Vec2::new(5.0, 5.0));
        let h = repel(pointer.0, pointer, 100.0, 0.25, &mut rng).expect("inside zone");
        assert!(h.is_finite());
        assert!(h.abs() <= 0.25);
    }

    #[test]
    fn non_finite_pointer_is_rejected() {
        let mut pointer = Pointer::parked();
        assert!(!pointer.set(f32::NAN, 3.0));
        assert!(!pointer.set(1.0, f32::INFINITY));
        assert_eq!(pointer.0, POINTER_PARKED);
        assert!(pointer.set(10.0, 20.0));
        assert_eq!(pointer.0, Vec2::new(10.0, 20.0));
    }
}
