use glam::Vec2;

use super::random_heading;
use crate::coords::DeviceSpace;
use crate::ecs::components::direction;

/// Step `move_speed` along `heading`. Leaving the surface picks a fresh random
/// heading and clamps back to the nearest in-bounds position (no wrap).
pub fn advance(
    pos: Vec2,
    heading: f32,
    move_speed: f32,
    space: &DeviceSpace,
    rng: &mut fastrand::Rng,
) -> (Vec2, f32) {
    let next = pos + direction(heading) * move_speed;
    if space.contains(next) {
        (next, heading)
    } else {
        (space.clamp(next), random_heading(rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn moves_along_heading() {
        let mut rng = fastrand::Rng::with_seed(9);
        let space = DeviceSpace::new(100.0, 100.0, 1.0);
        let (p, h) = advance(Vec2::new(50.0, 50.0), PI / 2.0, 1.5, &space, &mut rng);
        assert!((p - Vec2::new(50.0, 51.5)).length() < 1e-4);
        assert_eq!(h, PI / 2.0);
    }

    #[test]
    fn leaving_clamps_and_rerolls() {
        let mut rng = fastrand::Rng::with_seed(9);
        let space = DeviceSpace::new(100.0, 100.0, 1.0);
        let (p, h) = advance(Vec2::new(99.5, 10.0), 0.0, 1.5, &space, &mut rng);
        assert_eq!(p, Vec2::new(99.0, 10.0));
        assert!((0.0..2.0 * PI).contains(&h));

        let (p, _) = advance(Vec2::new(0.5, 0.5), PI * 1.25, 1.5, &space, &mut rng);
        assert_eq!(p, Vec2::ZERO);
    }
}
