use glam::Vec2;

use crate::ecs::components::direction;
use crate::field::ScalarField;

/// Trail intensity at the three probe points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReadings {
    pub forward: f32,
    pub left: f32,
    pub right: f32,
}

/// Probe point `distance` ahead of `pos` along `angle + offset`.
#[inline]
pub fn probe_point(pos: Vec2, angle: f32, offset: f32, distance: f32) -> Vec2 {
    pos + direction(angle + offset) * distance
}

/// Sample the field forward, left (+sensor_angle) and right (-sensor_angle).
pub fn read<F: ScalarField>(
    field: &F,
    pos: Vec2,
    heading: f32,
    sensor_angle: f32,
    sensor_distance: f32,
) -> SensorReadings {
    SensorReadings {
        forward: field.sample(probe_point(pos, heading, 0.0, sensor_distance)),
        left: field.sample(probe_point(pos, heading, sensor_angle, sensor_distance)),
        right: field.sample(probe_point(pos, heading, -sensor_angle, sensor_distance)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    /// Field whose intensity is the x coordinate; off-surface left of x = 0.
    struct RampX;

    impl ScalarField for RampX {
        fn sample(&self, pos: Vec2) -> f32 {
            if pos.x < 0.0 {
                -1.0
            } else {
                pos.x
            }
        }
        fn deposit(&mut self, _pos: Vec2) {}
        fn decay(&mut self, _factor: f32) {}
        fn clear(&mut self) {}
    }

    #[test]
    fn probe_points_follow_heading() {
        let p = probe_point(Vec2::new(10.0, 10.0), 0.0, FRAC_PI_2, 20.0);
        assert!((p - Vec2::new(10.0, 30.0)).length() < 1e-4);
    }

    #[test]
    fn reads_three_offsets() {
        // Facing +y: left probe (+90deg) points at -x, right probe at +x.
        let r = read(&RampX, Vec2::new(5.0, 0.0), FRAC_PI_2, FRAC_PI_2, 10.0);
        assert!((r.forward - 5.0).abs() < 1e-4);
        assert_eq!(r.left, -1.0);
        assert!((r.right - 15.0).abs() < 1e-4);
    }
}
