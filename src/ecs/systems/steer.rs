use super::sense::SensorReadings;
use super::uniform;

/// Heading change from one set of sensor readings. First match wins:
/// forward strongest keeps course, forward weakest turns randomly,
/// otherwise turn toward the stronger side. A left/right tie does nothing.
pub fn turn(readings: SensorReadings, turn_speed: f32, rng: &mut fastrand::Rng) -> f32 {
    let SensorReadings {
        forward,
        left,
        right,
    } = readings;

    if forward > left && forward > right {
        0.0
    } else if forward < left && forward < right {
        uniform(rng, -1.0, 1.0) * turn_speed
    } else if left > right {
        turn_speed
    } else if right > left {
        -turn_speed
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TURN: f32 = 0.2;

    fn readings(forward: f32, left: f32, right: f32) -> SensorReadings {
        SensorReadings {
            forward,
            left,
            right,
        }
    }

    #[test]
    fn strongest_forward_keeps_heading() {
        let mut rng = fastrand::Rng::with_seed(1);
        assert_eq!(turn(readings(10.0, 5.0, 5.0), TURN, &mut rng), 0.0);
    }

    #[test]
    fn stronger_left_turns_left() {
        let mut rng = fastrand::Rng::with_seed(1);
        assert_eq!(turn(readings(5.0, 10.0, 3.0), TURN, &mut rng), TURN);
    }

    #[test]
    fn stronger_right_turns_right() {
        let mut rng = fastrand::Rng::with_seed(1);
        assert_eq!(turn(readings(5.0, 3.0, 10.0), TURN, &mut rng), -TURN);
    }

    #[test]
    fn weakest_forward_turns_randomly_within_turn_speed() {
        let mut rng = fastrand::Rng::with_seed(7);
        let mut saw_left = false;
        let mut saw_right = false;
        for _ in 0..200 {
            let d = turn(readings(0.0, 10.0, 10.0), TURN, &mut rng);
            assert!(d.abs() <= TURN);
            saw_left |= d > 0.0;
            saw_right |= d < 0.0;
        }
        assert!(saw_left && saw_right);
    }

    #[test]
    fn off_surface_probe_steers_away() {
        let mut rng = fastrand::Rng::with_seed(1);
        // Forward probe off-surface, left clear: forward is dominated on the
        // left only, so the stronger side wins.
        assert_eq!(turn(readings(-1.0, 0.0, -1.0), TURN, &mut rng), TURN);
    }

    #[test]
    fn tie_without_dominant_forward_does_nothing() {
        let mut rng = fastrand::Rng::with_seed(1);
        assert_eq!(turn(readings(5.0, 5.0, 5.0), TURN, &mut rng), 0.0);
        // Forward ties the left: falls through to the side comparison.
        assert_eq!(turn(readings(7.0, 7.0, 2.0), TURN, &mut rng), TURN);
    }
}
