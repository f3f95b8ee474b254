use std::f32::consts::PI;

/// Trail color and per-deposit opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepositColor {
    pub rgb: [u8; 3],
    /// Opacity of a single deposit, composited "over" the existing trail.
    pub alpha: f32,
}

/// Fixed simulation parameters. Immutable for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimConfig {
    /// Number of agents spawned on every resize.
    pub agent_count: usize,
    /// Left/right sensor offset from the heading (radians).
    pub sensor_angle: f32,
    /// Distance from the agent to each probe point.
    pub sensor_distance: f32,
    /// Heading change per steer decision (radians).
    pub turn_speed: f32,
    /// Distance moved per frame.
    pub move_speed: f32,
    /// Fraction of trail intensity retained each frame.
    pub decay: f32,
    /// Declared diffusion coefficient. Not applied: the trail only decays.
    pub diffuse: f32,
    pub deposit: DepositColor,
    /// Pointer distance below which agents turn away.
    pub repulsion_radius: f32,
    /// Max random deviation from the "away" heading (radians).
    pub repulsion_jitter: f32,
}

impl SimConfig {
    pub const DEFAULT: SimConfig = SimConfig {
        agent_count: 1500,
        sensor_angle: PI / 4.0,
        sensor_distance: 20.0,
        turn_speed: 0.2,
        move_speed: 1.5,
        decay: 0.95,
        diffuse: 0.1,
        deposit: DepositColor {
            rgb: [212, 175, 55], // gold
            alpha: 0.5,
        },
        repulsion_radius: 100.0,
        repulsion_jitter: 0.25,
    };
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
