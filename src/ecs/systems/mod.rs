pub mod mouse;
pub mod movement;
pub mod sense;
pub mod steer;

use std::f32::consts::TAU;

use crate::config::SimConfig;
use crate::coords::DeviceSpace;
use crate::ecs::components::{Heading, Position};
use crate::field::ScalarField;
use mouse::Pointer;

/// Uniform sample in [lo, hi).
#[inline]
pub fn uniform(rng: &mut fastrand::Rng, lo: f32, hi: f32) -> f32 {
    lo + rng.f32() * (hi - lo)
}

/// Uniform heading in [0, 2pi).
#[inline]
pub fn random_heading(rng: &mut fastrand::Rng) -> f32 {
    rng.f32() * TAU
}

/// Run one swarm step. Each agent senses, steers, reacts to the pointer,
/// moves and deposits before the next agent runs, so later agents see
/// deposits made earlier in the same frame.
pub fn tick<F: ScalarField>(
    world: &mut hecs::World,
    field: &mut F,
    config: &SimConfig,
    space: &DeviceSpace,
    pointer: Pointer,
    rng: &mut fastrand::Rng,
) {
    for (_, (pos, heading)) in world.query_mut::<(&mut Position, &mut Heading)>() {
        // 1. Sense
        let readings = sense::read(
            field,
            pos.0,
            heading.0,
            config.sensor_angle,
            config.sensor_distance,
        );

        // 2. Steer
        heading.0 += steer::turn(readings, config.turn_speed, rng);

        // 3. Pointer repulsion overrides the steer decision
        if let Some(away) = mouse::repel(
            pos.0,
            pointer,
            config.repulsion_radius,
            config.repulsion_jitter,
            rng,
        ) {
            heading.0 = away;
        }

        // 4-5. Move + bounds
        let (next, next_heading) =
            movement::advance(pos.0, heading.0, config.move_speed, space, rng);
        pos.0 = next;
        heading.0 = next_heading;

        // 6. Deposit
        field.deposit(pos.0);
    }
}

/// Give every agent a fresh random heading. Positions are untouched.
pub fn reset_headings(world: &mut hecs::World, rng: &mut fastrand::Rng) {
    for (_, heading) in world.query_mut::<&mut Heading>() {
        heading.0 = random_heading(rng);
    }
}
