use glam::Vec2;

use crate::coords::DeviceSpace;
use crate::ecs::components::{Heading, Position};
use crate::ecs::systems::random_heading;

/// Despawn every agent and spawn `count` fresh ones with uniform-random
/// positions inside `space` and uniform-random headings.
pub fn respawn(
    world: &mut hecs::World,
    count: usize,
    space: &DeviceSpace,
    rng: &mut fastrand::Rng,
) {
    world.clear();
    if space.is_empty() {
        return;
    }

    let agents = (0..count).map(|_| {
        let pos = Vec2::new(rng.f32() * space.size.x, rng.f32() * space.size.y);
        // f32 rounding can land exactly on the far edge.
        let pos = if space.contains(pos) { pos } else { space.clamp(pos) };
        (Position(pos), Heading(random_heading(rng)))
    });
    world.spawn_batch(agents);
}

/// Number of live agents.
pub fn count(world: &hecs::World) -> usize {
    world.len() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawns_inside_bounds() {
        let mut world = hecs::World::new();
        let mut rng = fastrand::Rng::with_seed(2);
        let space = DeviceSpace::new(320.0, 200.0, 2.0);
        respawn(&mut world, 500, &space, &mut rng);
        assert_eq!(count(&world), 500);
        for (_, (pos, heading)) in world.query::<(&Position, &Heading)>().iter() {
            assert!(space.contains(pos.0));
            assert!((0.0..std::f32::consts::TAU).contains(&heading.0));
        }
    }

    #[test]
    fn respawn_replaces_previous_swarm() {
        let mut world = hecs::World::new();
        let mut rng = fastrand::Rng::with_seed(2);
        respawn(&mut world, 50, &DeviceSpace::new(1000.0, 1000.0, 1.0), &mut rng);
        let small = DeviceSpace::new(10.0, 10.0, 1.0);
        respawn(&mut world, 20, &small, &mut rng);
        assert_eq!(count(&world), 20);
        for (_, pos) in world.query::<&Position>().iter() {
            assert!(small.contains(pos.0));
        }
    }

    #[test]
    fn empty_space_spawns_nothing() {
        let mut world = hecs::World::new();
        let mut rng = fastrand::Rng::with_seed(2);
        respawn(&mut world, 50, &DeviceSpace::new(0.0, 600.0, 1.0), &mut rng);
        assert_eq!(count(&world), 0);
    }
}
