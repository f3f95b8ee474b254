use glam::Vec2;

use crate::config::SimConfig;
use crate::coords::DeviceSpace;
use crate::debug::timer::{SystemPhase, SystemTimers};
use crate::ecs::systems;
use crate::ecs::systems::mouse::Pointer;
use crate::field::{ScalarField, TrailMap};
use crate::render::canvas::Canvas;
use crate::swarm;

/// All mutable simulation state, owned by the host.
/// Input handlers only touch the pointer; `step` is the single mutator of
/// the swarm and the trail map.
pub struct Simulation {
    config: SimConfig,
    space: DeviceSpace,
    world: hecs::World,
    field: TrailMap,
    pointer: Pointer,
    rng: fastrand::Rng,
    frame_count: u64,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Self {
        Self::with_rng(config, fastrand::Rng::new())
    }

    /// Deterministic simulation for tests.
    #[cfg(test)]
    pub fn with_seed(config: SimConfig, seed: u64) -> Self {
        Self::with_rng(config, fastrand::Rng::with_seed(seed))
    }

    fn with_rng(config: SimConfig, rng: fastrand::Rng) -> Self {
        let space = DeviceSpace::new(0.0, 0.0, 1.0);
        Self {
            field: TrailMap::new(space, config.deposit),
            config,
            space,
            world: hecs::World::new(),
            pointer: Pointer::parked(),
            rng,
            frame_count: 0,
        }
    }

    /// Rebuild everything for a new viewport: blank trail map at device-pixel
    /// resolution and a freshly spawned swarm. Prior state is discarded.
    pub fn resize(&mut self, width: f32, height: f32, dpr: f32) {
        self.space = DeviceSpace::new(width, height, dpr);
        self.field.reset(self.space);
        swarm::respawn(
            &mut self.world,
            self.config.agent_count,
            &self.space,
            &mut self.rng,
        );
        log::info!(
            "Simulation resized: {}x{} @ {}x -> {}x{} px, {} agents",
            self.space.size.x,
            self.space.size.y,
            self.space.dpr,
            self.space.px_w,
            self.space.px_h,
            swarm::count(&self.world),
        );
    }

    /// One frame of simulation: swarm step then trail decay.
    /// A zero-area surface makes this a no-op.
    pub fn step(&mut self, timers: &mut SystemTimers) {
        if self.space.is_empty() {
            return;
        }

        timers.begin();
        systems::tick(
            &mut self.world,
            &mut self.field,
            &self.config,
            &self.space,
            self.pointer,
            &mut self.rng,
        );
        timers.end(SystemPhase::Swarm);

        timers.begin();
        self.field.decay(self.config.decay);
        timers.end(SystemPhase::Decay);

        self.frame_count += 1;
    }

    /// Paint the current trail onto `canvas` (cleared first).
    pub fn composite_onto(&self, canvas: &mut Canvas) {
        self.field.composite_onto(canvas);
    }

    /// Step then composite: everything one displayed frame needs.
    pub fn frame(&mut self, canvas: &mut Canvas, timers: &mut SystemTimers) {
        self.step(timers);
        timers.begin();
        self.composite_onto(canvas);
        timers.end(SystemPhase::Composite);
    }

    /// Stage a pointer position in simulation space.
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer.set(x, y);
    }

    /// Fresh random heading for every agent; positions unchanged.
    pub fn reset_headings(&mut self) {
        systems::reset_headings(&mut self.world, &mut self.rng);
        log::debug!("Reset headings of {} agents", swarm::count(&self.world));
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn space(&self) -> &DeviceSpace {
        &self.space
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer.0
    }

    #[cfg(test)]
    pub fn field(&self) -> &TrailMap {
        &self.field
    }

    #[cfg(test)]
    pub fn world(&self) -> &hecs::World {
        &self.world
    }

    pub fn agent_count(&self) -> usize {
        swarm::count(&self.world)
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
