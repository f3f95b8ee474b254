use glam::Vec2;

/// Agent position in simulation space (logical viewport units).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Vec2);

/// Heading in radians. Not normalized; grows or shrinks freely.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Heading(pub f32);

/// Unit vector for an angle in radians.
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
