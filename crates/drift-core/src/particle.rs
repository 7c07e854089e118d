//! The particle record.

use crate::color::Rgba;
use crate::geometry::Vec2;

/// A single drifting point.
///
/// Only `pos` changes once a particle is created; `radius` and `color` are
/// fixed for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Current position in surface units.
    pub pos: Vec2,
    /// Displacement applied every frame.
    pub vel: Vec2,
    /// Circle radius in surface units.
    pub radius: f64,
    /// Translucent fill color.
    pub color: Rgba,
}

impl Particle {
    /// Construct a new particle.
    pub fn new(pos: Vec2, vel: Vec2, radius: f64, color: Rgba) -> Self {
        Self {
            pos,
            vel,
            radius,
            color,
        }
    }
}
