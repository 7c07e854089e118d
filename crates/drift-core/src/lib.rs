//! Core types for the drift particle backdrop.
//!
//! Plain data shared by the animator, the configuration and the terminal
//! host: geometry, colors, accent palettes and the particle record itself.

mod color;
mod geometry;
mod palette;
mod particle;

pub use color::{ParseColorError, Rgb, Rgba};
pub use geometry::{Bounds, Vec2};
pub use palette::Palette;
pub use particle::Particle;
