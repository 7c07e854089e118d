//! Particle field animation for the drift terminal backdrop.
//!
//! A fixed set of translucent particles drifts across a surface, wrapping at
//! the edges, with faint lines joining every pair that comes close. The
//! update step is a pure function of each particle and the surface bounds;
//! drawing goes through the [`Surface`] trait, and [`Animator`] ties both to
//! a host's mount, resize, frame and unmount hooks.

mod animator;
mod canvas;
mod field;
mod surface;

pub use animator::{Animator, CancellationToken, FrameRequest};
pub use canvas::FieldCanvas;
pub use field::{
    CONNECTION_THRESHOLD, Connection, LINE_WIDTH, PARTICLE_COUNT, ParticleField, advance,
    connection, connection_alpha, connections, spawn,
};
pub use surface::{DrawCommand, DrawList, Surface};
