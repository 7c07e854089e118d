//! The particle field and its per-frame update.

use drift_core::{Bounds, Palette, Particle, Vec2};
use rand::Rng;

use crate::surface::Surface;

/// Number of particles in every field.
pub const PARTICLE_COUNT: usize = 50;

/// Particles closer than this (in surface units) are joined by a line.
pub const CONNECTION_THRESHOLD: f64 = 100.0;

/// Stroke width of connecting lines.
pub const LINE_WIDTH: f64 = 0.5;

/// Velocity components are drawn from `[-MAX_SPEED, MAX_SPEED)`.
const MAX_SPEED: f64 = 0.5;

/// Radii are drawn from `[MIN_RADIUS, MAX_RADIUS)`.
const MIN_RADIUS: f64 = 1.0;
const MAX_RADIUS: f64 = 4.0;

/// Particle alpha is drawn from `[0, MAX_ALPHA)`.
const MAX_ALPHA: f64 = 0.3;

/// Create a particle at a uniformly random position within `bounds`.
pub fn spawn<R: Rng + ?Sized>(bounds: Bounds, palette: Palette, rng: &mut R) -> Particle {
    // Scale a unit sample so zero-sized bounds don't produce an empty range.
    let pos = Vec2::new(
        rng.gen_range(0.0..1.0) * bounds.width,
        rng.gen_range(0.0..1.0) * bounds.height,
    );
    let vel = Vec2::new(
        rng.gen_range(-MAX_SPEED..MAX_SPEED),
        rng.gen_range(-MAX_SPEED..MAX_SPEED),
    );
    let radius = rng.gen_range(MIN_RADIUS..MAX_RADIUS);
    let accent = if rng.gen_bool(0.5) {
        palette.primary()
    } else {
        palette.secondary()
    };
    let color = accent.with_alpha(rng.gen_range(0.0..MAX_ALPHA));

    Particle::new(pos, vel, radius, color)
}

/// Move a particle by its velocity, wrapping at the edges of `bounds`.
pub fn advance(particle: Particle, bounds: Bounds) -> Particle {
    let moved = particle.pos + particle.vel;
    Particle {
        pos: Vec2::new(wrap(moved.x, bounds.width), wrap(moved.y, bounds.height)),
        ..particle
    }
}

/// Past the far edge restarts at 0; below 0 restarts at the far edge.
fn wrap(value: f64, extent: f64) -> f64 {
    if value > extent {
        0.0
    } else if value < 0.0 {
        extent
    } else {
        value
    }
}

/// Stroke alpha for a line between particles `distance` apart.
pub fn connection_alpha(distance: f64) -> f64 {
    0.1 - distance / 1000.0
}

/// A line to draw between two nearby particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    pub from: Vec2,
    pub to: Vec2,
    pub distance: f64,
    pub alpha: f64,
}

/// The line joining `a` and `b`, if they are within [`CONNECTION_THRESHOLD`].
pub fn connection(a: &Particle, b: &Particle) -> Option<Connection> {
    let distance = a.pos.distance(b.pos);
    (distance < CONNECTION_THRESHOLD).then(|| Connection {
        from: a.pos,
        to: b.pos,
        distance,
        alpha: connection_alpha(distance),
    })
}

/// Every connection among `particles`, each unordered pair considered once.
pub fn connections(particles: &[Particle]) -> impl Iterator<Item = Connection> + '_ {
    particles.iter().enumerate().flat_map(move |(i, a)| {
        particles[i + 1..]
            .iter()
            .filter_map(move |b| connection(a, b))
    })
}

/// A fixed-size set of particles drifting within a rectangle.
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    bounds: Bounds,
    palette: Palette,
}

impl ParticleField {
    /// Create a field of [`PARTICLE_COUNT`] particles spread over `bounds`.
    pub fn new<R: Rng + ?Sized>(bounds: Bounds, palette: Palette, rng: &mut R) -> Self {
        let particles = (0..PARTICLE_COUNT)
            .map(|_| spawn(bounds, palette, rng))
            .collect();
        Self {
            particles,
            bounds,
            palette,
        }
    }

    /// Create a field from explicit particles.
    pub fn from_particles(bounds: Bounds, palette: Palette, particles: Vec<Particle>) -> Self {
        Self {
            particles,
            bounds,
            palette,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Change the logical bounds. Positions are left where they are.
    pub fn resize(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    /// Advance every particle by one frame.
    pub fn step(&mut self) {
        let bounds = self.bounds;
        for particle in &mut self.particles {
            *particle = advance(*particle, bounds);
        }
    }

    /// Draw particles, then the lines between close pairs.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        for particle in &self.particles {
            surface.fill_circle(particle.pos, particle.radius, particle.color);
        }

        let stroke = self.palette.primary();
        for line in connections(&self.particles) {
            surface.stroke_line(line.from, line.to, LINE_WIDTH, stroke.with_alpha(line.alpha));
        }
    }
}
