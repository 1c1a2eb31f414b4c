//! Ambient particle simulation: spawning, drift and wraparound.
//!
//! Particles are plain value records in a flat `Vec`; nothing refers to a
//! particle by identity, so a resize simply replaces the whole buffer.

use rand::Rng;

use super::theme::{ConnectionStyle, FieldStyle, ParticleStyle};

/// A single drifting point of light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
	/// Horizontal position, in `[0, width)`
	pub x: f64,
	/// Vertical position, in `[0, height)`
	pub y: f64,
	/// Horizontal velocity per frame
	pub vx: f64,
	/// Vertical velocity per frame
	pub vy: f64,
	/// Radius, fixed for the particle's lifetime
	pub size: f64,
	/// Current opacity, kept in `[0.1, 0.8]`
	pub opacity: f64,
	/// Hue in degrees, fixed for the particle's lifetime
	pub hue: f64,
}

/// A line to draw between two nearby particles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
	/// Position of the lower-indexed particle
	pub from: (f64, f64),
	/// Position of the higher-indexed particle
	pub to: (f64, f64),
	/// Line opacity, decaying linearly with distance
	pub opacity: f64,
}

/// Number of particles for a surface `width` px wide.
pub(crate) fn target_count(style: &ParticleStyle, width: f64) -> usize {
	if width.is_nan() || width <= 0.0 {
		return 0;
	}
	((width / style.width_per_particle).floor() as usize).min(style.max_count)
}

/// Maps `value` into `[0, extent)`, re-entering from the opposite edge.
pub fn wrap(value: f64, extent: f64) -> f64 {
	if extent.is_nan() || extent <= 0.0 {
		return 0.0;
	}
	let wrapped = value.rem_euclid(extent);
	// rem_euclid can round up to `extent` for tiny negative inputs
	if wrapped >= extent { 0.0 } else { wrapped }
}

/// Line opacity for two particles `distance` apart, `None` when too far.
pub(crate) fn connection_opacity(style: &ConnectionStyle, distance: f64) -> Option<f64> {
	(distance < style.max_distance)
		.then(|| (1.0 - distance / style.max_distance) * style.max_opacity)
}

/// Every unordered pair closer than the connection distance, in index order.
pub(crate) fn connections<'a>(
	particles: &'a [Particle],
	style: &'a ConnectionStyle,
) -> impl Iterator<Item = Connection> + 'a {
	(0..particles.len()).flat_map(move |i| {
		(i + 1..particles.len()).filter_map(move |j| {
			let (a, b) = (&particles[i], &particles[j]);
			let (dx, dy) = (a.x - b.x, a.y - b.y);
			let distance = (dx * dx + dy * dy).sqrt();
			connection_opacity(style, distance).map(|opacity| Connection {
				from: (a.x, a.y),
				to: (b.x, b.y),
				opacity,
			})
		})
	})
}

fn sample<R: Rng + ?Sized>(rng: &mut R, extent: f64) -> f64 {
	if extent > 0.0 {
		rng.gen_range(0.0..extent)
	} else {
		0.0
	}
}

/// Owns the particle buffer, the surface bounds it lives in and the random
/// source that drives spawning, jitter and sparkles.
pub struct ParticleField<R: Rng> {
	pub(super) particles: Vec<Particle>,
	pub(super) width: f64,
	pub(super) height: f64,
	pub(super) style: FieldStyle,
	pub(super) rng: R,
}

impl<R: Rng> ParticleField<R> {
	/// Creates a field sized `width` x `height` and seeds its particles.
	pub fn new(rng: R, width: f64, height: f64) -> Self {
		Self::with_style(rng, FieldStyle::default(), width, height)
	}

	pub(crate) fn with_style(rng: R, style: FieldStyle, width: f64, height: f64) -> Self {
		let mut field = Self {
			particles: Vec::with_capacity(style.particles.max_count),
			width: 0.0,
			height: 0.0,
			style,
			rng,
		};
		field.resize(width, height);
		field
	}

	/// Current particles in spawn order.
	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	/// Surface bounds as `(width, height)`.
	pub fn size(&self) -> (f64, f64) {
		(self.width, self.height)
	}

	/// Sets the surface bounds and regenerates every particle.
	///
	/// Old particles are discarded, even when the size is unchanged.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		let count = target_count(&self.style.particles, width);
		self.particles.clear();
		for _ in 0..count {
			let particle = self.spawn_particle();
			self.particles.push(particle);
		}
	}

	/// Draws one particle uniformly from the configured ranges.
	pub fn spawn_particle(&mut self) -> Particle {
		let style = &self.style.particles;
		let rng = &mut self.rng;
		Particle {
			x: sample(rng, self.width),
			y: sample(rng, self.height),
			vx: rng.gen_range(style.speed.clone()),
			vy: rng.gen_range(style.speed.clone()),
			size: rng.gen_range(style.size.clone()),
			opacity: rng
				.gen_range(style.spawn_opacity.clone())
				.clamp(style.opacity_min, style.opacity_max),
			hue: rng.gen_range(style.hue.clone()),
		}
	}

	/// Advances every particle by one frame.
	pub fn step_frame(&mut self) {
		let style = &self.style.particles;
		for p in &mut self.particles {
			p.x = wrap(p.x + p.vx, self.width);
			p.y = wrap(p.y + p.vy, self.height);

			let jitter = self.rng.gen_range(-style.opacity_jitter..style.opacity_jitter);
			p.opacity = (p.opacity + jitter).clamp(style.opacity_min, style.opacity_max);
		}
	}

	/// Visible connections for the current particle positions.
	pub fn connections(&self) -> impl Iterator<Item = Connection> + '_ {
		connections(&self.particles, &self.style.connections)
	}
}
