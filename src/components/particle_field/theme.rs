//! Visual tunables for the particle field.
//!
//! The field takes no props: every constant that shapes its look and cost
//! lives here, gathered in `FieldStyle::default`. Only the color types leave
//! the crate.

use std::ops::Range;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Alpha in `0.0..=1.0`.
	pub a: f64,
}

impl Color {
	/// Builds a color from channels and alpha.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same color with alpha replaced.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// CSS `rgba()` notation.
	pub fn to_css(self) -> String {
		format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}
}

/// HSLA color, the space particle glows are defined in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsla {
	/// Hue in degrees.
	pub h: f64,
	/// Saturation in percent.
	pub s: f64,
	/// Lightness in percent.
	pub l: f64,
	/// Alpha. Values above 1.0 are passed through; the canvas clamps them.
	pub a: f64,
}

impl Hsla {
	/// Builds a color from hue, saturation, lightness and alpha.
	pub const fn new(h: f64, s: f64, l: f64, a: f64) -> Self {
		Self { h, s, l, a }
	}

	/// CSS `hsla()` notation.
	pub fn to_css(self) -> String {
		format!("hsla({}, {}%, {}%, {})", self.h, self.s, self.l, self.a)
	}
}

/// Spawn ranges and drift behaviour of individual particles.
#[derive(Clone, Debug)]
pub(crate) struct ParticleStyle {
	/// Hard cap on particle count
	pub max_count: usize,
	/// Surface width (px) allotted to each particle below the cap
	pub width_per_particle: f64,
	/// Radius range
	pub size: Range<f64>,
	/// Per-axis velocity range, units per frame
	pub speed: Range<f64>,
	/// Range initial opacity is drawn from before clamping
	pub spawn_opacity: Range<f64>,
	/// Opacity is kept inside this band, inclusive
	pub opacity_min: f64,
	pub opacity_max: f64,
	/// Half-width of the per-frame opacity jitter
	pub opacity_jitter: f64,
	/// Hue band in degrees (blue to cyan)
	pub hue: Range<f64>,
}

/// Radial glow drawn for each particle.
#[derive(Clone, Debug)]
pub(crate) struct GlowStyle {
	/// Gradient radius as a multiple of particle size
	pub radius_factor: f64,
	pub saturation: f64,
	pub lightness_center: f64,
	pub lightness_mid: f64,
	pub lightness_edge: f64,
}

/// Occasional bright core drawn over a particle.
#[derive(Clone, Debug)]
pub(crate) struct SparkleStyle {
	/// Chance per particle per frame
	pub probability: f64,
	/// Radius as a multiple of particle size
	pub radius_factor: f64,
	pub lightness: f64,
	/// Multiplier on the particle's opacity
	pub alpha_factor: f64,
}

/// Faint lines between nearby particles.
#[derive(Clone, Debug)]
pub(crate) struct ConnectionStyle {
	/// Pairs at or beyond this distance are not connected
	pub max_distance: f64,
	/// Opacity of a zero-length connection
	pub max_opacity: f64,
	pub color: Color,
	pub line_width: f64,
}

/// Complete set of field tunables.
#[derive(Clone, Debug)]
pub(crate) struct FieldStyle {
	pub particles: ParticleStyle,
	pub glow: GlowStyle,
	pub sparkle: SparkleStyle,
	pub connections: ConnectionStyle,
}

impl Default for FieldStyle {
	fn default() -> Self {
		Self {
			particles: ParticleStyle {
				max_count: 80,
				width_per_particle: 20.0,
				size: 1.0..4.0,
				speed: -0.25..0.25,
				spawn_opacity: 0.2..1.0,
				opacity_min: 0.1,
				opacity_max: 0.8,
				opacity_jitter: 0.005,
				hue: 180.0..240.0,
			},
			glow: GlowStyle {
				radius_factor: 3.0,
				saturation: 100.0,
				lightness_center: 70.0,
				lightness_mid: 50.0,
				lightness_edge: 30.0,
			},
			sparkle: SparkleStyle {
				probability: 0.1,
				radius_factor: 0.3,
				lightness: 90.0,
				alpha_factor: 2.0,
			},
			connections: ConnectionStyle {
				max_distance: 150.0,
				max_opacity: 0.1,
				color: Color::rgba(0, 212, 255, 1.0),
				line_width: 1.0,
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn css_formats() {
		assert_eq!(Hsla::new(200.0, 100.0, 70.0, 0.5).to_css(), "hsla(200, 100%, 70%, 0.5)");
		assert_eq!(
			Color::rgba(0, 212, 255, 1.0).with_alpha(0.25).to_css(),
			"rgba(0, 212, 255, 0.25)"
		);
	}

	#[test]
	fn spawn_range_starts_inside_opacity_band() {
		let style = FieldStyle::default().particles;
		assert!(style.opacity_min < style.opacity_max);
		assert!(style.spawn_opacity.start >= style.opacity_min);
	}
}
