//! Drawing the field onto a 2D surface.
//!
//! Each frame is drawn from scratch in two passes:
//! 1. Particle glows, with the occasional sparkle core on top
//! 2. Connection lines between nearby particles

use std::f64::consts::PI;

use rand::Rng;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::error::FieldError;
use super::particles::ParticleField;
use super::theme::{Color, Hsla};

/// One color stop of a radial glow.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowStop {
	/// Position along the gradient radius, `0.0..=1.0`
	pub offset: f64,
	/// Color at this stop
	pub color: Hsla,
}

/// Minimal drawing surface the field renders into.
pub trait Painter {
	/// Resizes the backing surface in device pixels.
	fn set_size(&self, width: u32, height: u32);
	/// Erases the whole `width` x `height` area.
	fn clear(&self, width: f64, height: f64);
	/// Fills a disc of `radius` with a radial gradient reaching `glow_radius`.
	fn fill_glow(&self, x: f64, y: f64, radius: f64, glow_radius: f64, stops: &[GlowStop]);
	/// Fills a solid disc.
	fn fill_circle(&self, x: f64, y: f64, radius: f64, color: Hsla);
	/// Strokes a straight segment `width` px wide.
	fn stroke_line(&self, from: (f64, f64), to: (f64, f64), color: Color, width: f64);
}

/// [`Painter`] backed by an HTML canvas and its 2D context.
pub struct CanvasPainter {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

impl CanvasPainter {
	/// Acquires the 2D context of `canvas`.
	pub fn new(canvas: HtmlCanvasElement) -> Result<Self, FieldError> {
		let ctx = canvas
			.get_context("2d")?
			.ok_or(FieldError::NoContext)?
			.dyn_into::<CanvasRenderingContext2d>()
			.map_err(|_| FieldError::NoContext)?;
		Ok(Self { canvas, ctx })
	}
}

impl Painter for CanvasPainter {
	fn set_size(&self, width: u32, height: u32) {
		self.canvas.set_width(width);
		self.canvas.set_height(height);
	}

	fn clear(&self, width: f64, height: f64) {
		self.ctx.clear_rect(0.0, 0.0, width, height);
	}

	fn fill_glow(&self, x: f64, y: f64, radius: f64, glow_radius: f64, stops: &[GlowStop]) {
		let Ok(gradient) = self.ctx.create_radial_gradient(x, y, 0.0, x, y, glow_radius) else {
			return;
		};
		for stop in stops {
			let _ = gradient.add_color_stop(stop.offset as f32, &stop.color.to_css());
		}

		#[allow(deprecated)]
		self.ctx.set_fill_style(&gradient);
		self.ctx.begin_path();
		let _ = self.ctx.arc(x, y, radius, 0.0, PI * 2.0);
		self.ctx.fill();
	}

	fn fill_circle(&self, x: f64, y: f64, radius: f64, color: Hsla) {
		self.ctx.set_fill_style_str(&color.to_css());
		self.ctx.begin_path();
		let _ = self.ctx.arc(x, y, radius, 0.0, PI * 2.0);
		self.ctx.fill();
	}

	fn stroke_line(&self, from: (f64, f64), to: (f64, f64), color: Color, width: f64) {
		self.ctx.set_stroke_style_str(&color.to_css());
		self.ctx.set_line_width(width);
		self.ctx.begin_path();
		self.ctx.move_to(from.0, from.1);
		self.ctx.line_to(to.0, to.1);
		self.ctx.stroke();
	}
}

impl<R: Rng> ParticleField<R> {
	/// Clears the surface and draws the current frame.
	pub fn render<P: Painter>(&mut self, painter: &P) {
		let glow = &self.style.glow;
		let sparkle = &self.style.sparkle;

		painter.clear(self.width, self.height);

		for p in &self.particles {
			let stops = [
				GlowStop {
					offset: 0.0,
					color: Hsla::new(p.hue, glow.saturation, glow.lightness_center, p.opacity),
				},
				GlowStop {
					offset: 0.5,
					color: Hsla::new(p.hue, glow.saturation, glow.lightness_mid, p.opacity * 0.5),
				},
				GlowStop {
					offset: 1.0,
					color: Hsla::new(p.hue, glow.saturation, glow.lightness_edge, 0.0),
				},
			];
			painter.fill_glow(p.x, p.y, p.size, p.size * glow.radius_factor, &stops);

			if self.rng.gen_bool(sparkle.probability) {
				painter.fill_circle(
					p.x,
					p.y,
					p.size * sparkle.radius_factor,
					Hsla::new(
						p.hue,
						glow.saturation,
						sparkle.lightness,
						p.opacity * sparkle.alpha_factor,
					),
				);
			}
		}

		let style = &self.style.connections;
		for line in self.connections() {
			painter.stroke_line(
				line.from,
				line.to,
				style.color.with_alpha(line.opacity),
				style.line_width,
			);
		}
	}
}

#[cfg(test)]
pub(super) mod tests {
	use std::cell::RefCell;

	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;
	use crate::components::particle_field::particles::Particle;
	use crate::components::particle_field::theme::FieldStyle;

	/// A drawing call captured by [`Recorder`].
	#[derive(Clone, Debug, PartialEq)]
	pub enum Op {
		Size(u32, u32),
		Clear(f64, f64),
		Glow { x: f64, y: f64, radius: f64, glow_radius: f64, stops: Vec<GlowStop> },
		Circle { x: f64, y: f64, radius: f64, color: Hsla },
		Line { from: (f64, f64), to: (f64, f64), color: Color, width: f64 },
	}

	/// Records every call instead of drawing.
	#[derive(Default)]
	pub struct Recorder {
		pub ops: RefCell<Vec<Op>>,
	}

	impl Recorder {
		pub fn take(&self) -> Vec<Op> {
			std::mem::take(&mut *self.ops.borrow_mut())
		}
	}

	impl Painter for Recorder {
		fn set_size(&self, width: u32, height: u32) {
			self.ops.borrow_mut().push(Op::Size(width, height));
		}

		fn clear(&self, width: f64, height: f64) {
			self.ops.borrow_mut().push(Op::Clear(width, height));
		}

		fn fill_glow(&self, x: f64, y: f64, radius: f64, glow_radius: f64, stops: &[GlowStop]) {
			self.ops.borrow_mut().push(Op::Glow {
				x,
				y,
				radius,
				glow_radius,
				stops: stops.to_vec(),
			});
		}

		fn fill_circle(&self, x: f64, y: f64, radius: f64, color: Hsla) {
			self.ops.borrow_mut().push(Op::Circle { x, y, radius, color });
		}

		fn stroke_line(&self, from: (f64, f64), to: (f64, f64), color: Color, width: f64) {
			self.ops.borrow_mut().push(Op::Line { from, to, color, width });
		}
	}

	fn field_with(particles: Vec<Particle>, style: FieldStyle) -> ParticleField<SmallRng> {
		let mut field = ParticleField::with_style(SmallRng::seed_from_u64(3), style, 1000.0, 800.0);
		field.particles = particles;
		field
	}

	fn particle_at(x: f64, y: f64) -> Particle {
		Particle {
			x,
			y,
			vx: 0.0,
			vy: 0.0,
			size: 2.0,
			opacity: 0.6,
			hue: 210.0,
		}
	}

	#[test]
	fn frame_starts_with_a_full_clear() {
		let recorder = Recorder::default();
		let mut field = field_with(vec![particle_at(5.0, 5.0)], FieldStyle::default());
		field.render(&recorder);
		assert_eq!(recorder.take()[0], Op::Clear(1000.0, 800.0));
	}

	#[test]
	fn glow_reaches_three_radii_and_fades_out() {
		let recorder = Recorder::default();
		let mut style = FieldStyle::default();
		style.sparkle.probability = 0.0;
		let mut field = field_with(vec![particle_at(40.0, 60.0)], style);
		field.render(&recorder);

		let ops = recorder.take();
		let Op::Glow { x, y, radius, glow_radius, stops } = &ops[1] else {
			panic!("expected a glow, got {:?}", ops[1]);
		};
		assert_eq!((*x, *y, *radius, *glow_radius), (40.0, 60.0, 2.0, 6.0));
		assert_eq!(stops[0].color, Hsla::new(210.0, 100.0, 70.0, 0.6));
		assert_eq!(stops[1].offset, 0.5);
		assert_eq!(stops[1].color, Hsla::new(210.0, 100.0, 50.0, 0.3));
		assert_eq!(stops[2].color.a, 0.0);
		assert_eq!(ops.len(), 2);
	}

	#[test]
	fn sparkle_doubles_opacity_on_a_small_core() {
		let recorder = Recorder::default();
		let mut style = FieldStyle::default();
		style.sparkle.probability = 1.0;
		let mut field = field_with(vec![particle_at(40.0, 60.0)], style);
		field.render(&recorder);

		let ops = recorder.take();
		let Op::Circle { radius, color, .. } = &ops[2] else {
			panic!("expected a sparkle, got {:?}", ops[2]);
		};
		assert!((radius - 0.6).abs() < 1e-12);
		assert_eq!(color.l, 90.0);
		assert!((color.a - 1.2).abs() < 1e-12);
	}

	#[test]
	fn sparkles_are_rare() {
		let recorder = Recorder::default();
		let mut field = ParticleField::new(SmallRng::seed_from_u64(11), 1600.0, 900.0);
		for _ in 0..100 {
			field.render(&recorder);
		}
		let sparkles = recorder
			.take()
			.iter()
			.filter(|op| matches!(op, Op::Circle { .. }))
			.count();
		// 8000 draws at 10%
		assert!((600..1000).contains(&sparkles), "{sparkles} sparkles");
	}

	#[test]
	fn connections_drawn_after_particles() {
		let recorder = Recorder::default();
		let mut style = FieldStyle::default();
		style.sparkle.probability = 0.0;
		let mut field = field_with(
			vec![particle_at(100.0, 100.0), particle_at(200.0, 100.0), particle_at(900.0, 700.0)],
			style,
		);
		field.render(&recorder);

		let ops = recorder.take();
		assert_eq!(ops.len(), 1 + 3 + 1);
		let Op::Line { from, to, color, width } = &ops[4] else {
			panic!("expected a line, got {:?}", ops[4]);
		};
		assert_eq!((*from, *to, *width), ((100.0, 100.0), (200.0, 100.0), 1.0));
		assert_eq!((color.r, color.g, color.b), (0, 212, 255));
		assert!((color.a - 0.0333).abs() < 1e-4);
	}
}
