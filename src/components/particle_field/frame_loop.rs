//! The self-rescheduling animation loop that drives a [`ParticleField`].
//!
//! The loop state sits behind `Rc<RefCell<..>>` so the frame callback and the
//! resize handler can reach it. The callback only holds a weak reference:
//! dropping the [`FrameLoop`] is enough to break the chain even if a frame
//! slips through.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::{debug, warn};
use rand::Rng;

use super::particles::ParticleField;
use super::render::Painter;
use super::scheduler::{FrameHandle, FrameScheduler};

struct LoopState<S, P, R: Rng> {
	field: ParticleField<R>,
	painter: P,
	scheduler: S,
	/// The frame currently requested from the scheduler, if any
	pending: Option<FrameHandle>,
	running: bool,
	tick: Rc<dyn Fn()>,
}

/// Owns a field together with the surface it paints and the scheduler that
/// paces it.
pub struct FrameLoop<S: FrameScheduler, P: Painter, R: Rng> {
	state: Rc<RefCell<LoopState<S, P, R>>>,
}

impl<S, P, R> FrameLoop<S, P, R>
where
	S: FrameScheduler + 'static,
	P: Painter + 'static,
	R: Rng + 'static,
{
	/// Sizes the surface to the field and runs the first frame immediately.
	pub fn start(field: ParticleField<R>, painter: P, scheduler: S) -> Self {
		let state = Rc::new_cyclic(|weak: &Weak<RefCell<LoopState<S, P, R>>>| {
			let weak = weak.clone();
			let tick: Rc<dyn Fn()> = Rc::new(move || {
				if let Some(state) = weak.upgrade() {
					Self::tick(&state);
				}
			});
			let (width, height) = field.size();
			painter.set_size(width as u32, height as u32);
			RefCell::new(LoopState {
				field,
				painter,
				scheduler,
				pending: None,
				running: true,
				tick,
			})
		});
		Self::tick(&state);
		Self { state }
	}

	/// Steps, renders, then requests the next frame.
	fn tick(state: &Rc<RefCell<LoopState<S, P, R>>>) {
		let mut guard = state.borrow_mut();
		let s = &mut *guard;
		if !s.running {
			return;
		}
		s.pending = None;

		s.field.step_frame();
		s.field.render(&s.painter);

		match s.scheduler.request_frame(&s.tick) {
			Ok(handle) => s.pending = Some(handle),
			Err(e) => {
				warn!("particle field: stopping animation, {e}");
				s.running = false;
			}
		}
	}
}

impl<S: FrameScheduler, P: Painter, R: Rng> FrameLoop<S, P, R> {
	/// Resizes the surface and regenerates the particles for the new bounds.
	pub fn resize(&self, width: u32, height: u32) {
		let mut s = self.state.borrow_mut();
		s.painter.set_size(width, height);
		s.field.resize(width as f64, height as f64);
		debug!(
			"particle field: resized to {}x{}, {} particles",
			width,
			height,
			s.field.particles().len()
		);
	}

	/// Cancels the pending frame. No tick runs after this returns.
	pub fn stop(&self) {
		let mut s = self.state.borrow_mut();
		s.running = false;
		if let Some(handle) = s.pending.take() {
			s.scheduler.cancel_frame(handle);
		}
	}

	/// False once stopped or after the scheduler failed.
	pub fn is_running(&self) -> bool {
		self.state.borrow().running
	}

	/// Particles in the current generation.
	pub fn particle_count(&self) -> usize {
		self.state.borrow().field.particles().len()
	}

	/// Field bounds as `(width, height)`.
	pub fn size(&self) -> (f64, f64) {
		self.state.borrow().field.size()
	}
}

impl<S: FrameScheduler, P: Painter, R: Rng> Drop for FrameLoop<S, P, R> {
	fn drop(&mut self) {
		self.stop();
	}
}
