//! Display-synchronised frame scheduling.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::Window;

use super::error::FieldError;

/// Opaque handle to one scheduled frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameHandle(
	/// Request id assigned by the host.
	pub i32,
);

/// Schedules a callback for the next display frame.
///
/// Exactly one frame is requested at a time; the returned handle is the only
/// way to take the request back.
pub trait FrameScheduler {
	/// Runs `tick` once on the next display frame.
	fn request_frame(&self, tick: &Rc<dyn Fn()>) -> Result<FrameHandle, FieldError>;
	/// Withdraws a request that has not run yet.
	fn cancel_frame(&self, handle: FrameHandle);
}

/// [`FrameScheduler`] over `requestAnimationFrame`.
///
/// The JS closure is created on the first request and reused afterwards, so
/// every request must pass the same `tick`.
pub struct BrowserScheduler {
	window: Window,
	callback: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl BrowserScheduler {
	/// Schedules against `window`'s refresh.
	pub fn new(window: Window) -> Self {
		Self {
			window,
			callback: RefCell::new(None),
		}
	}
}

impl FrameScheduler for BrowserScheduler {
	fn request_frame(&self, tick: &Rc<dyn Fn()>) -> Result<FrameHandle, FieldError> {
		let mut slot = self.callback.borrow_mut();
		let callback = slot.get_or_insert_with(|| {
			let tick = Rc::clone(tick);
			Closure::new(move || tick())
		});
		self.window
			.request_animation_frame(callback.as_ref().unchecked_ref())
			.map(FrameHandle)
			.map_err(|e| FieldError::Scheduler(FieldError::from(e).to_string()))
	}

	fn cancel_frame(&self, handle: FrameHandle) {
		let _ = self.window.cancel_animation_frame(handle.0);
	}
}
