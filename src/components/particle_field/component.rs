//! Leptos component hosting the particle field canvas.
//!
//! The component renders a fixed, full-viewport canvas that never takes
//! pointer input. Once mounted it sizes the canvas to the window, starts the
//! frame loop and listens for window resizes. All of it is torn down when the
//! component's owner is cleaned up.

use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, Window};

use super::error::FieldError;
use super::frame_loop::FrameLoop;
use super::particles::ParticleField;
use super::render::CanvasPainter;
use super::scheduler::BrowserScheduler;

type BrowserLoop = FrameLoop<BrowserScheduler, CanvasPainter, SmallRng>;

/// A running field plus the window listener feeding it resizes.
///
/// Dropping it removes the listener and cancels the pending frame.
struct MountedField {
	window: Window,
	frame_loop: Rc<BrowserLoop>,
	on_resize: Closure<dyn FnMut()>,
}

impl Drop for MountedField {
	fn drop(&mut self) {
		let _ = self
			.window
			.remove_event_listener_with_callback("resize", self.on_resize.as_ref().unchecked_ref());
		self.frame_loop.stop();
		info!("particle field: stopped");
	}
}

/// Current viewport size in CSS pixels.
fn viewport_size(window: &Window) -> Result<(u32, u32), FieldError> {
	let width = window.inner_width()?.as_f64().unwrap_or(0.0);
	let height = window.inner_height()?.as_f64().unwrap_or(0.0);
	Ok((width.max(0.0) as u32, height.max(0.0) as u32))
}

fn seeded_rng() -> SmallRng {
	SmallRng::seed_from_u64((js_sys::Math::random() * u64::MAX as f64) as u64)
}

fn mount(canvas: HtmlCanvasElement) -> Result<MountedField, FieldError> {
	let window = web_sys::window().ok_or(FieldError::NoWindow)?;
	let painter = CanvasPainter::new(canvas)?;
	let (width, height) = viewport_size(&window)?;

	let field = ParticleField::new(seeded_rng(), width as f64, height as f64);
	info!(
		"particle field: mounted at {}x{} with {} particles",
		width,
		height,
		field.particles().len()
	);

	let scheduler = BrowserScheduler::new(window.clone());
	let frame_loop = Rc::new(FrameLoop::start(field, painter, scheduler));

	let resize_loop = Rc::clone(&frame_loop);
	let on_resize = Closure::<dyn FnMut()>::new(move || {
		let Some(win) = web_sys::window() else {
			return;
		};
		if let Ok((nw, nh)) = viewport_size(&win) {
			resize_loop.resize(nw, nh);
		}
	});
	window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;

	Ok(MountedField {
		window,
		frame_loop,
		on_resize,
	})
}

/// Full-viewport ambient particle background.
///
/// Takes no props. Anything rendered after it in the page stacks above it;
/// if the canvas or its 2D context is unavailable the component stays blank.
#[component]
pub fn ParticleFieldCanvas() -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let mounted = StoredValue::new_local(None::<MountedField>);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if mounted.with_value(Option::is_some) {
			return;
		}
		match mount(canvas.into()) {
			Ok(field) => mounted.set_value(Some(field)),
			Err(e) => debug!("particle field: not started, {e}"),
		}
	});

	on_cleanup(move || {
		drop(mounted.try_update_value(|field| field.take()));
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-system"
			style="position: fixed; top: 0; left: 0; width: 100vw; height: 100vh; z-index: 1; pointer-events: none;"
		/>
	}
}
