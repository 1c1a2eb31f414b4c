//! Errors raised while mounting or driving the particle field.

use wasm_bindgen::JsValue;

/// Failures the field can hit when talking to the host page.
///
/// None of these are surfaced to the user: the component logs them and
/// stays inert.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FieldError {
	/// No global `window` (not running in a browser main thread).
	#[error("no window available")]
	NoWindow,

	/// The canvas did not hand out a 2D rendering context.
	#[error("canvas has no 2d context")]
	NoContext,

	/// The frame scheduler refused a request.
	#[error("frame scheduling failed: {0}")]
	Scheduler(String),

	/// A JavaScript exception returned from a web-sys call.
	#[error("javascript error: {0}")]
	Js(String),
}

impl From<JsValue> for FieldError {
	fn from(value: JsValue) -> Self {
		Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
	}
}
