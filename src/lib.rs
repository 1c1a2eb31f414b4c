//! crystal-particles: ambient particle background for a pianist's portfolio.
//!
//! This crate provides a WASM canvas component that fills the viewport with
//! slowly drifting, glowing particles joined by faint proximity lines.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info};

pub mod components;

pub use components::particle_field::{ParticleField, ParticleFieldCanvas};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("crystal-particles: logging initialized");
}

/// Main application component.
/// Hosts the particle background; page content stacks above it.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Pianist" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<ParticleFieldCanvas />
	}
}
