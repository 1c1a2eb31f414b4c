//! Ambient particle field drawn behind the page.
//!
//! Renders drifting, glowing points on a full-viewport canvas with:
//! - Toroidal drift and a gently flickering opacity per particle
//! - Rare bright sparkles over individual particles
//! - Faint lines between particles closer than a fixed distance
//! - Density that follows the viewport width, capped at 80 particles
//!
//! The simulation ([`ParticleField`]) is independent of the browser: drawing
//! goes through [`Painter`] and frame pacing through [`FrameScheduler`], with
//! canvas and `requestAnimationFrame` implementations used by the component.
//!
//! # Example
//!
//! ```ignore
//! use crystal_particles::ParticleFieldCanvas;
//!
//! view! {
//!     <ParticleFieldCanvas />
//!     <main class="content">/* page sections */</main>
//! }
//! ```

mod component;
mod error;
mod frame_loop;
mod particles;
mod render;
mod scheduler;
mod theme;

pub use component::ParticleFieldCanvas;
pub use error::FieldError;
pub use frame_loop::FrameLoop;
pub use particles::{Connection, Particle, ParticleField, wrap};
pub use render::{CanvasPainter, GlowStop, Painter};
pub use scheduler::{BrowserScheduler, FrameHandle, FrameScheduler};
pub use theme::{Color, Hsla};
