//! A progressive sphereflake ray tracer.
//!
//! Worker threads endlessly pick random pixel packets, intersect a packet of
//! primary rays with the recursive sphere fractal, and write the shaded
//! colours into a shared frame buffer. The presenter — windowing, input and
//! GPU upload live outside this crate — publishes a camera origin each frame
//! through [`Engine::update`] and reads the refined image back with
//! [`Engine::buffer`].
//!
//! The packet math runs [`simd::LANES`] rays wide; the register width is
//! picked at build time by the `sse` / `avx` / `avx512` cargo features, with
//! a scalar fallback that runs everywhere.

pub mod config;
pub mod vec3;
pub mod simd;
pub mod ray;
pub mod hit;
pub mod sphereflake;
pub mod render_target;
pub mod engine;

pub use crate::engine::{Engine, DEFAULT_CAMERA};
pub use crate::hit::HitRecord;
pub use crate::ray::Ray;
pub use crate::render_target::RenderTarget;
pub use crate::sphereflake::SphereFlake;
pub use crate::vec3::Vec3;
