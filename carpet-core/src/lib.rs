//! Core of the chaos-game carpet renderer.
//!
//! Main components:
//! - [`attractor`] — the fixed attractor points and their colors.
//! - [`generator`] — the chaos-game point update and injectable randomness.
//! - [`canvas`] — drawing surfaces and unit-square to pixel mapping.
//! - [`driver`] — the poll / step / plot / present loop.
//! - [`config`] — run configuration.
//! - [`types`] — shared small types.

pub mod attractor;
pub mod canvas;
pub mod config;
pub mod driver;
pub mod generator;
pub mod types;
