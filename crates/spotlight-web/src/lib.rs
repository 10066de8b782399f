#![forbid(unsafe_code)]

//! WASM bridge for the spotlight reveal.
//!
//! This crate provides [`RunnerCore`], which drives
//! `spotlight_core::SpotlightDriver` and the navigation tracker and turns
//! their output into CSS property writes. On `wasm32` it is exported to
//! JavaScript as `SpotlightRunner` for host-driven execution: the page calls
//! `scroll(y)` from its scroll listener and `frame(dt)` from
//! `requestAnimationFrame`, then applies the returned writes.

pub mod css;
pub mod runner_core;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{SpotlightRunner, is_mobile_device};

pub use runner_core::{RunnerConfig, RunnerCore, StyleCommand, StyleTarget};
