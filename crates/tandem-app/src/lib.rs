//! # tandem-app
//!
//! Entry point of the Tandem visualization. The dashboard host pushes one
//! message per data or style change; each message runs a full render cycle
//! that replaces the previously mounted chart.
//!
//! The browser glue lives in `web` and is only built for `wasm32`; the
//! `tandem-preview` binary drives the same cycle natively.

pub mod cycle;
pub mod slot;

#[cfg(target_arch = "wasm32")]
mod web;

pub use cycle::*;
pub use slot::*;

#[cfg(target_arch = "wasm32")]
pub use web::render_cycle;
