#![forbid(unsafe_code)]

//! WASM host for the Dandy page controller.
//!
//! On `wasm32` this crate exports, via `wasm-bindgen`:
//! - `install(configJson?)`: attach once the document structure exists,
//!   deferring to `DOMContentLoaded` while the document is still loading;
//! - `DandyPage`: an explicitly owned attachment with `destroy()`.
//!
//! The DOM implementation of [`dandy_core::tree::ContentTree`] lives in the
//! wasm-only module. Listener planning, scroll-offset resolution and config
//! parsing live in [`host`] and are tested natively.

pub mod host;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{DandyPage, install};

/// Native builds compile this crate as a stub so `cargo check --workspace` stays
/// green on non-wasm targets.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct DandyPage;

#[cfg(not(target_arch = "wasm32"))]
impl DandyPage {
    pub fn new() -> Self {
        Self
    }
}
