#![forbid(unsafe_code)]

//! Core: page interaction controller for the Dandy site.
//!
//! Three independent behaviors run against an abstract [`tree::ContentTree`]:
//!
//! - [`nav_scroller`]: internal anchor clicks scroll below the fixed header.
//! - [`scroll_spy`]: the navigation entry of the region in view is marked active.
//! - [`promo`]: the promotion form adds escaped cards, newest first.
//!
//! Hosts call [`controller::PageController::initialize`] once the page
//! structure exists and feed every click, scroll and submit through
//! [`controller::PageController::handle`]. [`memory::MemoryTree`] is a
//! headless host for tests and replays.
//!
//! # Example
//!
//! ```
//! use dandy_core::config::PageConfig;
//! use dandy_core::controller::PageController;
//! use dandy_core::event::PageEvent;
//! use dandy_core::memory::MemoryTree;
//! use dandy_core::tree::ContentTree;
//!
//! let mut page = MemoryTree::new()
//!     .with_nav("#menu")
//!     .with_region("menu", 900.0, 1200.0);
//! let controller = PageController::initialize(&page, PageConfig::default());
//!
//! let disposition = controller.handle(&mut page, &PageEvent::Click { entry: 0 });
//! assert!(disposition.is_prevented());
//! assert_eq!(page.scroll_offset(), 840.0);
//! ```

pub mod config;
pub mod controller;
pub mod escape;
pub mod event;
pub mod geometry;
pub mod logging;
pub mod memory;
pub mod nav_scroller;
pub mod promo;
pub mod scroll_spy;
pub mod tree;

pub use config::PageConfig;
pub use controller::PageController;
pub use event::{Disposition, PageEvent};
pub use tree::{ContentTree, TreeError};

// Re-export tracing macros at crate root so call sites use one path either way.
#[cfg(feature = "tracing")]
pub use logging::{debug, info, trace, warn};
