#![forbid(unsafe_code)]

//! The content-tree capability the controller runs against.
//!
//! A host (browser DOM, in-memory model, terminal renderer) implements
//! [`ContentTree`] once. The controller never sees host types: it reads
//! navigation targets, region geometry and input values, and mutates the tree
//! only through marker toggles, scroll requests, input writes and
//! [`ContentTree::insert_first_child`].

use std::fmt;

use crate::geometry::{Bounds, Region};

/// Content-tree error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// No element carries the requested id.
    MissingElement(String),
    /// The element exists but cannot perform the operation (e.g. not an input).
    WrongKind {
        /// Element id.
        id: String,
        /// What the operation needed.
        expected: &'static str,
    },
    /// Navigation entry index out of range.
    NoSuchEntry(usize),
    /// The host rejected the mutation.
    Host(String),
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingElement(id) => write!(f, "no element with id `{id}`"),
            Self::WrongKind { id, expected } => write!(f, "element `{id}` is not {expected}"),
            Self::NoSuchEntry(index) => write!(f, "no navigation entry at index {index}"),
            Self::Host(msg) => write!(f, "host error: {msg}"),
        }
    }
}

impl std::error::Error for TreeError {}

/// A navigation entry as seen at initialization time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    /// Position in the navigation list (document order).
    pub index: usize,
    /// Target reference, e.g. `#menu` or `https://example.com`.
    pub href: String,
}

impl NavEntry {
    pub fn new(index: usize, href: impl Into<String>) -> Self {
        Self {
            index,
            href: href.into(),
        }
    }

    /// Region id this entry points at, if the target is an internal anchor.
    ///
    /// `#` alone yields `Some("")`, which never matches an element.
    pub fn anchor_target(&self) -> Option<&str> {
        self.href.strip_prefix('#')
    }

    /// Whether the entry's target is an internal anchor.
    #[inline]
    pub fn is_internal(&self) -> bool {
        self.anchor_target().is_some()
    }
}

/// Description of an element to create and insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSpec {
    /// Element tag.
    pub tag: String,
    /// Class attribute.
    pub class: String,
    /// Inner markup. Every user-provided piece is already escaped.
    pub inner_markup: String,
}

/// Read/mutate capability over the live page.
///
/// All coordinates are document coordinates (see [`crate::geometry`]).
pub trait ContentTree {
    /// Navigation entries in document order.
    fn nav_entries(&self) -> Vec<NavEntry>;

    /// Content regions in document order, with current layout.
    fn regions(&self) -> Vec<Region>;

    /// Bounds of the element with `id`, anywhere in the page.
    fn find_by_id(&self, id: &str) -> Option<Bounds>;

    /// Whether any element carries `id`.
    fn has_element(&self, id: &str) -> bool;

    /// Current vertical scroll offset.
    fn scroll_offset(&self) -> f64;

    /// Smoothly scroll so the viewport top rests at `top`.
    fn scroll_to(&mut self, top: f64);

    /// Add (`on == true`) or remove a marker on a navigation entry.
    fn toggle_marker(&mut self, entry: usize, marker: &str, on: bool) -> Result<(), TreeError>;

    /// Current value of the text input with `id`.
    fn input_value(&self, id: &str) -> Option<String>;

    /// Overwrite the value of the text input with `id`.
    fn set_input_value(&mut self, id: &str, value: &str) -> Result<(), TreeError>;

    /// Create `node` and insert it as the first child of the element `container_id`.
    fn insert_first_child(&mut self, container_id: &str, node: NodeSpec) -> Result<(), TreeError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_target_strips_hash() {
        assert_eq!(NavEntry::new(0, "#menu").anchor_target(), Some("menu"));
        assert_eq!(NavEntry::new(0, "#").anchor_target(), Some(""));
        assert_eq!(NavEntry::new(0, "menu.html").anchor_target(), None);
        assert_eq!(NavEntry::new(0, "https://x.test/#menu").anchor_target(), None);
    }

    #[test]
    fn is_internal_only_for_hash_prefix() {
        assert!(NavEntry::new(0, "#contacts").is_internal());
        assert!(!NavEntry::new(0, "").is_internal());
        assert!(!NavEntry::new(0, "tel:+380").is_internal());
    }

    #[test]
    fn error_display() {
        assert_eq!(
            TreeError::MissingElement("promo-container".into()).to_string(),
            "no element with id `promo-container`"
        );
        assert_eq!(
            TreeError::WrongKind {
                id: "x".into(),
                expected: "a text input"
            }
            .to_string(),
            "element `x` is not a text input"
        );
        assert_eq!(
            TreeError::NoSuchEntry(7).to_string(),
            "no navigation entry at index 7"
        );
        assert_eq!(TreeError::Host("boom".into()).to_string(), "host error: boom");
    }
}
