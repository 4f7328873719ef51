#![forbid(unsafe_code)]

//! Headless in-memory [`ContentTree`].
//!
//! Models exactly what the controller can observe: navigation entries with
//! marker sets, positioned regions and elements, text inputs, and card
//! containers. Scrolling settles immediately (no animation), and every scroll
//! request is recorded so callers can assert on it.
//!
//! Used by the replay harness and by tests.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::PageConfig;
use crate::geometry::{Bounds, Region};
use crate::tree::{ContentTree, NavEntry, NodeSpec, TreeError};

/// A navigation entry with its current markers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MemoryNavEntry {
    pub href: String,
    pub markers: BTreeSet<String>,
}

/// In-memory page model.
#[derive(Debug, Clone, Default)]
pub struct MemoryTree {
    nav: Vec<MemoryNavEntry>,
    regions: Vec<Region>,
    elements: BTreeMap<String, Bounds>,
    plain: BTreeSet<String>,
    inputs: BTreeMap<String, String>,
    containers: BTreeMap<String, Vec<NodeSpec>>,
    scroll_offset: f64,
    scroll_requests: Vec<f64>,
}

impl MemoryTree {
    /// Create an empty page.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a navigation entry.
    #[must_use]
    pub fn with_nav(mut self, href: impl Into<String>) -> Self {
        self.nav.push(MemoryNavEntry {
            href: href.into(),
            markers: BTreeSet::new(),
        });
        self
    }

    /// Append a content region.
    #[must_use]
    pub fn with_region(mut self, id: impl Into<String>, top: f64, height: f64) -> Self {
        self.regions.push(Region::new(id, top, height));
        self
    }

    /// Add a positioned element outside the region list.
    #[must_use]
    pub fn with_element(mut self, id: impl Into<String>, bounds: Bounds) -> Self {
        self.elements.insert(id.into(), bounds);
        self
    }

    /// Add an element that has an id but no role the controller cares about.
    #[must_use]
    pub fn with_plain(mut self, id: impl Into<String>) -> Self {
        self.plain.insert(id.into());
        self
    }

    /// Add a text input.
    #[must_use]
    pub fn with_input(mut self, id: impl Into<String>, value: impl Into<String>) -> Self {
        self.inputs.insert(id.into(), value.into());
        self
    }

    /// Add an empty card container.
    #[must_use]
    pub fn with_container(mut self, id: impl Into<String>) -> Self {
        self.containers.insert(id.into(), Vec::new());
        self
    }

    /// Add the promotion form, its three empty inputs and the card container,
    /// using the ids from `config`.
    #[must_use]
    pub fn with_promo_form(self, config: &PageConfig) -> Self {
        let [title, desc, price] = config.input_ids();
        self.with_plain(config.form_id.clone())
            .with_input(title, "")
            .with_input(desc, "")
            .with_input(price, "")
            .with_container(config.container_id.clone())
    }

    /// Set the initial scroll offset.
    #[must_use]
    pub fn with_scroll_offset(mut self, offset: f64) -> Self {
        self.scroll_offset = offset;
        self
    }

    /// Move the viewport without recording a scroll request (user scrolling).
    pub fn set_scroll_offset(&mut self, offset: f64) {
        self.scroll_offset = offset;
    }

    /// Type into an input, as a user would.
    pub fn fill(&mut self, id: &str, value: &str) -> Result<(), TreeError> {
        self.set_input_value(id, value)
    }

    /// Scroll requests issued through [`ContentTree::scroll_to`], oldest first.
    pub fn scroll_requests(&self) -> &[f64] {
        &self.scroll_requests
    }

    /// Drain recorded scroll requests.
    pub fn take_scroll_requests(&mut self) -> Vec<f64> {
        std::mem::take(&mut self.scroll_requests)
    }

    /// Navigation entries with their markers.
    pub fn nav(&self) -> &[MemoryNavEntry] {
        &self.nav
    }

    /// Whether `entry` currently carries `marker`.
    pub fn is_marked(&self, entry: usize, marker: &str) -> bool {
        self.nav
            .get(entry)
            .is_some_and(|e| e.markers.contains(marker))
    }

    /// Indices of entries carrying `marker`, ascending.
    pub fn marked_entries(&self, marker: &str) -> Vec<usize> {
        self.nav
            .iter()
            .enumerate()
            .filter(|(_, e)| e.markers.contains(marker))
            .map(|(i, _)| i)
            .collect()
    }

    /// Children of a container, first child first.
    pub fn children(&self, container_id: &str) -> &[NodeSpec] {
        self.containers
            .get(container_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All inputs and their values.
    pub fn inputs(&self) -> &BTreeMap<String, String> {
        &self.inputs
    }
}

impl ContentTree for MemoryTree {
    fn nav_entries(&self) -> Vec<NavEntry> {
        self.nav
            .iter()
            .enumerate()
            .map(|(i, e)| NavEntry::new(i, e.href.clone()))
            .collect()
    }

    fn regions(&self) -> Vec<Region> {
        self.regions.clone()
    }

    fn find_by_id(&self, id: &str) -> Option<Bounds> {
        self.regions
            .iter()
            .find(|r| r.id == id)
            .map(Bounds::from)
            .or_else(|| self.elements.get(id).copied())
    }

    fn has_element(&self, id: &str) -> bool {
        self.find_by_id(id).is_some()
            || self.plain.contains(id)
            || self.inputs.contains_key(id)
            || self.containers.contains_key(id)
    }

    fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    fn scroll_to(&mut self, top: f64) {
        self.scroll_offset = top;
        self.scroll_requests.push(top);
    }

    fn toggle_marker(&mut self, entry: usize, marker: &str, on: bool) -> Result<(), TreeError> {
        let e = self
            .nav
            .get_mut(entry)
            .ok_or(TreeError::NoSuchEntry(entry))?;
        if on {
            e.markers.insert(marker.to_owned());
        } else {
            e.markers.remove(marker);
        }
        Ok(())
    }

    fn input_value(&self, id: &str) -> Option<String> {
        self.inputs.get(id).cloned()
    }

    fn set_input_value(&mut self, id: &str, value: &str) -> Result<(), TreeError> {
        if let Some(slot) = self.inputs.get_mut(id) {
            value.clone_into(slot);
            return Ok(());
        }
        if self.has_element(id) {
            Err(TreeError::WrongKind {
                id: id.to_owned(),
                expected: "a text input",
            })
        } else {
            Err(TreeError::MissingElement(id.to_owned()))
        }
    }

    fn insert_first_child(&mut self, container_id: &str, node: NodeSpec) -> Result<(), TreeError> {
        if let Some(children) = self.containers.get_mut(container_id) {
            children.insert(0, node);
            return Ok(());
        }
        if self.has_element(container_id) {
            Err(TreeError::WrongKind {
                id: container_id.to_owned(),
                expected: "a container",
            })
        } else {
            Err(TreeError::MissingElement(container_id.to_owned()))
        }
    }
}
