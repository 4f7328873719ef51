#![forbid(unsafe_code)]

//! Scroll-driven navigation highlighting.
//!
//! On every scroll notification, each region's band
//! `[top - band_offset, top - band_offset + height)` is recomputed from the
//! current layout and tested against the scroll offset. The first navigation
//! entry targeting `#<region-id>` gets the active marker when the offset is in
//! the band and loses it otherwise. Regions without a matching entry are
//! skipped.
//!
//! # Invariants
//!
//! 1. Nothing is cached between events; the marker state after an event
//!    depends only on the layout and offset at that event.
//! 2. Repeating an event with the same layout and offset yields the same
//!    marker state.
//! 3. With non-overlapping bands at most one entry is active. Overlapping
//!    bands (regions closer than `band_offset` apart) may activate several
//!    entries at once; that is kept as-is.

use crate::geometry::Region;
use crate::tree::{ContentTree, NavEntry};

/// One marker write produced by a scroll evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerUpdate {
    /// Navigation entry index.
    pub entry: usize,
    /// Whether the marker should be present.
    pub active: bool,
}

/// Scroll handler that toggles the active marker.
#[derive(Debug, Clone)]
pub struct ScrollSpy {
    entries: Vec<NavEntry>,
    band_offset: f64,
    marker: String,
}

impl ScrollSpy {
    /// Create a spy over the entries captured at initialization.
    pub fn new(entries: Vec<NavEntry>, band_offset: f64, marker: impl Into<String>) -> Self {
        Self {
            entries,
            band_offset,
            marker: marker.into(),
        }
    }

    /// The marker this spy toggles.
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// First entry whose target is exactly `#<region_id>`.
    pub fn entry_for(&self, region_id: &str) -> Option<&NavEntry> {
        self.entries
            .iter()
            .find(|e| e.anchor_target() == Some(region_id))
    }

    /// Marker writes for `regions` at scroll offset `offset`, in region order.
    ///
    /// Pure: no tree access.
    pub fn evaluate(&self, regions: &[Region], offset: f64) -> Vec<MarkerUpdate> {
        regions
            .iter()
            .filter_map(|region| {
                let entry = self.entry_for(&region.id)?;
                Some(MarkerUpdate {
                    entry: entry.index,
                    active: region.band(self.band_offset).contains(offset),
                })
            })
            .collect()
    }

    /// Handle a scroll notification.
    pub fn on_scroll<T: ContentTree + ?Sized>(&self, tree: &mut T) {
        let offset = tree.scroll_offset();
        let regions = tree.regions();
        let updates = self.evaluate(&regions, offset);
        crate::trace!(offset, regions = regions.len(), "scroll spy pass");

        for update in updates {
            if let Err(err) = tree.toggle_marker(update.entry, &self.marker, update.active) {
                crate::warn!(entry = update.entry, %err, "failed to toggle nav marker");
            }
        }
    }
}
