#![forbid(unsafe_code)]

//! Anchor navigation with header compensation.
//!
//! Clicking an entry whose target is `#<id>` never follows the link. Instead
//! the viewport scrolls so the element's top edge rests `header_offset` units
//! below the viewport top, clear of the fixed header. A target that does not
//! exist still suppresses the link but scrolls nowhere. Any other target is
//! left to the host.

use crate::event::Disposition;
use crate::tree::{ContentTree, NavEntry};

/// Final scroll offset that places `element_top` just below the header.
#[inline]
pub fn scroll_target(element_top: f64, header_offset: f64) -> f64 {
    element_top - header_offset
}

/// Click handler for navigation entries.
#[derive(Debug, Clone)]
pub struct NavigationScroller {
    entries: Vec<NavEntry>,
    header_offset: f64,
}

impl NavigationScroller {
    /// Create a scroller over the entries captured at initialization.
    pub fn new(entries: Vec<NavEntry>, header_offset: f64) -> Self {
        Self {
            entries,
            header_offset,
        }
    }

    /// Entries this scroller intercepts clicks for.
    pub fn intercepted(&self) -> impl Iterator<Item = &NavEntry> {
        self.entries.iter().filter(|e| e.is_internal())
    }

    /// Handle a click on entry `index`.
    pub fn on_click<T: ContentTree + ?Sized>(&self, tree: &mut T, index: usize) -> Disposition {
        let Some(entry) = self.entries.get(index) else {
            crate::debug!(index, "click on unknown navigation entry");
            return Disposition::Default;
        };
        let Some(id) = entry.anchor_target() else {
            crate::trace!(href = %entry.href, "external navigation left to host");
            return Disposition::Default;
        };

        match tree.find_by_id(id) {
            Some(bounds) => {
                let top = scroll_target(bounds.top, self.header_offset);
                crate::trace!(id, top, "scrolling to anchor");
                tree.scroll_to(top);
            }
            None => {
                crate::debug!(id, "anchor target missing; click suppressed");
            }
        }
        Disposition::PreventDefault
    }
}
