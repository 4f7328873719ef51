#![forbid(unsafe_code)]

//! Vertical geometry for content regions.
//!
//! All positions are document coordinates in CSS pixels: `0.0` is the top of
//! the page and values grow downward. Fractional values are allowed because
//! browsers report sub-pixel layout.

/// A content region in the main page area.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Region {
    /// Unique element identifier (matched against `#<id>` navigation targets).
    pub id: String,
    /// Top edge in document coordinates.
    pub top: f64,
    /// Laid-out height.
    pub height: f64,
}

impl Region {
    /// Create a new region.
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    /// The navigation target that refers to this region.
    pub fn anchor(&self) -> String {
        format!("#{}", self.id)
    }

    /// The scroll-spy band of this region, shifted up by `offset`.
    #[inline]
    pub fn band(&self, offset: f64) -> Band {
        Band::new(self.top - offset, self.height)
    }
}

/// Half-open vertical interval `[start, end)`.
///
/// A region's band starts `offset` units above its top edge so the matching
/// navigation entry lights up slightly before the region reaches the top of
/// the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    /// Start (inclusive).
    pub start: f64,
    /// End (exclusive).
    pub end: f64,
}

impl Band {
    /// Create a band starting at `start` spanning `height` units.
    #[inline]
    pub fn new(start: f64, height: f64) -> Self {
        Self {
            start,
            end: start + height,
        }
    }

    /// Whether `y` lies in `[start, end)`.
    #[inline]
    pub fn contains(&self, y: f64) -> bool {
        y >= self.start && y < self.end
    }

    /// Check if the band is empty (zero or negative height).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether two bands share at least one point.
    pub fn overlaps(&self, other: &Band) -> bool {
        !self.is_empty() && !other.is_empty() && self.start < other.end && other.start < self.end
    }
}

/// Document-coordinate bounds of an arbitrary element, as returned by
/// [`ContentTree::find_by_id`](crate::tree::ContentTree::find_by_id).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    /// Top edge in document coordinates.
    pub top: f64,
    /// Height.
    pub height: f64,
}

impl Bounds {
    /// Create new bounds.
    #[inline]
    pub const fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }
}

impl From<&Region> for Bounds {
    fn from(region: &Region) -> Self {
        Self::new(region.top, region.height)
    }
}
