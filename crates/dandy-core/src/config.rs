#![forbid(unsafe_code)]

//! Attachment conventions and tuning constants.
//!
//! [`PageConfig::default`] describes the Dandy site as shipped. Hosts that lay
//! out an equivalent page differently override individual fields; with the
//! `serde` feature any subset can come from a JSON/TOML document.

/// Fixed header height compensated for when scrolling to an anchor.
pub const DEFAULT_HEADER_OFFSET: f64 = 60.0;

/// How far above a region's top edge its scroll-spy band starts.
pub const DEFAULT_SPY_BAND_OFFSET: f64 = 70.0;

/// Marker toggled on the navigation entry of the region in view.
pub const DEFAULT_ACTIVE_MARKER: &str = "active";

/// Configuration for the page interaction controller.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct PageConfig {
    /// Selector for navigation entries.
    /// Default: `.nav-list a`
    pub nav_selector: String,

    /// Selector for content regions.
    /// Default: `main > section`
    pub region_selector: String,

    /// Id of the promotion form. When absent from the page the composer is
    /// disabled.
    /// Default: `promo-form`
    pub form_id: String,

    /// Id of the title input.
    pub title_input_id: String,

    /// Id of the description input.
    pub desc_input_id: String,

    /// Id of the price input.
    pub price_input_id: String,

    /// Id of the container new cards are prepended to.
    pub container_id: String,

    /// Distance between the viewport top and a scrolled-to anchor.
    /// Default: 60.0
    pub header_offset: f64,

    /// Upward shift applied to every region's scroll-spy band.
    /// Default: 70.0
    pub spy_band_offset: f64,

    /// Marker (CSS class) for the active navigation entry.
    pub active_marker: String,

    /// Card markup classes and the label of the inert order button.
    pub card: CardStyle,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            nav_selector: ".nav-list a".into(),
            region_selector: "main > section".into(),
            form_id: "promo-form".into(),
            title_input_id: "promo-title".into(),
            desc_input_id: "promo-desc".into(),
            price_input_id: "promo-price".into(),
            container_id: "promo-container".into(),
            header_offset: DEFAULT_HEADER_OFFSET,
            spy_band_offset: DEFAULT_SPY_BAND_OFFSET,
            active_marker: DEFAULT_ACTIVE_MARKER.into(),
            card: CardStyle::default(),
        }
    }
}

impl PageConfig {
    /// Set the header offset.
    #[must_use]
    pub fn header_offset(mut self, offset: f64) -> Self {
        self.header_offset = offset;
        self
    }

    /// Set the scroll-spy band offset.
    #[must_use]
    pub fn spy_band_offset(mut self, offset: f64) -> Self {
        self.spy_band_offset = offset;
        self
    }

    /// Set the active marker.
    #[must_use]
    pub fn active_marker(mut self, marker: impl Into<String>) -> Self {
        self.active_marker = marker.into();
        self
    }

    /// Ids of the three promotion inputs in title, description, price order.
    pub fn input_ids(&self) -> [&str; 3] {
        [
            &self.title_input_id,
            &self.desc_input_id,
            &self.price_input_id,
        ]
    }
}

/// Classes used in generated promotion card markup.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct CardStyle {
    /// Tag of the card root element.
    pub tag: String,
    /// Class of the card root element.
    pub class: String,
    /// Class of the footer row holding price and order button.
    pub footer_class: String,
    /// Class of the price span.
    pub price_class: String,
    /// Class of the order button.
    pub order_class: String,
    /// Visible label of the order button.
    pub order_label: String,
}

impl Default for CardStyle {
    fn default() -> Self {
        Self {
            tag: "div".into(),
            class: "card".into(),
            footer_class: "card-footer".into(),
            price_class: "price".into(),
            order_class: "order-btn".into(),
            order_label: "Заказать".into(),
        }
    }
}
