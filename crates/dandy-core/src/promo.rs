#![forbid(unsafe_code)]

//! Promotion cards composed from a client-side form.
//!
//! Submitting the form reads the title, description and price inputs and trims
//! them. If any is empty nothing happens at all: no card, no input cleared, no
//! message. Otherwise the three values are escaped, a card is inserted as the
//! first child of the container, and the inputs are cleared. Cards are never
//! deduplicated; submitting the same data twice yields two cards.

use crate::config::{CardStyle, PageConfig};
use crate::escape::Escaped;
use crate::event::Disposition;
use crate::tree::{ContentTree, NodeSpec};

/// Whitespace as browsers trim form values: Unicode `White_Space` without
/// NEL, plus the zero-width no-break space.
#[inline]
fn is_form_space(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{FEFF}'
}

/// Trim a raw form value the way the browser's string trim does.
pub fn trim_form_value(raw: &str) -> &str {
    raw.trim_matches(is_form_space)
}

/// A validated promotion with every field already escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionCard {
    pub title: Escaped,
    pub description: Escaped,
    pub price: Escaped,
}

impl PromotionCard {
    /// Validate raw form values.
    ///
    /// Each value is trimmed; returns `None` if any is empty afterwards.
    pub fn from_fields(title: &str, description: &str, price: &str) -> Option<Self> {
        let (title, description, price) = (
            trim_form_value(title),
            trim_form_value(description),
            trim_form_value(price),
        );
        if title.is_empty() || description.is_empty() || price.is_empty() {
            return None;
        }
        Some(Self {
            title: Escaped::new(title),
            description: Escaped::new(description),
            price: Escaped::new(price),
        })
    }

    /// Inner markup of the card.
    ///
    /// ```text
    /// <h3>{title}</h3>
    /// <p>{description}</p>
    /// <div class="card-footer">
    ///   <span class="price">{price}</span>
    ///   <button class="order-btn">{label}</button>
    /// </div>
    /// ```
    ///
    /// The order button carries no handler.
    pub fn inner_markup(&self, style: &CardStyle) -> String {
        format!(
            "<h3>{title}</h3>\
             <p>{desc}</p>\
             <div class=\"{footer}\">\
             <span class=\"{price_class}\">{price}</span>\
             <button class=\"{order_class}\">{label}</button>\
             </div>",
            title = self.title,
            desc = self.description,
            footer = style.footer_class,
            price_class = style.price_class,
            price = self.price,
            order_class = style.order_class,
            label = Escaped::new(&style.order_label),
        )
    }

    /// Element to insert for this card.
    pub fn to_node(&self, style: &CardStyle) -> NodeSpec {
        NodeSpec {
            tag: style.tag.clone(),
            class: style.class.clone(),
            inner_markup: self.inner_markup(style),
        }
    }
}

/// Submit handler for the promotion form.
#[derive(Debug, Clone)]
pub struct PromotionComposer {
    title_id: String,
    desc_id: String,
    price_id: String,
    container_id: String,
    style: CardStyle,
}

impl PromotionComposer {
    /// Build a composer if the form, its three inputs and the container all
    /// exist; `None` disables the feature.
    pub fn attach<T: ContentTree + ?Sized>(tree: &T, config: &PageConfig) -> Option<Self> {
        if !tree.has_element(&config.form_id) {
            crate::info!(form = %config.form_id, "no promotion form; composer disabled");
            return None;
        }
        let required = config
            .input_ids()
            .into_iter()
            .chain(std::iter::once(config.container_id.as_str()));
        for id in required {
            if !tree.has_element(id) {
                crate::warn!(id, "promotion form incomplete; composer disabled");
                return None;
            }
        }

        Some(Self {
            title_id: config.title_input_id.clone(),
            desc_id: config.desc_input_id.clone(),
            price_id: config.price_input_id.clone(),
            container_id: config.container_id.clone(),
            style: config.card.clone(),
        })
    }

    /// Read and validate the current form values.
    pub fn read<T: ContentTree + ?Sized>(&self, tree: &T) -> Option<PromotionCard> {
        let value = |id: &str| tree.input_value(id).unwrap_or_default();
        PromotionCard::from_fields(
            &value(&self.title_id),
            &value(&self.desc_id),
            &value(&self.price_id),
        )
    }

    /// Handle a form submission.
    ///
    /// The default submission is always suppressed.
    pub fn on_submit<T: ContentTree + ?Sized>(&self, tree: &mut T) -> Disposition {
        let Some(card) = self.read(tree) else {
            crate::debug!("promotion rejected: empty field");
            return Disposition::PreventDefault;
        };

        if let Err(err) = tree.insert_first_child(&self.container_id, card.to_node(&self.style)) {
            crate::warn!(%err, "failed to insert promotion card");
            return Disposition::PreventDefault;
        }
        crate::debug!(title = %card.title, "promotion card added");

        for id in [&self.title_id, &self.desc_id, &self.price_id] {
            if let Err(err) = tree.set_input_value(id, "") {
                crate::warn!(id = %id, %err, "failed to clear promotion input");
            }
        }
        Disposition::PreventDefault
    }
}
