#![forbid(unsafe_code)]

//! The page interaction controller.
//!
//! [`PageController::initialize`] is called once, after the page structure
//! exists. It snapshots the navigation list and checks which features have
//! their attachment points, then [`PageController::handle`] dispatches each
//! host event to the matching behavior. The three behaviors share nothing but
//! the tree, and each touches a disjoint part of it.

use crate::config::PageConfig;
use crate::event::{Disposition, PageEvent};
use crate::nav_scroller::NavigationScroller;
use crate::promo::PromotionComposer;
use crate::scroll_spy::ScrollSpy;
use crate::tree::ContentTree;

/// Which event sources the host must subscribe to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscriptions {
    /// Navigation entries that need a click listener.
    pub click_entries: Vec<usize>,
    /// Whether to listen for scroll on the window.
    pub scroll: bool,
    /// Whether to listen for submit on the promotion form.
    pub submit: bool,
}

/// Wires the navigation scroller, scroll spy and promotion composer to a page.
#[derive(Debug, Clone)]
pub struct PageController {
    config: PageConfig,
    scroller: NavigationScroller,
    spy: ScrollSpy,
    form_present: bool,
    composer: Option<PromotionComposer>,
}

impl PageController {
    /// Attach to a page whose structure is in place.
    pub fn initialize<T: ContentTree + ?Sized>(tree: &T, config: PageConfig) -> Self {
        let entries = tree.nav_entries();
        let scroller = NavigationScroller::new(entries.clone(), config.header_offset);
        let spy = ScrollSpy::new(entries, config.spy_band_offset, config.active_marker.clone());
        let form_present = tree.has_element(&config.form_id);
        let composer = PromotionComposer::attach(tree, &config);

        crate::info!(
            nav_entries = scroller.intercepted().count(),
            composer = composer.is_some(),
            "page controller initialized"
        );

        Self {
            config,
            scroller,
            spy,
            form_present,
            composer,
        }
    }

    /// The configuration the controller was built with.
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Whether the promotion form exists, complete or not.
    pub fn form_present(&self) -> bool {
        self.form_present
    }

    /// Whether the promotion form, its inputs and the container were found.
    pub fn composer_enabled(&self) -> bool {
        self.composer.is_some()
    }

    /// Event sources the host should subscribe to.
    ///
    /// Every navigation entry gets a click listener (external entries decline
    /// in the handler), scroll is always observed, and submit whenever the
    /// form exists so its native submission is always suppressed.
    pub fn subscriptions<T: ContentTree + ?Sized>(&self, tree: &T) -> Subscriptions {
        Subscriptions {
            click_entries: tree.nav_entries().into_iter().map(|e| e.index).collect(),
            scroll: true,
            submit: self.form_present,
        }
    }

    /// Dispatch one host event.
    pub fn handle<T: ContentTree + ?Sized>(&self, tree: &mut T, event: &PageEvent) -> Disposition {
        match *event {
            PageEvent::Click { entry } => self.on_click(tree, entry),
            PageEvent::Scroll => {
                self.on_scroll(tree);
                Disposition::Default
            }
            PageEvent::Submit => self.on_submit(tree),
        }
    }

    /// Navigation entry `entry` was clicked.
    pub fn on_click<T: ContentTree + ?Sized>(&self, tree: &mut T, entry: usize) -> Disposition {
        self.scroller.on_click(tree, entry)
    }

    /// The scroll offset changed.
    pub fn on_scroll<T: ContentTree + ?Sized>(&self, tree: &mut T) {
        self.spy.on_scroll(tree);
    }

    /// The promotion form was submitted.
    ///
    /// A present but incomplete form still has its default submission
    /// suppressed; nothing else happens.
    pub fn on_submit<T: ContentTree + ?Sized>(&self, tree: &mut T) -> Disposition {
        match &self.composer {
            Some(composer) => composer.on_submit(tree),
            None if self.form_present => {
                crate::debug!("promotion form incomplete; submit ignored");
                Disposition::PreventDefault
            }
            None => Disposition::Default,
        }
    }
}
