#![forbid(unsafe_code)]

//! Host-side decisions that do not need a browser.
//!
//! The wasm bindings only move values between the DOM and these helpers, so
//! everything here is tested natively:
//! - which listeners to install for a controller's [`Subscriptions`],
//! - how to read the scroll offset from the two DOM sources,
//! - how to parse a JSON configuration override,
//! - when installed listeners are removed again.

use std::fmt;

use dandy_core::config::PageConfig;
use dandy_core::controller::Subscriptions;
use dandy_core::event::PageEvent;

/// Where a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerTarget {
    /// The navigation link at this index.
    NavEntry(usize),
    /// The window.
    Window,
    /// The promotion form.
    Form,
}

/// One `addEventListener` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerSpec {
    pub target: ListenerTarget,
    /// DOM event type.
    pub dom_type: &'static str,
    /// Controller event fired when the listener runs.
    pub event: PageEvent,
}

impl ListenerSpec {
    fn new(target: ListenerTarget, event: PageEvent) -> Self {
        Self {
            target,
            dom_type: event.dom_type(),
            event,
        }
    }
}

/// Listeners to install for `subs`, in install order: nav clicks, window
/// scroll, form submit.
pub fn listener_plan(subs: &Subscriptions) -> Vec<ListenerSpec> {
    let mut plan: Vec<ListenerSpec> = subs
        .click_entries
        .iter()
        .map(|&entry| ListenerSpec::new(ListenerTarget::NavEntry(entry), PageEvent::Click { entry }))
        .collect();
    if subs.scroll {
        plan.push(ListenerSpec::new(ListenerTarget::Window, PageEvent::Scroll));
    }
    if subs.submit {
        plan.push(ListenerSpec::new(ListenerTarget::Form, PageEvent::Submit));
    }
    plan
}

/// An installed listener that can remove itself from its target.
pub trait Detach {
    fn detach(&self);
}

/// Listeners installed so far.
///
/// Every listener is detached on [`ListenerSet::detach_all`] or when the set
/// is dropped, so a partially built set or a freed page never leaves a
/// callback registered in the DOM after its closure is gone.
pub struct ListenerSet<L: Detach> {
    installed: Vec<L>,
}

impl<L: Detach> ListenerSet<L> {
    pub fn new() -> Self {
        Self {
            installed: Vec::new(),
        }
    }

    pub fn push(&mut self, listener: L) {
        self.installed.push(listener);
    }

    pub fn len(&self) -> usize {
        self.installed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.installed.is_empty()
    }

    /// Detach in install order and forget every listener.
    pub fn detach_all(&mut self) {
        for listener in self.installed.drain(..) {
            listener.detach();
        }
    }
}

impl<L: Detach> Default for ListenerSet<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Detach> Drop for ListenerSet<L> {
    fn drop(&mut self) {
        self.detach_all();
    }
}

/// Whether `document.readyState` says parsing is still in progress, so
/// attaching has to wait for `DOMContentLoaded`.
pub fn still_loading(ready_state: &str) -> bool {
    ready_state == "loading"
}

/// Vertical scroll offset: `pageYOffset`, or the document element's
/// `scrollTop` when the former is unavailable, zero or NaN.
pub fn resolve_scroll_offset(page_y_offset: Option<f64>, scroll_top: Option<i32>) -> f64 {
    match page_y_offset {
        Some(y) if y != 0.0 && !y.is_nan() => y,
        _ => scroll_top.map_or(0.0, f64::from),
    }
}

/// Configuration parse error.
#[derive(Debug)]
pub enum ConfigError {
    /// The override is not valid JSON for [`PageConfig`].
    Json(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid page config: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
        }
    }
}

/// Parse an optional JSON override. Missing fields keep their defaults; a
/// missing or blank document yields [`PageConfig::default`].
pub fn parse_config(json: Option<&str>) -> Result<PageConfig, ConfigError> {
    match json.map(str::trim) {
        None | Some("") => Ok(PageConfig::default()),
        Some(doc) => serde_json::from_str(doc).map_err(ConfigError::Json),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn plan_covers_every_subscription_in_order() {
        let subs = Subscriptions {
            click_entries: vec![0, 1],
            scroll: true,
            submit: true,
        };
        let plan = listener_plan(&subs);
        assert_eq!(
            plan.iter().map(|s| (s.target, s.dom_type)).collect::<Vec<_>>(),
            vec![
                (ListenerTarget::NavEntry(0), "click"),
                (ListenerTarget::NavEntry(1), "click"),
                (ListenerTarget::Window, "scroll"),
                (ListenerTarget::Form, "submit"),
            ]
        );
        assert_eq!(plan[1].event, PageEvent::Click { entry: 1 });
    }

    #[test]
    fn plan_skips_submit_without_form() {
        let subs = Subscriptions {
            click_entries: vec![],
            scroll: true,
            submit: false,
        };
        let plan = listener_plan(&subs);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].event, PageEvent::Scroll);
    }

    struct Recorded {
        name: &'static str,
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl Detach for Recorded {
        fn detach(&self) {
            self.log.borrow_mut().push(self.name);
        }
    }

    fn recorded(log: &Rc<RefCell<Vec<&'static str>>>, names: &[&'static str]) -> ListenerSet<Recorded> {
        let mut set = ListenerSet::new();
        for &name in names {
            set.push(Recorded {
                name,
                log: Rc::clone(log),
            });
        }
        set
    }

    #[test]
    fn detach_all_empties_the_set() {
        let log = Rc::default();
        let mut set = recorded(&log, &["click", "scroll", "submit"]);
        assert_eq!(set.len(), 3);
        set.detach_all();
        assert!(set.is_empty());
        assert_eq!(*log.borrow(), vec!["click", "scroll", "submit"]);

        drop(set);
        assert_eq!(log.borrow().len(), 3);
    }

    #[test]
    fn dropping_the_set_detaches_every_listener() {
        let log = Rc::default();
        drop(recorded(&log, &["click", "scroll"]));
        assert_eq!(*log.borrow(), vec!["click", "scroll"]);
    }

    #[test]
    fn failed_install_unwinds_earlier_listeners() {
        fn install(log: &Rc<RefCell<Vec<&'static str>>>) -> Result<ListenerSet<Recorded>, &'static str> {
            let mut set = ListenerSet::new();
            for name in ["click", "scroll", "submit"] {
                if name == "submit" {
                    return Err("addEventListener failed");
                }
                set.push(Recorded {
                    name,
                    log: Rc::clone(log),
                });
            }
            Ok(set)
        }

        let log = Rc::default();
        assert!(install(&log).is_err());
        assert_eq!(*log.borrow(), vec!["click", "scroll"]);
    }

    #[test]
    fn only_loading_state_defers_install() {
        assert!(still_loading("loading"));
        assert!(!still_loading("interactive"));
        assert!(!still_loading("complete"));
    }

    #[test]
    fn scroll_offset_prefers_page_y_offset() {
        assert_eq!(resolve_scroll_offset(Some(420.5), Some(10)), 420.5);
    }

    #[test]
    fn scroll_offset_falls_back_to_scroll_top() {
        assert_eq!(resolve_scroll_offset(Some(0.0), Some(300)), 300.0);
        assert_eq!(resolve_scroll_offset(None, Some(12)), 12.0);
        assert_eq!(resolve_scroll_offset(Some(f64::NAN), Some(7)), 7.0);
        assert_eq!(resolve_scroll_offset(None, None), 0.0);
    }

    #[test]
    fn missing_or_blank_config_is_default() {
        assert_eq!(parse_config(None).unwrap(), PageConfig::default());
        assert_eq!(parse_config(Some("  ")).unwrap(), PageConfig::default());
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let config = parse_config(Some(r#"{"header_offset": 80, "card": {"order_label": "Order"}}"#))
            .unwrap();
        assert_eq!(config.header_offset, 80.0);
        assert_eq!(config.spy_band_offset, 70.0);
        assert_eq!(config.card.order_label, "Order");
        assert_eq!(config.card.class, "card");
    }

    #[test]
    fn malformed_config_is_reported() {
        let err = parse_config(Some("{header_offset")).unwrap_err();
        assert!(err.to_string().starts_with("invalid page config:"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
