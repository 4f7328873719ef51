#![forbid(unsafe_code)]

use std::cell::RefCell;
use std::rc::Rc;

use dandy_core::config::PageConfig;
use dandy_core::controller::PageController;
use dandy_core::event::PageEvent;
use dandy_core::geometry::{Bounds, Region};
use dandy_core::tree::{ContentTree, NavEntry, NodeSpec, TreeError};
use tracing::{debug, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, HtmlInputElement,
    HtmlTextAreaElement, NodeList, ScrollBehavior, ScrollToOptions, Window,
};

use crate::host::{
    Detach, ListenerSet, ListenerTarget, listener_plan, parse_config, resolve_scroll_offset,
    still_loading,
};

fn host_error(err: JsValue) -> TreeError {
    TreeError::Host(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

fn js_error(msg: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&msg.to_string())
}

fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// A text control the composer reads and clears.
enum TextField {
    Input(HtmlInputElement),
    Area(HtmlTextAreaElement),
}

impl TextField {
    fn value(&self) -> String {
        match self {
            Self::Input(el) => el.value(),
            Self::Area(el) => el.value(),
        }
    }

    fn set_value(&self, value: &str) {
        match self {
            Self::Input(el) => el.set_value(value),
            Self::Area(el) => el.set_value(value),
        }
    }
}

/// [`ContentTree`] over the live document.
///
/// Navigation links and sections are captured once at attach time, like the
/// listener set. Geometry is read fresh on every call.
#[derive(Clone)]
struct DomTree {
    window: Window,
    document: Document,
    nav_links: Vec<Element>,
    sections: Vec<HtmlElement>,
}

impl DomTree {
    fn capture(window: Window, config: &PageConfig) -> Result<Self, JsValue> {
        let document = window
            .document()
            .ok_or_else(|| js_error("window has no document"))?;
        let nav_links = elements(&document.query_selector_all(&config.nav_selector)?);
        let sections = elements(&document.query_selector_all(&config.region_selector)?)
            .into_iter()
            .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
            .collect();
        Ok(Self {
            window,
            document,
            nav_links,
            sections,
        })
    }

    fn text_field(&self, id: &str) -> Result<TextField, TreeError> {
        let el = self
            .document
            .get_element_by_id(id)
            .ok_or_else(|| TreeError::MissingElement(id.to_owned()))?;
        match el.dyn_into::<HtmlInputElement>() {
            Ok(input) => Ok(TextField::Input(input)),
            Err(el) => el
                .dyn_into::<HtmlTextAreaElement>()
                .map(TextField::Area)
                .map_err(|_| TreeError::WrongKind {
                    id: id.to_owned(),
                    expected: "a text input",
                }),
        }
    }
}

impl ContentTree for DomTree {
    fn nav_entries(&self) -> Vec<NavEntry> {
        self.nav_links
            .iter()
            .enumerate()
            .map(|(i, link)| NavEntry::new(i, link.get_attribute("href").unwrap_or_default()))
            .collect()
    }

    fn regions(&self) -> Vec<Region> {
        self.sections
            .iter()
            .map(|s| Region::new(s.id(), f64::from(s.offset_top()), f64::from(s.offset_height())))
            .collect()
    }

    fn find_by_id(&self, id: &str) -> Option<Bounds> {
        let el = self.document.get_element_by_id(id)?;
        let rect = el.get_bounding_client_rect();
        Some(Bounds::new(rect.top() + self.scroll_offset(), rect.height()))
    }

    fn has_element(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn scroll_offset(&self) -> f64 {
        resolve_scroll_offset(
            self.window.page_y_offset().ok(),
            self.document.document_element().map(|el| el.scroll_top()),
        )
    }

    fn scroll_to(&mut self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn toggle_marker(&mut self, entry: usize, marker: &str, on: bool) -> Result<(), TreeError> {
        let link = self
            .nav_links
            .get(entry)
            .ok_or(TreeError::NoSuchEntry(entry))?;
        link.class_list()
            .toggle_with_force(marker, on)
            .map(|_| ())
            .map_err(host_error)
    }

    fn input_value(&self, id: &str) -> Option<String> {
        self.text_field(id).ok().map(|field| field.value())
    }

    fn set_input_value(&mut self, id: &str, value: &str) -> Result<(), TreeError> {
        self.text_field(id)?.set_value(value);
        Ok(())
    }

    fn insert_first_child(&mut self, container_id: &str, node: NodeSpec) -> Result<(), TreeError> {
        let container = self
            .document
            .get_element_by_id(container_id)
            .ok_or_else(|| TreeError::MissingElement(container_id.to_owned()))?;
        let el = self.document.create_element(&node.tag).map_err(host_error)?;
        el.set_class_name(&node.class);
        el.set_inner_html(&node.inner_markup);
        container.prepend_with_node_1(&el).map_err(host_error)
    }
}

struct Session {
    controller: PageController,
    tree: RefCell<DomTree>,
}

impl Session {
    fn dispatch(&self, event: PageEvent, dom_event: &Event) {
        let Ok(mut tree) = self.tree.try_borrow_mut() else {
            debug!(kind = event.dom_type(), "re-entrant event dropped");
            return;
        };
        if self.controller.handle(&mut *tree, &event).is_prevented() {
            dom_event.prevent_default();
        }
    }
}

struct Listener {
    target: EventTarget,
    dom_type: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Detach for Listener {
    fn detach(&self) {
        if let Err(err) = self
            .target
            .remove_event_listener_with_callback(self.dom_type, self.callback.as_ref().unchecked_ref())
        {
            warn!(?err, dom_type = self.dom_type, "failed to remove listener");
        }
    }
}

/// The controller attached to the current document.
///
/// Listeners stay installed until [`DandyPage::destroy`] is called or the
/// object is freed; freeing removes them too.
#[wasm_bindgen]
pub struct DandyPage {
    session: Option<Rc<Session>>,
    listeners: ListenerSet<Listener>,
}

#[wasm_bindgen]
impl DandyPage {
    /// Attach to the document now. `config_json` optionally overrides any
    /// subset of the page conventions.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<DandyPage, JsValue> {
        let config = parse_config(config_json.as_deref()).map_err(js_error)?;
        let form_id = config.form_id.clone();
        let window = web_sys::window().ok_or_else(|| js_error("no global window"))?;
        let tree = DomTree::capture(window.clone(), &config)?;
        let controller = PageController::initialize(&tree, config);
        let subs = controller.subscriptions(&tree);

        let session = Rc::new(Session {
            controller,
            tree: RefCell::new(tree),
        });

        // Dropped on any early return, which removes what was installed.
        let mut listeners = ListenerSet::new();
        for spec in listener_plan(&subs) {
            let target: EventTarget = {
                let tree = session.tree.borrow();
                match spec.target {
                    ListenerTarget::NavEntry(i) => match tree.nav_links.get(i) {
                        Some(link) => link.clone().into(),
                        None => continue,
                    },
                    ListenerTarget::Window => window.clone().into(),
                    ListenerTarget::Form => match tree.document.get_element_by_id(&form_id) {
                        Some(form) => form.into(),
                        None => continue,
                    },
                }
            };
            let handler = Rc::clone(&session);
            let event = spec.event;
            let callback = Closure::<dyn FnMut(Event)>::new(move |e: Event| {
                handler.dispatch(event, &e);
            });
            target.add_event_listener_with_callback(spec.dom_type, callback.as_ref().unchecked_ref())?;
            listeners.push(Listener {
                target,
                dom_type: spec.dom_type,
                callback,
            });
        }

        info!(listeners = listeners.len(), "dandy page attached");
        Ok(Self {
            session: Some(session),
            listeners,
        })
    }

    /// Whether the promotion form was found and wired.
    #[wasm_bindgen(js_name = composerEnabled)]
    pub fn composer_enabled(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.controller.composer_enabled())
    }

    /// Number of installed DOM listeners.
    #[wasm_bindgen(js_name = listenerCount)]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Remove every listener and release the document.
    pub fn destroy(&mut self) {
        self.listeners.detach_all();
        self.session = None;
    }
}

thread_local! {
    static INSTALLED: RefCell<Option<DandyPage>> = const { RefCell::new(None) };
}

fn install_now(config_json: Option<String>) -> Result<(), JsValue> {
    let page = DandyPage::new(config_json)?;
    INSTALLED.with(|slot| {
        if let Some(mut previous) = slot.borrow_mut().replace(page) {
            previous.destroy();
        }
    });
    Ok(())
}

/// Attach a page-lifetime controller once the document structure exists:
/// immediately if parsing is done, otherwise on `DOMContentLoaded`.
#[wasm_bindgen]
pub fn install(config_json: Option<String>) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| js_error("no global document"))?;

    if !still_loading(&document.ready_state()) {
        return install_now(config_json);
    }

    let deferred = Closure::once_into_js(move || {
        if let Err(err) = install_now(config_json) {
            warn!(?err, "deferred install failed");
        }
    });
    document.add_event_listener_with_callback("DOMContentLoaded", deferred.unchecked_ref())
}
