//! Browser backend.
//!
//! Wires a [`ThemeController`] to `localStorage`, the live document,
//! `setTimeout` and the `prefers-color-scheme` media query.
//!
//! ```rust,ignore
//! #[wasm_bindgen(start)]
//! pub fn start() {
//!     let _controller = theme_toggle::web::install(ToggleConfig::default());
//! }
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::time::Duration;

use tracing::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, MediaQueryListEvent, Storage, Window};

use crate::config::ToggleConfig;
use crate::controller::ThemeController;
use crate::page::{Page, ToggleView};
use crate::store::{PreferenceStore, StoreError};
use crate::theme::ThemeMode;
use crate::timer::{Scheduler, TimerId, TimerTask};

/// Media query matching an OS-level dark color scheme.
pub const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

pub type WebController = ThemeController<LocalStorage, DomPage, WebScheduler>;

fn js_error(e: JsValue) -> String {
    format!("{:?}", e)
}

/// The origin's `localStorage`.
pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    pub fn from_window(window: &Window) -> Result<Self, StoreError> {
        match window.local_storage() {
            Ok(Some(storage)) => Ok(Self { storage }),
            Ok(None) => Err(StoreError::Unavailable(
                "localStorage is not available".to_string(),
            )),
            Err(e) => Err(StoreError::Unavailable(js_error(e))),
        }
    }
}

impl PreferenceStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage
            .get_item(key)
            .map_err(|e| StoreError::Unavailable(js_error(e)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StoreError::Unavailable(js_error(e)))
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.storage
            .remove_item(key)
            .map_err(|e| StoreError::Unavailable(js_error(e)))
    }
}

/// The live document.
pub struct DomPage {
    document: Document,
    root: Element,
    toggle: Option<HtmlElement>,
}

impl DomPage {
    /// Returns `None` when the document has no root element.
    pub fn new(document: Document) -> Option<Self> {
        let root = document.document_element()?;
        Some(Self {
            document,
            root,
            toggle: None,
        })
    }

    /// The mounted toggle button, if any.
    pub fn toggle_element(&self) -> Option<&HtmlElement> {
        self.toggle.as_ref()
    }
}

fn render_toggle(button: &HtmlElement, view: &ToggleView) {
    button.set_inner_html(&view.glyph.to_html());
    if let Err(e) = button.style().set_property("transform", &view.transform()) {
        warn!(error = %js_error(e), "cannot rotate toggle");
    }
}

impl Page for DomPage {
    fn root_attribute(&self, name: &str) -> Option<String> {
        self.root.get_attribute(name)
    }

    fn set_root_attribute(&mut self, name: &str, value: &str) {
        if let Err(e) = self.root.set_attribute(name, value) {
            warn!(error = %js_error(e), attribute = name, "cannot set root attribute");
        }
    }

    fn set_root_transition(&mut self, transition: Option<&str>) {
        let Some(root) = self.root.dyn_ref::<HtmlElement>() else {
            return;
        };
        let style = root.style();
        let result = match transition {
            Some(value) => style.set_property("transition", value),
            None => style.remove_property("transition").map(|_| ()),
        };
        if let Err(e) = result {
            warn!(error = %js_error(e), "cannot update root transition");
        }
    }

    fn append_toggle(&mut self, view: &ToggleView) {
        let Some(body) = self.document.body() else {
            warn!("document has no body, toggle not mounted");
            return;
        };
        let button = match self.document.create_element("button") {
            Ok(element) => element.unchecked_into::<HtmlElement>(),
            Err(e) => {
                warn!(error = %js_error(e), "cannot create toggle");
                return;
            }
        };
        button.set_class_name(&view.class_name);
        if let Err(e) = button.set_attribute("aria-label", &view.label) {
            warn!(error = %js_error(e), "cannot label toggle");
        }
        render_toggle(&button, view);
        if let Err(e) = body.append_child(&button) {
            warn!(error = %js_error(e), "cannot append toggle");
            return;
        }
        self.toggle = Some(button);
    }

    fn update_toggle(&mut self, view: &ToggleView) {
        if let Some(button) = &self.toggle {
            render_toggle(button, view);
        }
    }
}

/// `setTimeout`-backed scheduler that hands fired tasks back to its controller.
pub struct WebScheduler {
    window: Window,
    controller: Weak<RefCell<WebController>>,
    next_id: u64,
    handles: HashMap<TimerId, i32>,
}

impl WebScheduler {
    fn new(window: Window, controller: Weak<RefCell<WebController>>) -> Self {
        Self {
            window,
            controller,
            next_id: 0,
            handles: HashMap::new(),
        }
    }

    /// Timers handed to `setTimeout` that have neither fired nor been cleared.
    pub fn pending(&self) -> usize {
        self.handles.len()
    }
}

impl Scheduler for WebScheduler {
    fn schedule(&mut self, delay: Duration, task: TimerTask) -> TimerId {
        let id = TimerId::new(self.next_id);
        self.next_id += 1;

        let controller = self.controller.clone();
        let callback = Closure::once_into_js(move || {
            if let Some(controller) = controller.upgrade() {
                let mut controller = controller.borrow_mut();
                controller.scheduler_mut().handles.remove(&id);
                controller.run_timer(id, task);
            }
        });
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), millis)
        {
            Ok(handle) => {
                self.handles.insert(id, handle);
            }
            Err(e) => warn!(error = %js_error(e), "cannot schedule timer"),
        }
        id
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(handle) = self.handles.remove(&id) {
            self.window.clear_timeout_with_handle(handle);
        }
    }
}

/// Error returned when the controller cannot be attached to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallError {
    NoWindow,
    NoDocument,
    Storage(StoreError),
    Listener(String),
}

impl std::fmt::Display for InstallError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstallError::NoWindow => write!(f, "no global window"),
            InstallError::NoDocument => write!(f, "window has no document"),
            InstallError::Storage(e) => write!(f, "{}", e),
            InstallError::Listener(message) => write!(f, "cannot register listener: {}", message),
        }
    }
}

impl std::error::Error for InstallError {}

/// Applies the stored theme now and mounts the toggle once the body exists.
///
/// The returned controller is also kept alive by the registered listeners.
pub fn install(config: ToggleConfig) -> Result<Rc<RefCell<WebController>>, InstallError> {
    let window = web_sys::window().ok_or(InstallError::NoWindow)?;
    let document = window.document().ok_or(InstallError::NoDocument)?;
    let page = DomPage::new(document.clone()).ok_or(InstallError::NoDocument)?;
    let store = LocalStorage::from_window(&window).map_err(InstallError::Storage)?;

    let controller = Rc::new_cyclic(|weak: &Weak<RefCell<WebController>>| {
        let scheduler = WebScheduler::new(window.clone(), weak.clone());
        RefCell::new(ThemeController::initialize(store, page, scheduler, config))
    });

    if document.body().is_some() {
        mount(&controller, &window);
    } else {
        let pending = Rc::clone(&controller);
        let ready_window = window.clone();
        let on_ready = Closure::once_into_js(move || mount(&pending, &ready_window));
        document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
            .map_err(|e| InstallError::Listener(js_error(e)))?;
    }
    Ok(controller)
}

fn mount(controller: &Rc<RefCell<WebController>>, window: &Window) {
    let button = {
        let mut controller = controller.borrow_mut();
        controller.mount_toggle();
        controller.page().toggle_element().cloned()
    };
    let Some(button) = button else {
        warn!("toggle control missing after mount");
        return;
    };

    let on_click = {
        let controller = Rc::clone(controller);
        Closure::<dyn FnMut()>::new(move || {
            if let Err(e) = controller.borrow_mut().toggle() {
                warn!(error = %e, "theme toggle failed");
            }
        })
    };
    if let Err(e) = button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref()) {
        warn!(error = %js_error(e), "cannot listen for clicks");
    }
    on_click.forget();

    match window.match_media(DARK_SCHEME_QUERY) {
        Ok(Some(query)) => {
            let controller = Rc::clone(controller);
            let on_change = Closure::<dyn FnMut(MediaQueryListEvent)>::new(
                move |event: MediaQueryListEvent| {
                    let mode = if event.matches() {
                        ThemeMode::Dark
                    } else {
                        ThemeMode::Light
                    };
                    controller.borrow_mut().on_system_change(mode);
                },
            );
            if let Err(e) =
                query.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())
            {
                warn!(error = %js_error(e), "cannot listen for color-scheme changes");
            }
            on_change.forget();
        }
        Ok(None) => debug!("color-scheme queries unsupported"),
        Err(e) => debug!(error = %js_error(e), "color-scheme query failed"),
    }
}
