//! web-sys implementation of the navigation host.

use std::any::Any;
use std::cell::RefCell;

use darlingx_core::config::MAIN_SELECTOR;
use darlingx_core::error::{FetchError, ResourceError, StorageError};
use darlingx_core::host::{PageSource, PreferenceStore, ResourceSink, Stage};
use darlingx_core::models::{
    DocumentSummary, FetchedPage, HistoryEntry, HistoryMode, Resource, Transition,
};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen::JsValue;
use web_sys::{DomParser, SupportedType};

use super::head::HeadResources;
use super::modules;
use super::storage::LocalStore;
use crate::config::dom_ids::PAGE_LOADING_CLASS;
use crate::utils::{dom, fetch_text};

stylance::import_crate_style!(css, "src/browser/transition.module.css");

/// The live browser document as seen by the navigation controller.
pub struct WebHost {
    loading: RwSignal<bool>,
    head: HeadResources,
    store: LocalStore,
    /// Mounted widgets, listeners and mount points of the current content.
    widgets: RefCell<Vec<Box<dyn Any>>>,
}

impl WebHost {
    pub fn new(loading: RwSignal<bool>) -> Self {
        Self {
            loading,
            head: HeadResources::new(),
            store: LocalStore,
            widgets: RefCell::new(Vec::new()),
        }
    }

    /// Keep `widget` alive until the next content swap.
    pub(super) fn keep(&self, widget: impl Any) {
        self.widgets.borrow_mut().push(Box::new(widget));
    }

    pub(super) fn drop_widgets(&self) {
        // Take first: dropping a widget may re-enter the host
        let widgets = self.widgets.take();
        log::debug!("releasing {} page widgets", widgets.len());
        drop(widgets);
    }
}

impl PageSource for WebHost {
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        fetch_text(url).await
    }

    fn parse_page(&self, html: &str) -> FetchedPage {
        let Ok(document) = DomParser::new()
            .and_then(|parser| parser.parse_from_string(html, SupportedType::TextHtml))
        else {
            log::warn!("fetched page could not be parsed");
            return FetchedPage::default();
        };

        let main_html = document
            .query_selector(MAIN_SELECTOR)
            .ok()
            .flatten()
            .map(|main| main.inner_html());
        let summary =
            DocumentSummary::probe(|selector| document.query_selector(selector).ok().flatten().is_some());

        FetchedPage {
            title: document.title(),
            main_html,
            summary,
        }
    }
}

impl Stage for WebHost {
    fn current_url(&self) -> String {
        dom::location_href()
    }

    fn live_summary(&self) -> DocumentSummary {
        DocumentSummary::probe(|selector| dom::query(selector).is_some())
    }

    fn set_loading(&self, loading: bool) {
        self.loading.set(loading);
        if let Some(body) = dom::body() {
            let _ = body.class_list().toggle_with_force(PAGE_LOADING_CLASS, loading);
        }
    }

    fn set_title(&self, title: &str) {
        if let Some(document) = dom::document() {
            document.set_title(title);
        }
    }

    fn has_main_region(&self) -> bool {
        dom::query(MAIN_SELECTOR).is_some()
    }

    fn set_transition(&self, transition: Transition) {
        let Some(main) = dom::query(MAIN_SELECTOR) else {
            return;
        };
        let classes = main.class_list();
        let _ = classes.remove_2(css::fadeOut, css::fadeIn);
        let _ = match transition {
            Transition::FadeOut => classes.add_1(css::fadeOut),
            Transition::FadeIn => classes.add_1(css::fadeIn),
            Transition::Steady => Ok(()),
        };
    }

    fn replace_main(&self, html: &str) {
        if let Some(main) = dom::query(MAIN_SELECTOR) {
            main.set_inner_html(html);
        }
        if let Some(window) = dom::window() {
            window.scroll_to_with_x_and_y(0.0, 0.0);
        }
    }

    async fn sleep(&self, ms: u32) {
        TimeoutFuture::new(ms).await;
    }

    fn write_history(&self, entry: &HistoryEntry, mode: HistoryMode) {
        let Some(history) = dom::window().and_then(|w| w.history().ok()) else {
            return;
        };
        let state = serde_wasm_bindgen::to_value(entry).unwrap_or(JsValue::NULL);
        let result = match mode {
            HistoryMode::Push => history.push_state_with_url(&state, "", Some(&entry.url)),
            HistoryMode::Replace => history.replace_state_with_url(&state, "", Some(&entry.url)),
            HistoryMode::Keep => Ok(()),
        };
        if let Err(e) = result {
            log::warn!("history update for {} failed: {e:?}", entry.url);
        }
    }

    fn hard_navigate(&self, url: &str) {
        if let Some(window) = dom::window()
            && window.location().set_href(url).is_err()
        {
            log::error!("could not navigate to {url}");
        }
    }

    fn attach_module(&self, name: &str) {
        modules::call(name, "attach");
    }

    fn detach_module(&self, name: &str) {
        modules::call(name, "detach");
    }
}

impl ResourceSink for WebHost {
    fn contains(&self, url: &str) -> bool {
        self.head.contains(url)
    }

    fn insert(&self, resource: &Resource, src: &str) -> Result<(), ResourceError> {
        self.head.insert(resource, src)
    }

    async fn settle(&self, url: &str) -> Result<(), ResourceError> {
        self.head.settle(url).await
    }

    fn remove(&self, url: &str) {
        self.head.remove(url);
    }

    fn cache_token(&self) -> String {
        self.head.cache_token()
    }
}

impl PreferenceStore for WebHost {
    fn load(&self, key: &str) -> Option<String> {
        self.store.load(key)
    }

    fn store(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.store.store(key, value)
    }
}
