//! Style and script elements in the document head, keyed by URL.
//!
//! An element matches a resource when its resolved `href`/`src`, with query
//! and fragment removed, equals the resolved resource URL. Tags written into
//! the page statically therefore count as present.

use std::cell::RefCell;
use std::collections::HashMap;

use darlingx_core::error::ResourceError;
use darlingx_core::links::resolve;
use darlingx_core::models::{Resource, ResourceKind};
use js_sys::{Function, Promise};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Element, HtmlElement, HtmlLinkElement, HtmlScriptElement};

use crate::utils::dom;

const RESOURCE_SELECTOR: &str = "link[rel=\"stylesheet\"][href], script[src]";

fn without_query(url: &str) -> &str {
    url.split(['?', '#']).next().unwrap_or_default()
}

fn element_url(element: &Element) -> Option<String> {
    if let Some(link) = element.dyn_ref::<HtmlLinkElement>() {
        Some(link.href())
    } else {
        element.dyn_ref::<HtmlScriptElement>().map(|script| script.src())
    }
}

/// Load promise of an inserted element.
struct PendingLoad {
    promise: Promise,
    /// Resolves `promise` without waiting for the element.
    release: Function,
}

/// Live head elements plus their pending load promises.
#[derive(Default)]
pub struct HeadResources {
    pending: RefCell<HashMap<String, PendingLoad>>,
}

impl HeadResources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Elements currently representing `url`.
    fn elements_for(&self, url: &str) -> Vec<Element> {
        let Some(root) = dom::document().and_then(|d| d.document_element()) else {
            return Vec::new();
        };
        let target = resolve(&dom::location_href(), url);
        let target = without_query(&target);
        dom::query_all(&root, RESOURCE_SELECTOR)
            .into_iter()
            .filter(|element| {
                element_url(element).is_some_and(|src| without_query(&src) == target)
            })
            .collect()
    }

    pub fn contains(&self, url: &str) -> bool {
        !self.elements_for(url).is_empty()
    }

    pub fn insert(&self, resource: &Resource, src: &str) -> Result<(), ResourceError> {
        let injection = || ResourceError::Injection {
            url: resource.url.to_string(),
        };
        let document = dom::document().ok_or_else(injection)?;
        let head = document.head().ok_or_else(injection)?;

        let element: HtmlElement = match resource.kind {
            ResourceKind::Style => {
                let link: HtmlLinkElement = document
                    .create_element("link")
                    .map_err(|_| injection())?
                    .dyn_into()
                    .map_err(|_| injection())?;
                link.set_rel("stylesheet");
                link.set_href(src);
                link.into()
            }
            ResourceKind::Script => {
                let script: HtmlScriptElement = document
                    .create_element("script")
                    .map_err(|_| injection())?
                    .dyn_into()
                    .map_err(|_| injection())?;
                script.set_src(src);
                // Dynamically inserted scripts are async by default
                script.set_async(false);
                script.into()
            }
        };

        self.track(resource.url, &element);
        head.append_child(&element).map_err(|_| {
            self.pending.borrow_mut().remove(resource.url);
            injection()
        })?;
        Ok(())
    }

    /// Start waiting for `element` to load or fail.
    fn track(&self, url: &str, element: &HtmlElement) {
        let mut release = None;
        let promise = Promise::new(&mut |resolve, reject| {
            element.set_onload(Some(&resolve));
            element.set_onerror(Some(&reject));
            release = Some(resolve);
        });
        // The executor runs synchronously, so `release` is always set here
        let Some(release) = release else {
            return;
        };
        self.pending
            .borrow_mut()
            .insert(url.to_string(), PendingLoad { promise, release });
    }

    pub async fn settle(&self, url: &str) -> Result<(), ResourceError> {
        let promise = self.pending.borrow().get(url).map(|load| load.promise.clone());
        let Some(promise) = promise else {
            return Ok(());
        };
        JsFuture::from(promise)
            .await
            .map(|_| ())
            .map_err(|_| ResourceError::LoadFailed {
                url: url.to_string(),
            })
    }

    /// Remove every element for `url`. A load still in flight is settled
    /// as done so nothing keeps waiting on a detached element.
    pub fn remove(&self, url: &str) {
        let pending = self.pending.borrow_mut().remove(url);
        if let Some(load) = pending {
            let _ = load.release.call0(&JsValue::UNDEFINED);
        }
        for element in self.elements_for(url) {
            element.remove();
        }
    }

    pub fn cache_token(&self) -> String {
        format!("{}", js_sys::Date::now() as u64)
    }
}
