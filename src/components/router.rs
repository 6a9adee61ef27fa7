//! Single-page navigation wiring.
//!
//! The site is plain multi-page HTML. This component turns it into a
//! single-page experience by handing same-site link clicks and history
//! traversal to the [`NavigationController`].
//!
//! # Architecture
//!
//! - **The server's HTML is the source of truth**: every page is fetched and
//!   its `<main>` swapped in; nothing is rendered from client-side routes
//! - **Clicks are filtered by [`links::decide`]**: anything external,
//!   modified or targeted is left to the browser
//! - **popstate events**: back/forward re-run the swap without pushing history
//! - **Failures fall back to a full page load**

use std::rc::Rc;

use darlingx_core::{NavigationConfig, NavigationController};
use leptos::prelude::*;
use leptos_use::use_media_query;

use crate::app::AppContext;
use crate::browser::WebHost;

type Controller = NavigationController<WebHost>;

/// Installs the navigation controller for the page the browser loaded.
///
/// Renders nothing itself; the page markup is served statically.
#[component]
pub fn SiteRouter() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let host = Rc::new(WebHost::new(ctx.loading));
    let nav: Rc<Controller> = Rc::new(NavigationController::new(host, NavigationConfig::default()));

    let reduced_motion = use_media_query("(prefers-reduced-motion: reduce)");
    let motion_nav = nav.clone();
    Effect::new(move |_| motion_nav.set_reduced_motion(reduced_motion.get()));

    #[cfg(target_arch = "wasm32")]
    {
        wire::links(nav.clone());
        wire::popstate(nav.clone());
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = nav.start().await;
            log::debug!("boot finished: {outcome:?}");
        });
    }
}

// ============================================================================
// Event wiring
// ============================================================================

#[cfg(target_arch = "wasm32")]
mod wire {
    use std::rc::Rc;

    use darlingx_core::links::{self, LinkClick, LinkDecision};
    use darlingx_core::models::HistoryEntry;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::Closure;
    use wasm_bindgen_futures::spawn_local;
    use web_sys::{Element, HtmlAnchorElement, MouseEvent, PopStateEvent};

    use super::Controller;
    use crate::utils::dom;

    /// Intercept clicks on same-site anchors anywhere in the document.
    pub fn links(nav: Rc<Controller>) {
        let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
            on_click(&nav, &event);
        }) as Box<dyn FnMut(MouseEvent)>);

        if let Some(document) = dom::document() {
            let _ = document
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        }

        // Keep the closure alive for the lifetime of the app
        closure.forget();
    }

    fn on_click(nav: &Rc<Controller>, event: &MouseEvent) {
        if event.default_prevented() {
            return;
        }
        let Some(anchor) = event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
            .and_then(|element| element.closest("a[href]").ok().flatten())
            .and_then(|element| element.dyn_into::<HtmlAnchorElement>().ok())
        else {
            return;
        };

        let href = anchor.get_attribute("href").unwrap_or_default();
        let target = anchor.target();
        let click = LinkClick {
            href: &href,
            target: &target,
            download: anchor.has_attribute("download"),
            modified: event.ctrl_key() || event.meta_key() || event.shift_key() || event.alt_key(),
            button: event.button(),
        };

        match links::decide(&click, &dom::location_href()) {
            LinkDecision::Intercept(url) => {
                event.prevent_default();
                let nav = nav.clone();
                spawn_local(async move {
                    let outcome = nav.navigate(&url).await;
                    log::debug!("navigation to {url}: {outcome:?}");
                });
            }
            LinkDecision::Ignore(reason) => log::trace!("{href} left to the browser: {reason:?}"),
        }
    }

    /// Re-run the swap when the user moves through history.
    pub fn popstate(nav: Rc<Controller>) {
        let closure = Closure::wrap(Box::new(move |event: PopStateEvent| {
            let url = serde_wasm_bindgen::from_value::<HistoryEntry>(event.state())
                .map(|entry| entry.url)
                .unwrap_or_else(|_| dom::location_href());
            let nav = nav.clone();
            spawn_local(async move {
                let outcome = nav.on_popstate(&url).await;
                log::debug!("popstate to {url}: {outcome:?}");
            });
        }) as Box<dyn FnMut(PopStateEvent)>);

        if let Some(window) = dom::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        closure.forget();
    }
}
