//! Root application module.
//!
//! Contains the App component and the AppContext it provides.

use leptos::prelude::*;

use crate::components::{LoaderOverlay, SiteRouter};

// ============================================================================
// AppContext
// ============================================================================

/// Application-wide reactive context.
///
/// Provided at the root of the component tree and read with
/// `use_context::<AppContext>()`.
#[derive(Clone, Copy)]
pub struct AppContext {
    /// A page transition is in flight.
    pub loading: RwSignal<bool>,
}

impl AppContext {
    pub fn new() -> Self {
        Self {
            loading: RwSignal::new(false),
        }
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Root application component with error boundary.
///
/// This component:
/// - Creates and provides the global AppContext
/// - Installs the navigation controller through [`SiteRouter`]
/// - Renders the loading overlay
#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new();
    provide_context(ctx);

    view! {
        <ErrorBoundary
            fallback=|errors| view! {
                <div style="
                    position: fixed;
                    right: 1.5rem;
                    bottom: 1.5rem;
                    max-width: 420px;
                    padding: 1rem 1.25rem;
                    background: #151a35;
                    color: #e0e0e0;
                    border-left: 3px solid #ff6b6b;
                    border-radius: 4px;
                    font-family: 'Courier New', monospace;
                    z-index: 1200;
                ">
                    <strong style="color: #ff6b6b;">"Something went wrong"</strong>
                    <ul style="margin: 0.5rem 0; padding-left: 1.25rem; font-size: 0.85rem;">
                        {move || errors.get()
                            .into_iter()
                            .map(|(_, e)| view! { <li>{e.to_string()}</li> })
                            .collect::<Vec<_>>()
                        }
                    </ul>
                    <button
                        on:click=move |_| {
                            if let Some(window) = web_sys::window() {
                                let _ = window.location().reload();
                            }
                        }
                        style="
                            background: #4a90e2;
                            color: white;
                            border: none;
                            padding: 0.4rem 1rem;
                            border-radius: 4px;
                            cursor: pointer;
                            font-family: inherit;
                        "
                    >
                        "Reload Page"
                    </button>
                </div>
            }
        >
            <SiteRouter />
            <LoaderOverlay />
        </ErrorBoundary>
    }
}
