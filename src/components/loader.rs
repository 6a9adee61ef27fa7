//! Loading overlay.

use leptos::prelude::*;

use crate::app::AppContext;

stylance::import_crate_style!(css, "src/components/loader.module.css");

/// Spinner shown while a page transition is in flight.
#[component]
pub fn LoaderOverlay() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    view! {
        <Show when=move || ctx.loading.get()>
            <div class=css::overlay role="status" aria-live="polite">
                <div class=css::spinner></div>
                <span class=css::label>"Loading"</span>
            </div>
        </Show>
    }
}
