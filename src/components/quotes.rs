//! Community quotes guestbook.
//!
//! Mounted on pages with an about section. Switches between the site's own
//! quote list (static markup) and the community list from the API, and lets
//! signed-in visitors add quotes.

use darlingx_core::ApiError;
use darlingx_core::api::{Credentials, empty_state_message, validate_quote, validate_registration};
use darlingx_core::models::{Quote, QuoteFeed, UserInfo};
use gloo_timers::future::TimeoutFuture;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_icons::Icon;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlElement;

use crate::api;
use crate::components::icons as ic;
use crate::config::NOTICE_MS;

stylance::import_crate_style!(css, "src/components/quotes.module.css");

// ============================================================================
// Notices
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum NoticeKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Notice {
    id: u64,
    kind: NoticeKind,
    text: String,
}

/// Transient toast shown above the page.
///
/// Each notice hides itself after `NOTICE_MS` unless a newer one replaced it.
#[derive(Clone, Copy)]
struct Notices {
    current: RwSignal<Option<Notice>>,
    next_id: StoredValue<u64>,
}

impl Notices {
    fn new() -> Self {
        Self {
            current: RwSignal::new(None),
            next_id: StoredValue::new(0),
        }
    }

    fn show(&self, kind: NoticeKind, text: impl Into<String>) {
        let id = self.next_id.get_value() + 1;
        self.next_id.set_value(id);
        self.current.set(Some(Notice {
            id,
            kind,
            text: text.into(),
        }));

        let current = self.current;
        spawn_local(async move {
            TimeoutFuture::new(NOTICE_MS).await;
            let still_shown = current
                .try_get_untracked()
                .flatten()
                .is_some_and(|notice| notice.id == id);
            if still_shown {
                current.set(None);
            }
        });
    }

    fn success(&self, text: impl Into<String>) {
        self.show(NoticeKind::Success, text);
    }

    fn error(&self, err: &ApiError) {
        self.show(NoticeKind::Error, err.to_string());
    }

    fn dismiss(&self) {
        self.current.set(None);
    }
}

// ============================================================================
// Guestbook
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tab {
    Site,
    Community,
}

/// Guestbook widget.
///
/// `static_quotes` is the server-rendered quote list; it is hidden while the
/// community tab is open.
#[component]
pub fn Guestbook(static_quotes: HtmlElement) -> impl IntoView {
    let tab = RwSignal::new(Tab::Site);
    let feed = RwSignal::new(None::<QuoteFeed>);
    let user = RwSignal::new(UserInfo::default());
    let auth_open = RwSignal::new(false);
    let notices = Notices::new();

    Effect::new(move |_| {
        let display = match tab.get() {
            Tab::Site => "block",
            Tab::Community => "none",
        };
        let _ = static_quotes.style().set_property("display", display);
    });

    spawn_local(async move {
        match api::current_user().await {
            Ok(info) => user.set(info),
            Err(e) => log::debug!("session check failed: {e}"),
        }
    });

    let load_quotes = move || {
        spawn_local(async move {
            match api::fetch_quotes().await {
                Ok(quotes) => feed.set(Some(quotes)),
                Err(e) => {
                    log::warn!("quotes unavailable: {e}");
                    notices.error(&e);
                }
            }
        });
    };

    let open_tab = move |next: Tab| {
        tab.set(next);
        if next == Tab::Community {
            load_quotes();
        }
    };
    let tab_class = move |which: Tab| {
        move || {
            if tab.get() == which {
                format!("{} {}", css::toggleButton, css::toggleActive)
            } else {
                css::toggleButton.to_string()
            }
        }
    };

    let on_posted = move || {
        tab.set(Tab::Community);
        load_quotes();
    };

    view! {
        <div class=css::guestbook>
            <div class=css::toggle>
                <button class=tab_class(Tab::Site) on:click=move |_| open_tab(Tab::Site)>
                    "darlingx's"
                </button>
                <button class=tab_class(Tab::Community) on:click=move |_| open_tab(Tab::Community)>
                    <Icon icon=ic::LIST />
                    "community"
                </button>
            </div>

            <Show when=move || user.with(|u| u.logged_in)>
                <p class=css::session>
                    <Icon icon=ic::USER />
                    {move || user.with(|u| u.email.clone().unwrap_or_default())}
                </p>
            </Show>

            <QuoteForm notices=notices auth_open=auth_open on_posted=Callback::new(move |_: ()| on_posted()) />

            <Show when=move || auth_open.get()>
                <AuthForm user=user notices=notices open=auth_open />
            </Show>

            <Show when=move || tab.get() == Tab::Community>
                <div class=css::list>
                    {move || match feed.get() {
                        None => view! { <p class=css::status>"Loading quotes..."</p> }.into_any(),
                        Some(feed @ QuoteFeed::Empty) => view! {
                            <p class=css::empty>{empty_state_message(&feed)}</p>
                        }.into_any(),
                        Some(QuoteFeed::Quotes(quotes)) => quotes
                            .into_iter()
                            .map(|quote| view! { <QuoteItem quote=quote /> })
                            .collect_view()
                            .into_any(),
                    }}
                </div>
            </Show>

            {move || notices.current.get().map(|notice| {
                let class = match notice.kind {
                    NoticeKind::Success => format!("{} {}", css::notice, css::noticeSuccess),
                    NoticeKind::Error => format!("{} {}", css::notice, css::noticeError),
                };
                view! {
                    <div class=class role="alert">
                        <span>{notice.text}</span>
                        <button class=css::closeButton title="Dismiss" on:click=move |_| notices.dismiss()>
                            <Icon icon=ic::CLOSE />
                        </button>
                    </div>
                }
            })}
        </div>
    }
}

#[component]
fn QuoteItem(quote: Quote) -> impl IntoView {
    let posted = quote.posted_on();

    view! {
        <div class=css::quote>
            <p class=css::quoteText>{format!("\u{201c}{}\u{201d}", quote.text)}</p>
            <p class=css::quoteAuthor>{format!("\u{2014} {}", quote.author)}</p>
            {(!posted.is_empty()).then(|| view! { <p class=css::quoteDate>{posted}</p> })}
        </div>
    }
}

// ============================================================================
// Forms
// ============================================================================

/// New quote form. A 403 opens the sign-in form.
#[component]
fn QuoteForm(notices: Notices, auth_open: RwSignal<bool>, on_posted: Callback<()>) -> impl IntoView {
    let text = RwSignal::new(String::new());
    let author = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let draft = match validate_quote(&text.get_untracked(), &author.get_untracked()) {
            Ok(draft) => draft,
            Err(e) => return notices.error(&e),
        };

        busy.set(true);
        spawn_local(async move {
            let result = api::submit_quote(&draft).await;
            busy.set(false);
            match result {
                Ok(()) => {
                    notices.success("Quote added!");
                    text.set(String::new());
                    author.set(String::new());
                    on_posted.run(());
                }
                Err(e @ ApiError::Forbidden(_)) => {
                    notices.error(&e);
                    auth_open.set(true);
                }
                Err(e) => notices.error(&e),
            }
        });
    };

    view! {
        <form class=css::form on:submit=submit>
            <h3 class=css::formTitle>
                <Icon icon=ic::EDIT />
                "Add your quote"
            </h3>
            <label class=css::field>
                <span>"Quote"</span>
                <textarea rows="3" placeholder="Enter the quote..." bind:value=text></textarea>
            </label>
            <label class=css::field>
                <span>"Author"</span>
                <input type="text" placeholder="Author name" bind:value=author />
            </label>
            <div class=css::actions>
                <button type="submit" class=css::submit disabled=move || busy.get()>
                    <Icon icon=ic::PLUS />
                    "Save quote"
                </button>
            </div>
        </form>
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AuthMode {
    Login,
    Register,
}

/// Sign-in and registration.
#[component]
fn AuthForm(user: RwSignal<UserInfo>, notices: Notices, open: RwSignal<bool>) -> impl IntoView {
    let mode = RwSignal::new(AuthMode::Login);
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let current = mode.get_untracked();
        let checked = match current {
            AuthMode::Login => Credentials::new(&email.get_untracked(), &password.get_untracked()),
            AuthMode::Register => {
                validate_registration(&email.get_untracked(), &password.get_untracked())
            }
        };
        let credentials = match checked {
            Ok(credentials) => credentials,
            Err(e) => return notices.error(&e),
        };

        busy.set(true);
        spawn_local(async move {
            let result = match current {
                AuthMode::Login => api::login(&credentials).await,
                AuthMode::Register => api::register(&credentials).await,
            };
            busy.set(false);

            if let Err(e) = result {
                notices.error(&e);
                return;
            }
            password.set(String::new());
            match current {
                AuthMode::Register => {
                    notices.success("Account created. Please log in.");
                    mode.set(AuthMode::Login);
                }
                AuthMode::Login => {
                    notices.success("Logged in");
                    open.set(false);
                    match api::current_user().await {
                        Ok(info) => user.set(info),
                        Err(e) => log::warn!("session refresh failed: {e}"),
                    }
                }
            }
        });
    };

    let switch = move |_| {
        mode.update(|m| {
            *m = match m {
                AuthMode::Login => AuthMode::Register,
                AuthMode::Register => AuthMode::Login,
            }
        });
    };

    view! {
        <form class=css::auth on:submit=submit>
            <label class=css::field>
                <span><Icon icon=ic::USER />"Email"</span>
                <input type="email" autocomplete="email" bind:value=email />
            </label>
            <label class=css::field>
                <span><Icon icon=ic::LOCK />"Password"</span>
                <input type="password" autocomplete="current-password" bind:value=password />
            </label>
            <div class=css::actions>
                <button type="submit" class=css::submit disabled=move || busy.get()>
                    {move || match mode.get() {
                        AuthMode::Login => "Log in",
                        AuthMode::Register => "Register",
                    }}
                </button>
                <button type="button" class=css::authSwitch on:click=switch>
                    {move || match mode.get() {
                        AuthMode::Login => "Need an account?",
                        AuthMode::Register => "Have an account?",
                    }}
                </button>
            </div>
        </form>
    }
}
