mod api;
mod app;
mod browser;
mod components;
mod config;
mod utils;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    utils::logging::init();

    // The page markup is served statically; the app only adds overlays
    mount_to_body(App);
}
