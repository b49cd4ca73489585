//! Entry point for the WASM application

use leptos::*;
use statement_lens_web::App;

pub fn main() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🦀 Statement Lens - Starting Leptos App");

    mount_to_body(|| view! { <App/> })
}
