//! Face Report Web App (Leptos + WASM)

mod app;
mod components;
mod api;
mod config;

use wasm_bindgen::prelude::*;
use leptos::prelude::*;

use crate::app::App;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    let config = config::load_client_config();
    leptos::mount::mount_to_body(move || view! { <App config=config /> });
}
