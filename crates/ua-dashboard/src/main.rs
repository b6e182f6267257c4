//! User Admin Dashboard
//!
//! Browser front end for viewing and editing a user record. Build with
//! `trunk serve`; `USER_ADMIN_API_URL` and `USER_ADMIN_LOG` are read at
//! compile time.

mod app;
mod components;
mod pages;

use tracing::Level;
use tracing_wasm::WASMLayerConfigBuilder;

fn log_level() -> Level {
    match option_env!("USER_ADMIN_LOG") {
        Some("trace") => Level::TRACE,
        Some("debug") => Level::DEBUG,
        Some("warn") => Level::WARN,
        Some("error") => Level::ERROR,
        _ => Level::INFO,
    }
}

fn main() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default_with_config(
        WASMLayerConfigBuilder::new()
            .set_max_level(log_level())
            .build(),
    );

    leptos::mount_to_body(app::App);
}
