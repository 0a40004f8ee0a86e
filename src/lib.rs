//! Admin panel for the bumper: view model, API wiring and notification logic.
//!
//! The browser entry point in `main.rs` renders this state with Yew; the
//! modules here are plain Rust and run under `cargo test` without a browser.

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod http;
pub mod model;
pub mod notify;
pub mod tabs;

use config::BOOTSTRAP_ELEMENT_ID;
use error::PanelError;
use model::Bootstrap;

/// Read the page state the server embedded as JSON in
/// `<script id="bumper-state" type="application/json">`.
pub fn read_bootstrap() -> Result<Bootstrap, PanelError> {
    let element = gloo_utils::document()
        .get_element_by_id(BOOTSTRAP_ELEMENT_ID)
        .ok_or_else(|| PanelError::Bootstrap(format!("#{} not found", BOOTSTRAP_ELEMENT_ID)))?;
    let raw = element.text_content().unwrap_or_default();
    Bootstrap::from_json(&raw).map_err(|e| PanelError::Bootstrap(e.to_string()))
}

pub fn set_document_title(title: &str) {
    gloo_utils::document().set_title(title);
}
