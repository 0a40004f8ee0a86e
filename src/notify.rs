//! Single-slot snackbar notification.
//!
//! Each [`Snackbar::show`] bumps a generation counter. The dismiss timer
//! scheduled for a message carries that generation, and [`Snackbar::dismiss`]
//! only hides the snackbar while it is still current, so an older timer can
//! never clear a newer message.

use crate::config::SNACKBAR_VISIBLE_CLASS;

/// Sink for user-facing messages and developer diagnostics.
pub trait Notifier {
    /// Show a short status message to the user.
    fn notify(&mut self, message: &str);

    /// Record a raw response body for developer inspection.
    fn diagnose(&mut self, raw_body: &str) {
        log::error!("{}", raw_body);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snackbar {
    message: String,
    visible: bool,
    generation: u64,
}

impl Snackbar {
    pub fn new() -> Self {
        Snackbar::default()
    }

    /// Replace the text, make the snackbar visible and return the generation
    /// the matching dismiss must present.
    pub fn show(&mut self, message: impl Into<String>) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.message = message.into();
        self.visible = true;
        self.generation
    }

    /// Hide the snackbar if `generation` is still the latest one.
    pub fn dismiss(&mut self, generation: u64) -> bool {
        if generation != self.generation || !self.visible {
            return false;
        }
        self.visible = false;
        true
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn class(&self) -> &'static str {
        if self.visible {
            SNACKBAR_VISIBLE_CLASS
        } else {
            ""
        }
    }
}

impl Notifier for Snackbar {
    fn notify(&mut self, message: &str) {
        self.show(message);
    }
}

/// Buffers notifications so they can be delivered after the state that
/// produced them is no longer borrowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outbox {
    pub messages: Vec<String>,
    pub diagnostics: Vec<String>,
}

impl Outbox {
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.diagnostics.is_empty()
    }

    /// Replay everything, in order, into another sink.
    pub fn deliver<N: Notifier>(self, sink: &mut N) {
        for raw_body in &self.diagnostics {
            sink.diagnose(raw_body);
        }
        for message in &self.messages {
            sink.notify(message);
        }
    }
}

impl Notifier for Outbox {
    fn notify(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }

    fn diagnose(&mut self, raw_body: &str) {
        self.diagnostics.push(raw_body.to_string());
    }
}
