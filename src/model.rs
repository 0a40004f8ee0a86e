//! View model for the admin page.
//!
//! Every thread option in the select box and every thread detail panel is
//! rendered from one [`ThreadEntry`], so the two can never drift apart. The
//! CSS class (`thread-<id>`) is derived for styling only; lookups go through
//! [`ThreadId`].

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Server-side identifier of a bumped thread.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThreadId(String);

impl ThreadId {
    pub fn new(id: impl Into<String>) -> Self {
        ThreadId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Class carried by the option and its detail panel.
    pub fn css_class(&self) -> String {
        format!("thread-{}", self.0)
    }
}

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// The server stores `form.get(...)` results, which may be null.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thread {
    pub id: ThreadId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub message: String,
}

/// Editable fields of a thread detail panel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThreadDraft {
    pub name: String,
    pub message: String,
}

/// One option/panel pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadEntry {
    pub id: ThreadId,
    /// Visible text of the option; only changes after a successful edit.
    pub label: String,
    pub draft: ThreadDraft,
}

impl ThreadEntry {
    pub fn from_thread(thread: Thread) -> Self {
        ThreadEntry {
            id: thread.id,
            label: thread.name.clone(),
            draft: ThreadDraft {
                name: thread.name,
                message: thread.message,
            },
        }
    }
}

/// Ordered collection of thread entries with the current selection.
///
/// `selected` mirrors the select box, `visible_panel` the single detail panel
/// on screen. They differ only after a deletion, which hides every panel
/// while the select box falls back to its first option.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThreadBook {
    entries: Vec<ThreadEntry>,
    selected: Option<ThreadId>,
    visible_panel: Option<ThreadId>,
}

impl ThreadBook {
    pub fn from_threads(threads: impl IntoIterator<Item = Thread>) -> Self {
        let mut book = ThreadBook::default();
        for thread in threads {
            if book.contains(&thread.id) {
                log::warn!("Ignoring duplicate thread {} in page state", thread.id);
                continue;
            }
            book.entries.push(ThreadEntry::from_thread(thread));
        }
        if let Some(first) = book.entries.first() {
            book.selected = Some(first.id.clone());
            book.visible_panel = Some(first.id.clone());
        }
        book
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ThreadEntry> {
        self.entries.iter()
    }

    pub fn contains(&self, id: &ThreadId) -> bool {
        self.entries.iter().any(|e| &e.id == id)
    }

    pub fn get(&self, id: &ThreadId) -> Option<&ThreadEntry> {
        self.entries.iter().find(|e| &e.id == id)
    }

    pub fn get_mut(&mut self, id: &ThreadId) -> Option<&mut ThreadEntry> {
        self.entries.iter_mut().find(|e| &e.id == id)
    }

    pub fn selected(&self) -> Option<&ThreadEntry> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    pub fn selected_id(&self) -> Option<&ThreadId> {
        self.selected.as_ref()
    }

    pub fn visible_panel(&self) -> Option<&ThreadId> {
        self.visible_panel.as_ref()
    }

    pub fn is_panel_visible(&self, id: &ThreadId) -> bool {
        self.visible_panel.as_ref() == Some(id)
    }

    /// Select an option and show exactly its panel. Unknown ids are ignored.
    pub fn select(&mut self, id: &ThreadId) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.selected = Some(id.clone());
        self.visible_panel = Some(id.clone());
        true
    }

    pub fn hide_all_panels(&mut self) {
        self.visible_panel = None;
    }

    pub fn set_label(&mut self, id: &ThreadId, label: impl Into<String>) -> bool {
        match self.get_mut(id) {
            Some(entry) => {
                entry.label = label.into();
                true
            }
            None => false,
        }
    }

    /// Append a new entry. Returns `false` if the id is already present.
    pub fn insert(&mut self, thread: Thread) -> bool {
        if self.contains(&thread.id) {
            return false;
        }
        self.entries.push(ThreadEntry::from_thread(thread));
        true
    }

    /// Remove an option together with its panel.
    pub fn remove(&mut self, id: &ThreadId) -> Option<ThreadEntry> {
        let pos = self.entries.iter().position(|e| &e.id == id)?;
        let removed = self.entries.remove(pos);
        if self.visible_panel.as_ref() == Some(id) {
            self.visible_panel = None;
        }
        if self.selected.as_ref() == Some(id) {
            self.selected = self.entries.first().map(|e| e.id.clone());
        }
        Some(removed)
    }
}

/// Contents of the configuration form, as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigForm {
    pub bump_delay: String,
    pub post_delay: String,
    pub default_message: String,
}

/// Contents of the account form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserForm {
    pub username: String,
    pub old_password: String,
    pub new_password: String,
}

/// Bumper settings embedded in the page.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BumperConfig {
    #[serde(default)]
    pub bump_delay: Option<f64>,
    #[serde(default)]
    pub post_delay: Option<f64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub default_message: String,
    #[serde(default)]
    pub threads: Vec<Thread>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Totals {
    #[serde(default)]
    pub posts: u64,
    #[serde(default)]
    pub bumps: u64,
}

/// Runtime counters of the bumper process.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RuntimeData {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub last_bump: Option<String>,
    #[serde(default)]
    pub totals: Totals,
}

/// State rendered into the page by the server.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Bootstrap {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub username: String,
    #[serde(default)]
    pub config: BumperConfig,
    #[serde(default)]
    pub data: RuntimeData,
}

impl Bootstrap {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn config_form(&self) -> ConfigForm {
        let fmt_delay = |d: Option<f64>| d.map(|v| v.to_string()).unwrap_or_default();
        ConfigForm {
            bump_delay: fmt_delay(self.config.bump_delay),
            post_delay: fmt_delay(self.config.post_delay),
            default_message: self.config.default_message.clone(),
        }
    }

    pub fn user_form(&self) -> UserForm {
        UserForm {
            username: self.username.clone(),
            ..UserForm::default()
        }
    }
}
