//! Exclusive tab selection for the admin page navigation.

use crate::config::TITLE_PREFIX;

/// A fixed set of named tabs with at most one active at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabSwitcher {
    tabs: Vec<String>,
    active: Option<usize>,
}

impl TabSwitcher {
    pub fn new<I, S>(tabs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TabSwitcher {
            tabs: tabs.into_iter().map(Into::into).collect(),
            active: None,
        }
    }

    /// Activate `name` and return the new document title. Unknown names
    /// change nothing and return `None`.
    pub fn open_tab(&mut self, name: &str) -> Option<String> {
        let idx = self.tabs.iter().position(|t| t == name)?;
        self.active = Some(idx);
        Some(document_title(name))
    }

    pub fn active(&self) -> Option<&str> {
        self.active.map(|i| self.tabs[i].as_str())
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.active() == Some(name)
    }

    pub fn tabs(&self) -> impl Iterator<Item = &str> {
        self.tabs.iter().map(String::as_str)
    }
}

pub fn document_title(tab: &str) -> String {
    format!("{}{}", TITLE_PREFIX, capitalize_first(tab))
}

/// Upper-case the first character when it is an ASCII word character.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphanumeric() || c == '_' => {
            let mut out = String::with_capacity(s.len());
            out.push(c.to_ascii_uppercase());
            out.push_str(chars.as_str());
            out
        }
        _ => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn switcher() -> TabSwitcher {
        TabSwitcher::new(["dashboard", "threads", "config", "user"])
    }

    #[test]
    fn starts_with_no_active_tab() {
        assert_eq!(switcher().active(), None);
    }

    #[test]
    fn open_tab_sets_title_and_single_active() {
        let mut tabs = switcher();
        assert_eq!(tabs.open_tab("config").as_deref(), Some("Bumper :: Config"));
        assert_eq!(tabs.open_tab("threads").as_deref(), Some("Bumper :: Threads"));
        let active: Vec<_> = tabs.tabs().filter(|t| tabs.is_active(t)).collect();
        assert_eq!(active, ["threads"]);
    }

    #[test]
    fn unknown_tab_is_a_no_op() {
        let mut tabs = switcher();
        tabs.open_tab("user");
        let before = tabs.clone();
        assert_eq!(tabs.open_tab("settings"), None);
        assert_eq!(tabs, before);
    }

    #[test]
    fn capitalize_only_word_characters() {
        assert_eq!(capitalize_first("threads"), "Threads");
        assert_eq!(capitalize_first("-x"), "-x");
        assert_eq!(capitalize_first("édition"), "édition");
        assert_eq!(capitalize_first(""), "");
    }
}
