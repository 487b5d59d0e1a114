//! Tag selection: the checkbox state shown before a quiz and the filter it produces.
//!
//! An empty selection means "every tag", never "no tag".

use super::vocabulary_entry::MOST_FREQUENT_TAG;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Set of chosen tags. Empty matches everything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionFilter {
    tags: BTreeSet<String>,
}

impl SelectionFilter {
    /// Filter that lets every entry through.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    pub fn matches(&self, tag: &str) -> bool {
        self.tags.is_empty() || self.tags.contains(tag)
    }

    pub fn is_all(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }
}

/// One boolean toggle per distinct ledger tag.
#[derive(Clone, Debug)]
pub struct TagSelector {
    pub ledger_path: PathBuf,
    toggles: BTreeMap<String, bool>,
}

impl TagSelector {
    /// Builds the toggles for `tags`. Only the most frequent tag starts checked.
    pub fn new<I>(ledger_path: impl AsRef<Path>, tags: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let toggles = tags
            .into_iter()
            .map(|tag| {
                let checked = tag == MOST_FREQUENT_TAG;
                (tag, checked)
            })
            .collect();

        Self {
            ledger_path: ledger_path.as_ref().to_path_buf(),
            toggles,
        }
    }

    pub fn tags(&self) -> impl Iterator<Item = (&str, bool)> {
        self.toggles.iter().map(|(tag, checked)| (tag.as_str(), *checked))
    }

    /// Mutable access for checkbox widgets.
    pub fn toggles_mut(&mut self) -> impl Iterator<Item = (&String, &mut bool)> {
        self.toggles.iter_mut()
    }

    pub fn is_checked(&self, tag: &str) -> bool {
        self.toggles.get(tag).copied().unwrap_or(false)
    }

    pub fn set(&mut self, tag: &str, checked: bool) {
        if let Some(toggle) = self.toggles.get_mut(tag) {
            *toggle = checked;
        }
    }

    pub fn toggle(&mut self, tag: &str) {
        if let Some(toggle) = self.toggles.get_mut(tag) {
            *toggle = !*toggle;
        }
    }

    pub fn len(&self) -> usize {
        self.toggles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toggles.is_empty()
    }

    /// Returns the checked tags. Nothing checked yields the select-all filter.
    pub fn confirm(&self) -> SelectionFilter {
        SelectionFilter::from_tags(
            self.toggles
                .iter()
                .filter(|(_, checked)| **checked)
                .map(|(tag, _)| tag.clone()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector() -> TagSelector {
        TagSelector::new(
            "book1.csv",
            ["food", "family", MOST_FREQUENT_TAG].map(String::from),
        )
    }

    #[test]
    fn test_most_frequent_checked_by_default() {
        let selector = selector();
        assert!(selector.is_checked(MOST_FREQUENT_TAG));
        assert!(!selector.is_checked("food"));
        assert!(!selector.is_checked("family"));
        assert_eq!(selector.len(), 3);
    }

    #[test]
    fn test_confirm_returns_checked_tags() {
        let mut selector = selector();
        selector.set("food", true);
        selector.set(MOST_FREQUENT_TAG, false);

        let filter = selector.confirm();
        assert_eq!(filter.tags().collect::<Vec<_>>(), vec!["food"]);
        assert!(filter.matches("food"));
        assert!(!filter.matches("family"));
    }

    #[test]
    fn test_empty_selection_selects_everything() {
        let mut selector = selector();
        selector.toggle(MOST_FREQUENT_TAG);

        let filter = selector.confirm();
        assert!(filter.is_all());
        assert!(filter.matches("food"));
        assert!(filter.matches("family"));
        assert!(filter.matches(MOST_FREQUENT_TAG));
        assert!(filter.matches("a tag nobody imported"));
    }

    #[test]
    fn test_unknown_tag_is_ignored() {
        let mut selector = selector();
        selector.set("cars", true);
        assert!(!selector.is_checked("cars"));
        assert_eq!(selector.len(), 3);
    }
}
