//! One row of the vocabulary ledger.
use serde::{Deserialize, Serialize};

/// Tag assigned to the built-in sample list and checked by default in the selector.
pub const MOST_FREQUENT_TAG: &str = "1: most frequent";

/// A single word: english prompt, expected transliteration and arabic script.
///
/// Field order matches the ledger header
/// `tag,word_type,arabic,english,arabic_latin,word_id`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub tag: String,
    pub word_type: String,
    #[serde(default)]
    pub arabic: String,
    pub english: String,
    pub arabic_latin: String,
    #[serde(default)]
    pub word_id: String,
}

impl VocabularyEntry {
    /// True when `answer` matches the transliteration, ignoring case and
    /// surrounding whitespace on both sides.
    pub fn accepts(&self, answer: &str) -> bool {
        normalize_answer(answer) == normalize_answer(&self.arabic_latin)
    }

    /// Identity used when rewriting a row in the ledger.
    pub fn same_word(&self, other: &VocabularyEntry) -> bool {
        self.tag == other.tag && self.arabic == other.arabic && self.english == other.english
    }
}

pub(crate) fn normalize_answer(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Fallback list used when the ledger cannot be read.
pub fn sample_entries() -> Vec<VocabularyEntry> {
    vec![
        VocabularyEntry {
            tag: MOST_FREQUENT_TAG.to_string(),
            word_type: "P".to_string(),
            arabic: "مرحبا".to_string(),
            english: "Hello".to_string(),
            arabic_latin: "Marhaba".to_string(),
            word_id: String::new(),
        };
        3
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marhaba() -> VocabularyEntry {
        sample_entries().remove(0)
    }

    #[test]
    fn test_accepts_ignores_case_and_whitespace() {
        let entry = marhaba();
        assert!(entry.accepts("Marhaba"));
        assert!(entry.accepts(" marhaba "));
        assert!(entry.accepts("MARHABA"));
        assert!(entry.accepts("\tmarhaba\n"));
    }

    #[test]
    fn test_accepts_rejects_other_words() {
        let entry = marhaba();
        assert!(!entry.accepts("marhab"));
        assert!(!entry.accepts("mar haba"));
        assert!(!entry.accepts(""));
    }

    #[test]
    fn test_sample_entries() {
        let entries = sample_entries();
        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|e| e.tag == MOST_FREQUENT_TAG));
        assert_eq!(entries[0].english, "Hello");
    }
}
