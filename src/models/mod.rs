pub mod quiz_session;
pub mod selection;
pub mod vocabulary_entry;

pub use quiz_session::{ConfirmAction, Phase, QuizSession, RevealState, Validation, Verdict};
pub use selection::{SelectionFilter, TagSelector};
pub use vocabulary_entry::{MOST_FREQUENT_TAG, VocabularyEntry, sample_entries};
