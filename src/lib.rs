pub mod error;
pub mod import;
pub mod ledger;
pub mod models;
pub mod window;

pub use error::{ImportError, LedgerError, QuizError};
pub use models::{QuizSession, SelectionFilter, TagSelector, VocabularyEntry};
