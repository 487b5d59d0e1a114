//! Vocabulary importer: pulls a tag's words from the remote service into the ledger.

pub mod client;
pub mod dump;
pub mod importer;
pub mod records;

pub use client::{HttpWordSource, WordSource};
pub use dump::write_dump;
pub use importer::{
    ImportConfig, ImportReport, Importer, MISSING_TRANSLITERATION, encode_tag,
    extract_transliteration, normalize_tag,
};
pub use records::{DialectCodes, ImportedWord, RecordPage, RemoteRecord};
