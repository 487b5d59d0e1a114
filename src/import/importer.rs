//! One-shot import of a remote tag into the ledger.

use super::client::WordSource;
use super::dump::write_dump;
use super::records::{ImportedWord, RecordPage};
use crate::error::ImportError;
use crate::ledger;
use crate::models::VocabularyEntry;
use chrono::{DateTime, Local};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info};

/// Characters left as-is in a tag path segment.
const TAG_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Open and close markers around the transliteration on a word page.
const TRANSLITERATION_START: &str = "<span class=\"chat_view\">";
const TRANSLITERATION_END: &str = "</span>";

/// Stored when a word page has no extractable transliteration.
pub const MISSING_TRANSLITERATION: &str = "None";

#[derive(Clone, Debug)]
pub struct ImportConfig {
    pub base_url: String,
    pub start_index: u32,
    pub page_size: u32,
    /// Only records carrying this dialect code reach the ledger.
    pub dialect_code: String,
    pub ledger_path: PathBuf,
    pub raw_dump_path: PathBuf,
    pub output_dump_path: PathBuf,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.arwords.com".to_string(),
            start_index: 0,
            page_size: 3000,
            dialect_code: "1".to_string(),
            ledger_path: PathBuf::from("resources/data.csv"),
            raw_dump_path: PathBuf::from("data.json"),
            output_dump_path: PathBuf::from("output.json"),
        }
    }
}

/// Lower-cased, trimmed tag as stored in the ledger.
pub fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase()
}

/// Normalized tag, percent-encoded for use as a URL path segment.
pub fn encode_tag(tag: &str) -> String {
    utf8_percent_encode(&normalize_tag(tag), TAG_SEGMENT).to_string()
}

/// Text between the first transliteration marker and the following `</span>`,
/// trimmed. Falls back to [`MISSING_TRANSLITERATION`].
pub fn extract_transliteration(html: &str) -> String {
    html.split_once(TRANSLITERATION_START)
        .and_then(|(_, rest)| rest.split_once(TRANSLITERATION_END))
        .map(|(value, _)| value.trim())
        .filter(|value| !value.is_empty())
        .unwrap_or(MISSING_TRANSLITERATION)
        .to_string()
}

#[derive(Clone, Debug)]
pub struct ImportReport {
    pub tag: String,
    pub fetched: usize,
    pub accepted: usize,
    pub finished_at: DateTime<Local>,
}

impl fmt::Display for ImportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] tag '{}': {} fetched, {} added to ledger",
            self.finished_at.format("%Y-%m-%d %H:%M:%S"),
            self.tag,
            self.fetched,
            self.accepted
        )
    }
}

pub struct Importer<S: WordSource> {
    source: S,
    config: ImportConfig,
}

impl<S: WordSource> Importer<S> {
    pub fn new(source: S, config: ImportConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Imports every word of `requested_tag` carrying the configured dialect code.
    ///
    /// Fails with [`ImportError::DuplicateTag`] before any request when the
    /// ledger already has the tag. Only tag presence is checked; the same word
    /// may be imported again under another tag. The ledger is appended once,
    /// after every remote call has succeeded.
    pub fn run(&self, requested_tag: &str) -> Result<ImportReport, ImportError> {
        let tag = normalize_tag(requested_tag);
        if ledger::contains_tag(&self.config.ledger_path, &tag)? {
            return Err(ImportError::DuplicateTag(tag));
        }

        let raw = self.source.fetch_tag_records(&encode_tag(&tag))?;
        write_dump(&self.config.raw_dump_path, &raw)?;
        let page: RecordPage = serde_json::from_value(raw)?;
        let fetched = page.records.len();
        info!("Fetched {} records for tag '{}'", fetched, tag);

        let mut words = Vec::with_capacity(fetched);
        for record in page.records {
            let html = self.source.fetch_word_page(&record.word_id)?;
            let arabic_latin = extract_transliteration(&html);
            let word = ImportedWord::from_record(record, &tag, arabic_latin);
            debug!(
                word_id = %word.word_id,
                english = %word.english,
                latin = %word.arabic_latin,
                "scraped"
            );
            words.push(word);
        }
        write_dump(&self.config.output_dump_path, &words)?;

        let accepted: Vec<VocabularyEntry> = words
            .iter()
            .filter(|word| word.dia_codes.contains(&self.config.dialect_code))
            .map(ImportedWord::to_entry)
            .collect();

        if accepted.is_empty() {
            info!(
                "No records for tag '{}' carry dialect code {}",
                tag, self.config.dialect_code
            );
        } else {
            ledger::append_entries(&self.config.ledger_path, &accepted)?;
        }

        Ok(ImportReport {
            tag,
            fetched,
            accepted: accepted.len(),
            finished_at: Local::now(),
        })
    }
}
