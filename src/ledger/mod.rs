//! CSV ledger operations
//!
//! The ledger is a UTF-8 CSV file with header
//! `tag,word_type,arabic,english,arabic_latin,word_id`. The importer appends
//! to it and the quiz reads it once per session.

use crate::error::LedgerError;
use crate::models::{SelectionFilter, VocabularyEntry, sample_entries};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::collections::BTreeSet;
use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info, warn};

/// Ledger column order.
pub const HEADER: [&str; 6] = [
    "tag",
    "word_type",
    "arabic",
    "english",
    "arabic_latin",
    "word_id",
];

type Result<T> = std::result::Result<T, LedgerError>;

/// Reads every well-formed row. Rows that fail to deserialize (for example a
/// truncated last line) are skipped with a warning.
fn read_entries(path: &Path) -> Result<Vec<VocabularyEntry>> {
    let mut reader = ReaderBuilder::new().flexible(true).from_path(path)?;

    let mut entries = Vec::new();
    for (line, row) in reader.deserialize::<VocabularyEntry>().enumerate() {
        match row {
            Ok(entry) => entries.push(entry),
            Err(e) => warn!(
                "Skipping malformed ledger row {} in {}: {}",
                line + 2,
                path.display(),
                e
            ),
        }
    }
    Ok(entries)
}

/// Distinct tags present in the ledger.
pub fn load_tags(path: impl AsRef<Path>) -> Result<BTreeSet<String>> {
    let tags: BTreeSet<String> = read_entries(path.as_ref())?
        .into_iter()
        .map(|entry| entry.tag)
        .collect();
    debug!("Loaded {} tags from {}", tags.len(), path.as_ref().display());
    Ok(tags)
}

/// Entries whose tag passes `filter`, in file order.
pub fn load_entries(
    path: impl AsRef<Path>,
    filter: &SelectionFilter,
) -> Result<Vec<VocabularyEntry>> {
    let entries: Vec<_> = read_entries(path.as_ref())?
        .into_iter()
        .filter(|entry| filter.matches(&entry.tag))
        .collect();
    info!("Loaded {} entries from {}", entries.len(), path.as_ref().display());
    Ok(entries)
}

/// Like [`load_entries`], but falls back to the built-in sample list when the
/// ledger cannot be read.
pub fn load_entries_or_sample(
    path: impl AsRef<Path>,
    filter: &SelectionFilter,
) -> Vec<VocabularyEntry> {
    match load_entries(path.as_ref(), filter) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("CSV file not readable ({}) - using sample data", e);
            sample_entries()
        }
    }
}

/// True when some row carries exactly `tag`. A missing ledger has no tags.
pub fn contains_tag(path: impl AsRef<Path>, tag: &str) -> Result<bool> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(false);
    }
    Ok(read_entries(path)?.iter().any(|entry| entry.tag == tag))
}

/// Value of `entry` for the ledger column `column`. Unknown columns are empty.
fn column_value<'a>(entry: &'a VocabularyEntry, column: &str) -> &'a str {
    match column {
        "tag" => &entry.tag,
        "word_type" => &entry.word_type,
        "arabic" => &entry.arabic,
        "english" => &entry.english,
        "arabic_latin" => &entry.arabic_latin,
        "word_id" => &entry.word_id,
        _ => "",
    }
}

/// Appends `entries`. A new or empty file gets [`HEADER`] first; an existing
/// file keeps its own header and rows are written in its column order.
pub fn append_entries(path: impl AsRef<Path>, entries: &[VocabularyEntry]) -> Result<()> {
    let path = path.as_ref();
    let is_new = match fs::metadata(path) {
        Ok(meta) => meta.len() == 0,
        Err(e) if e.kind() == ErrorKind::NotFound => true,
        Err(e) => return Err(e.into()),
    };

    let header = if is_new {
        StringRecord::from(HEADER.to_vec())
    } else {
        ReaderBuilder::new().from_path(path)?.headers()?.clone()
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);

    if is_new {
        writer.write_record(&header)?;
    }
    for entry in entries {
        writer.write_record(header.iter().map(|column| column_value(entry, column)))?;
    }
    writer.flush()?;

    info!("Appended {} entries to {}", entries.len(), path.display());
    Ok(())
}

/// Rewrites every row matching `entry` with a new transliteration and returns
/// the number of rows changed. Only the `arabic_latin` cell of matching rows
/// changes; rows that do not parse are written back as they were.
pub fn replace_transliteration(
    path: impl AsRef<Path>,
    entry: &VocabularyEntry,
    arabic_latin: &str,
) -> Result<usize> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new().flexible(true).from_path(path)?;
    let header = reader.headers()?.clone();
    let Some(latin_column) = header.iter().position(|column| column == "arabic_latin") else {
        return Ok(0);
    };

    let mut records = Vec::new();
    let mut changed = 0;
    for record in reader.records() {
        let record = record?;
        let matches = record
            .deserialize::<VocabularyEntry>(Some(&header))
            .is_ok_and(|row| row.same_word(entry));

        if matches {
            let updated: StringRecord = record
                .iter()
                .enumerate()
                .map(|(i, cell)| if i == latin_column { arabic_latin } else { cell })
                .collect();
            records.push(updated);
            changed += 1;
        } else {
            records.push(record);
        }
    }
    if changed == 0 {
        return Ok(0);
    }

    let tmp_path = path.with_extension("csv.tmp");
    {
        let mut writer = WriterBuilder::new()
            .flexible(true)
            .has_headers(false)
            .from_path(&tmp_path)?;
        writer.write_record(&header)?;
        for record in &records {
            writer.write_record(record)?;
        }
        writer.flush()?;
    }
    fs::rename(&tmp_path, path)?;

    info!(
        "Updated transliteration of '{}' to '{}' ({} rows)",
        entry.english, arabic_latin, changed
    );
    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entry(tag: &str, english: &str, arabic_latin: &str) -> VocabularyEntry {
        VocabularyEntry {
            tag: tag.to_string(),
            word_type: "n".to_string(),
            arabic: format!("ar-{english}"),
            english: english.to_string(),
            arabic_latin: arabic_latin.to_string(),
            word_id: String::new(),
        }
    }

    #[test]
    fn test_append_creates_file_with_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.csv");

        append_entries(&path, &[entry("food", "bread", "khubz")]).unwrap();
        append_entries(&path, &[entry("family", "mother", "imm")]).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines[0], "tag,word_type,arabic,english,arabic_latin,word_id");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "food,n,ar-bread,bread,khubz,");
    }

    #[test]
    fn test_load_tags_and_filtered_entries() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.csv");
        append_entries(
            &path,
            &[
                entry("food", "bread", "khubz"),
                entry("food", "water", "mayy"),
                entry("family", "mother", "imm"),
            ],
        )
        .unwrap();

        let tags = load_tags(&path).unwrap();
        assert_eq!(tags.into_iter().collect::<Vec<_>>(), vec!["family", "food"]);

        let food = load_entries(&path, &SelectionFilter::from_tags(["food"])).unwrap();
        assert_eq!(food.len(), 2);

        let all = load_entries(&path, &SelectionFilter::all()).unwrap();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_reads_ledger_without_optional_columns() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("book1.csv");
        fs::write(&path, "tag,word_type,english,arabic_latin\nfood,n,bread,khubz\n").unwrap();

        let entries = load_entries(&path, &SelectionFilter::all()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].arabic, "");
        assert_eq!(entries[0].word_id, "");
    }

    #[test]
    fn test_truncated_row_is_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.csv");
        fs::write(
            &path,
            "tag,word_type,arabic,english,arabic_latin,word_id\nfood,n,x,bread,khubz,\nfood,n\n",
        )
        .unwrap();

        let entries = load_entries(&path, &SelectionFilter::all()).unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_missing_ledger_falls_back_to_sample() {
        let dir = TempDir::new().unwrap();
        let entries =
            load_entries_or_sample(dir.path().join("missing.csv"), &SelectionFilter::all());
        assert_eq!(entries, sample_entries());
    }

    #[test]
    fn test_contains_tag() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.csv");
        assert!(!contains_tag(&path, "food").unwrap());

        append_entries(&path, &[entry("food", "bread", "khubz")]).unwrap();
        assert!(contains_tag(&path, "food").unwrap());
        assert!(!contains_tag(&path, "Food").unwrap());
    }

    #[test]
    fn test_append_follows_existing_header_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("book1.csv");
        fs::write(&path, "tag,word_type,english,arabic_latin\nfamily,n,mother,imm\n").unwrap();

        append_entries(&path, &[entry("food", "bread", "khubz")]).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().last(), Some("food,n,bread,khubz"));

        let entries = load_entries(&path, &SelectionFilter::all()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].english, "bread");
        assert_eq!(entries[1].arabic_latin, "khubz");
        assert_eq!(entries[1].arabic, "");
    }

    #[test]
    fn test_replace_transliteration_keeps_unparsed_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.csv");
        fs::write(
            &path,
            "tag,word_type,arabic,english,arabic_latin,word_id\nfood,n,x,bread,khubz,\nfamily,n\n",
        )
        .unwrap();
        let bread = entry("food", "bread", "khubz");
        let bread = VocabularyEntry {
            arabic: "x".to_string(),
            ..bread
        };

        assert_eq!(replace_transliteration(&path, &bread, "khobez").unwrap(), 1);

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "food,n,x,bread,khobez,");
        assert_eq!(lines[2], "family,n");
    }

    #[test]
    fn test_replace_transliteration() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.csv");
        let bread = entry("food", "bread", "khubz");
        append_entries(&path, &[bread.clone(), entry("food", "water", "mayy")]).unwrap();

        assert_eq!(replace_transliteration(&path, &bread, "khobez").unwrap(), 1);

        let entries = load_entries(&path, &SelectionFilter::all()).unwrap();
        assert_eq!(entries[0].arabic_latin, "khobez");
        assert_eq!(entries[1].arabic_latin, "mayy");
        assert!(!path.with_extension("csv.tmp").exists());
    }
}
