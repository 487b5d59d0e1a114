//! Word records returned by the remote word-list endpoint.
use crate::models::VocabularyEntry;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One page of the word-list response. Only `Records` is used.
#[derive(Debug, Default, Deserialize)]
pub struct RecordPage {
    #[serde(rename = "Records", default)]
    pub records: Vec<RemoteRecord>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RemoteRecord {
    #[serde(deserialize_with = "lenient_string", default)]
    pub word_id: String,
    #[serde(rename = "def", deserialize_with = "lenient_string", default)]
    pub english: String,
    #[serde(rename = "word", deserialize_with = "lenient_string", default)]
    pub arabic: String,
    #[serde(rename = "ps", deserialize_with = "lenient_string", default)]
    pub word_type: String,
    #[serde(default)]
    pub dia_codes: DialectCodes,
}

/// Dialect codes attached to a record. The service sends either a delimited
/// string (`"1,4"`) or an array.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DialectCodes(Vec<String>);

impl DialectCodes {
    pub fn contains(&self, code: &str) -> bool {
        self.0.iter().any(|c| c == code)
    }
}

impl<'de> Deserialize<'de> for DialectCodes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let codes = match Value::deserialize(deserializer)? {
            Value::Array(items) => items.iter().filter_map(scalar_to_string).collect(),
            other => scalar_to_string(&other)
                .map(|s| {
                    s.split(|c: char| !c.is_alphanumeric())
                        .filter(|part| !part.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        };
        Ok(Self(codes))
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Accepts strings, numbers and null (as empty).
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(scalar_to_string(&Value::deserialize(deserializer)?).unwrap_or_default())
}

/// A record after the transliteration scrape, as written to the transformed dump.
#[derive(Clone, Debug, Serialize)]
pub struct ImportedWord {
    pub word_id: String,
    pub english: String,
    pub arabic: String,
    pub word_type: String,
    pub dia_codes: DialectCodes,
    pub arabic_latin: String,
    pub tag: String,
}

impl ImportedWord {
    pub fn from_record(record: RemoteRecord, tag: &str, arabic_latin: String) -> Self {
        Self {
            word_id: record.word_id,
            english: record.english,
            arabic: record.arabic,
            word_type: record.word_type,
            dia_codes: record.dia_codes,
            arabic_latin,
            tag: tag.to_string(),
        }
    }

    pub fn to_entry(&self) -> VocabularyEntry {
        VocabularyEntry {
            tag: self.tag.clone(),
            word_type: self.word_type.clone(),
            arabic: self.arabic.clone(),
            english: self.english.clone(),
            arabic_latin: self.arabic_latin.clone(),
            word_id: self.word_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_record_page() {
        let page: RecordPage = serde_json::from_value(json!({
            "Result": "OK",
            "Records": [
                {"word_id": 1043, "def": "bread", "word": "خبز", "ps": "n", "dia_codes": "1,3"},
                {"word_id": "77", "def": null, "word": "ماء", "ps": "n", "dia_codes": ["2", 5]}
            ],
            "TotalRecordCount": 2
        }))
        .unwrap();

        assert_eq!(page.records.len(), 2);
        let bread = &page.records[0];
        assert_eq!(bread.word_id, "1043");
        assert_eq!(bread.english, "bread");
        assert!(bread.dia_codes.contains("1"));
        assert!(bread.dia_codes.contains("3"));

        let water = &page.records[1];
        assert_eq!(water.word_id, "77");
        assert_eq!(water.english, "");
        assert!(water.dia_codes.contains("5"));
        assert!(!water.dia_codes.contains("1"));
    }

    #[test]
    fn test_dialect_codes_match_exactly() {
        let codes: DialectCodes = serde_json::from_value(json!("11, 21")).unwrap();
        assert!(!codes.contains("1"));
        assert!(codes.contains("11"));
    }

    #[test]
    fn test_missing_records_is_empty_page() {
        let page: RecordPage = serde_json::from_value(json!({"Result": "OK"})).unwrap();
        assert!(page.records.is_empty());
    }
}
