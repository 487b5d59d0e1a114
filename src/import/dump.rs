//! JSON dump files written during an import for manual inspection.
//! Nothing reads them back.

use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Writes `value` as pretty-printed UTF-8 JSON, replacing any previous dump.
pub fn write_dump<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), std::io::Error> {
    let json_string = serde_json::to_string_pretty(value)?;
    let mut file = File::create(path)?;
    file.write_all(json_string.as_bytes())?;
    debug!("Wrote dump {}", path.display());
    Ok(())
}
