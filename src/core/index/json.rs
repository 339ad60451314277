//! Pretty JSON exports.
//!
//! All exports use two-space indentation and sorted keys. Empty maps and
//! lists are written as `{}` and `[]`. Scores are always written with
//! eight fractional digits.

use serde::Serialize;
use serde_json::value::RawValue;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::error::{Result, StemdexError};
use crate::core::index::SearchResult;

/// Write `word → { document → [positions] }`
pub fn write_index(
    index: &BTreeMap<String, BTreeMap<String, BTreeSet<usize>>>,
    writer: &mut dyn Write,
) -> Result<()> {
    serde_json::to_writer_pretty(writer, index)?;
    Ok(())
}

/// Write `document → token count`
pub fn write_counts(counts: &BTreeMap<String, usize>, writer: &mut dyn Write) -> Result<()> {
    serde_json::to_writer_pretty(writer, counts)?;
    Ok(())
}

/// Exported form of one search result
#[derive(Serialize)]
struct ResultEntry<'a> {
    #[serde(rename = "where")]
    document: &'a str,
    count: usize,
    score: Box<RawValue>,
}

impl<'a> ResultEntry<'a> {
    fn from_result(result: &'a SearchResult) -> Result<Self> {
        Ok(Self {
            document: &result.document,
            count: result.count,
            score: RawValue::from_string(format!("{:.8}", result.score()))?,
        })
    }
}

/// Write `query → [ {where, count, score} ]`
pub fn write_results(
    results: &BTreeMap<String, Vec<SearchResult>>,
    writer: &mut dyn Write,
) -> Result<()> {
    let mut entries: BTreeMap<&str, Vec<ResultEntry<'_>>> = BTreeMap::new();

    for (query, ranked) in results {
        let converted = ranked
            .iter()
            .map(ResultEntry::from_result)
            .collect::<Result<Vec<_>>>()?;
        entries.insert(query.as_str(), converted);
    }

    serde_json::to_writer_pretty(writer, &entries)?;
    Ok(())
}

/// Create `path` and hand a buffered writer to `write`
///
/// Any failure, whether creating the file or serializing into it, is
/// reported as an export error naming the path.
pub fn write_to_path<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    let run = || -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        write(&mut writer)?;
        writer.flush()?;
        Ok(())
    };

    run().map_err(|e| StemdexError::export(path, e))
}
