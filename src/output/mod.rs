use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::path::{Path, PathBuf};

use crate::resolver::VideoRecord;
use crate::TubescribeError;

/// One output row. Field order is part of the file format: title, url,
/// transcript. An absent transcript serializes as null.
#[derive(Debug, Serialize)]
struct OutputRecord<'a> {
    title: &'a str,
    url: &'a str,
    transcript: Option<&'a str>,
}

/// Render the records as a UTF-8 JSON array with 4-space indentation
pub fn render_json(records: &[VideoRecord]) -> Result<String> {
    let rows: Vec<OutputRecord> = records
        .iter()
        .map(|record| OutputRecord {
            title: &record.title,
            url: &record.url,
            transcript: record.transcript.as_deref(),
        })
        .collect();

    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    rows.serialize(&mut serializer)
        .context("Failed to serialize transcript records")?;

    String::from_utf8(buf).context("Serialized output was not UTF-8")
}

/// Find the first unused default filename for a tag: transcripts_<tag>_0.json,
/// transcripts_<tag>_1.json, ... The existence check is injected so callers
/// can probe the real filesystem or a test set. Sequential probing, not
/// atomic: a concurrent writer could race the check, which is acceptable for
/// a single-threaded run.
pub fn next_available_name(tag: &str, mut exists: impl FnMut(&str) -> bool) -> String {
    let mut suffix: u32 = 0;
    loop {
        let candidate = format!("transcripts_{}_{}.json", tag, suffix);
        if !exists(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

/// Write the finished records to the explicit path, or to the first
/// non-colliding default name for the tag. Returns the confirmation message.
pub fn write_records(
    records: &[VideoRecord],
    tag: &str,
    output_file: Option<&Path>,
) -> Result<String> {
    let path: PathBuf = match output_file {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(next_available_name(tag, |name| Path::new(name).exists())),
    };

    let content = render_json(records)?;
    fs_err::write(&path, content)
        .map_err(|e| TubescribeError::File(format!("could not write {}: {}", path.display(), e)))?;

    tracing::info!("Wrote {} record(s) to {}", records.len(), path.display());

    Ok(format!("Formatted transcripts saved to {}.", path.display()))
}
