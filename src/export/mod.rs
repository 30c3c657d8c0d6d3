//! Batch export of spell notes to disk.
//!
//! Loads a JSON array of spell records, renders each one and writes it to
//! `<output_dir>/<slug>.md`. Rendering runs in parallel; writes are
//! sequential in input order so colliding slugs resolve the same way every run.

pub mod archive;

use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Instant;

use rayon::prelude::*;
use regex::Regex;
use serde_json::Value;

use crate::constants::files;
use crate::error::{Error, Result};
use crate::spell::spell_to_markdown;

/// Runs of characters that are not safe in a note file name.
#[allow(clippy::expect_used)]
static RE_UNSAFE_FILENAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^A-Za-z0-9_' -]+").expect("valid regex: RE_UNSAFE_FILENAME")
});

/// Outcome of an export run.
#[derive(Debug, Default)]
pub struct ExportReport {
    /// Notes written, in input order.
    pub written: Vec<PathBuf>,
    /// Notes that could not be written. The rest of the batch still ran.
    pub failed: Vec<Error>,
}

impl ExportReport {
    /// Whether every record was written.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Read a JSON file whose top level is an array of spell records.
pub fn load_spells(path: &Path) -> Result<Vec<Value>> {
    let raw = fs_err::read_to_string(path).map_err(|e| Error::io(e, path.to_path_buf()))?;
    let value: Value = serde_json::from_str(&raw)
        .map_err(|e| Error::parse(e.to_string(), path.to_path_buf()))?;

    match value {
        Value::Array(spells) => {
            tracing::info!("Loaded {} spells from {}", spells.len(), path.display());
            Ok(spells)
        }
        _ => Err(Error::InvalidInput("input JSON must be an array of spells".to_string())),
    }
}

/// Reduce a spell name to `[A-Za-z0-9_' -]`, replacing each unsafe run with `-`.
///
/// `"Tasha's Hideous Laughter"` stays as is; `"Mordenkainen/Sword"` becomes
/// `"Mordenkainen-Sword"`. A name with nothing safe in it becomes `"spell"`.
pub fn slugify_filename(name: &str) -> String {
    let safe = RE_UNSAFE_FILENAME.replace_all(name, "-");
    let safe = safe.trim_matches('-');
    if safe.is_empty() {
        files::FALLBACK_SLUG.to_string()
    } else {
        safe.to_string()
    }
}

/// File name of the note for a spell record.
pub fn spell_file_name(spell: &Value) -> String {
    let name = spell
        .get("name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| {
            tracing::debug!("Spell record has no name, using {:?}", files::UNNAMED_SPELL);
            files::UNNAMED_SPELL
        });
    format!("{}.{}", slugify_filename(name), files::NOTE_EXTENSION)
}

/// Render every record and write it into `output_dir`, creating the directory first.
///
/// Only a failure to create the directory aborts; per-note write failures are
/// collected in the report.
pub fn export_spells(spells: &[Value], output_dir: &Path) -> Result<ExportReport> {
    fs_err::create_dir_all(output_dir).map_err(|e| Error::io(e, output_dir.to_path_buf()))?;

    let start = Instant::now();
    let rendered: Vec<(String, String)> = spells
        .par_iter()
        .map(|spell| (spell_file_name(spell), spell_to_markdown(spell)))
        .collect();

    let mut report = ExportReport::default();
    for (file_name, markdown) in rendered {
        let path = output_dir.join(file_name);
        match fs_err::write(&path, markdown) {
            Ok(()) => {
                tracing::debug!("Wrote {}", path.display());
                report.written.push(path);
            }
            Err(e) => {
                tracing::warn!("Failed to write {}: {e}", path.display());
                report.failed.push(Error::io(e, path));
            }
        }
    }

    let elapsed = start.elapsed();
    tracing::info!(
        "Exported {} spells to {} in {elapsed:?} ({} failed)",
        report.written.len(),
        output_dir.display(),
        report.failed.len()
    );

    Ok(report)
}

/// Write `_version.txt` containing exactly `version`.
pub fn write_version_file(output_dir: &Path, version: &str) -> Result<PathBuf> {
    let path = output_dir.join(files::VERSION_FILE);
    fs_err::write(&path, version).map_err(|e| Error::io(e, path.clone()))?;
    Ok(path)
}
