//! Bulk import of `id,tag` rows from CSV.
//!
//! Each row assigns one tag to one item ID. Rows with an unparsable ID or a
//! blank tag are counted as errors and skipped.

use anyhow::{Context, Result};
use flashtag_core::TagIndexBuilder;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Import configuration
pub struct ImportConfig {
    pub id_column: String,
    pub tag_column: String,
    pub show_progress: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            id_column: "id".to_string(),
            tag_column: "tag".to_string(),
            show_progress: true,
        }
    }
}

/// Import statistics
#[derive(Debug, Default)]
pub struct ImportStats {
    pub total: usize,
    pub imported: usize,
    pub errors: usize,
    pub duration_ms: u64,
}

impl ImportStats {
    /// Records per second
    pub fn records_per_sec(&self) -> f64 {
        if self.duration_ms == 0 {
            0.0
        } else {
            (self.imported as f64) / (self.duration_ms as f64 / 1000.0)
        }
    }
}

/// Reads `path` into a builder. The caller decides how to seal it.
pub fn import_csv(path: &Path, config: &ImportConfig) -> Result<(TagIndexBuilder, ImportStats)> {
    let file = File::open(path).context("Failed to open CSV file")?;
    let file_size = file.metadata()?.len();
    let mut reader = csv::Reader::from_reader(BufReader::with_capacity(128 * 1024, file));

    let headers = reader.headers()?.clone();
    let id_idx = column_index(&headers, &config.id_column)?;
    let tag_idx = column_index(&headers, &config.tag_column)?;

    let total = reader.records().count();
    if total == 0 {
        anyhow::bail!("Empty file");
    }

    // Reopen for processing
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(BufReader::with_capacity(128 * 1024, file));

    let progress = create_progress_bar(total, config.show_progress);
    if config.show_progress {
        progress.set_message(format!(
            "Importing {} rows ({:.1} MB)",
            total,
            file_size as f64 / (1024.0 * 1024.0)
        ));
    }

    let mut builder = TagIndexBuilder::new();
    let mut stats = ImportStats::default();
    let start = std::time::Instant::now();

    for result in reader.records() {
        progress.inc(1);
        let Ok(record) = result else {
            stats.errors += 1;
            continue;
        };
        let (Some(raw_id), Some(tag)) = (record.get(id_idx), record.get(tag_idx)) else {
            stats.errors += 1;
            continue;
        };
        let tag = tag.trim();
        match raw_id.trim().parse::<u32>() {
            Ok(id) if !tag.is_empty() => {
                builder.add(id, tag);
                stats.imported += 1;
            }
            _ => stats.errors += 1,
        }
    }

    progress.finish_with_message("Import complete");
    stats.duration_ms = start.elapsed().as_millis() as u64;
    stats.total = total;

    Ok((builder, stats))
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .with_context(|| format!("Column '{}' not found", name))
}

/// Create progress bar
fn create_progress_bar(total: usize, show: bool) -> ProgressBar {
    if !show {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}
