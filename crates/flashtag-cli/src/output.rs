//! Result printing for the `search`, `top` and `info` commands.

use clap::ValueEnum;
use colored::Colorize;
use flashtag_core::{IndexStats, Page, TagSize};
use serde::Serialize;
use std::time::Duration;

/// Output format
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Text,
    Json,
}

/// Everything `search` reports.
#[derive(Debug, Serialize)]
pub struct SearchReport<'a> {
    pub tags: &'a [String],
    pub elapsed_us: u64,
    #[serde(flatten)]
    pub page: Page,
}

impl<'a> SearchReport<'a> {
    pub fn new(tags: &'a [String], elapsed: Duration, page: Page) -> Self {
        Self {
            tags,
            elapsed_us: elapsed.as_micros() as u64,
            page,
        }
    }
}

pub fn print_search(report: &SearchReport<'_>, format: Format) -> anyhow::Result<()> {
    if format == Format::Json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!(
        "Found {} matches for [{}] in {}",
        report.page.total.to_string().green().bold(),
        report.tags.join(", ").cyan(),
        format_elapsed(report.elapsed_us)
    );
    if report.page.ids.is_empty() {
        println!("{}", "No results on this page.".dimmed());
        return Ok(());
    }

    println!(
        "IDs {}..{}:",
        report.page.offset,
        report.page.offset + report.page.ids.len()
    );
    for id in &report.page.ids {
        println!("  {id}");
    }
    if report.page.has_more() {
        println!("{}", "(more results available, use --offset)".dimmed());
    }
    Ok(())
}

pub fn print_top(ranked: &[TagSize], format: Format) -> anyhow::Result<()> {
    if format == Format::Json {
        println!("{}", serde_json::to_string_pretty(ranked)?);
        return Ok(());
    }

    if ranked.is_empty() {
        println!("{}", "No tags.".dimmed());
        return Ok(());
    }
    let width = ranked.iter().map(|t| t.name.len()).max().unwrap_or(0);
    for (rank, tag) in ranked.iter().enumerate() {
        println!(
            "{:>3}. {:<width$}  {}",
            rank + 1,
            tag.name.cyan(),
            tag.size,
            width = width
        );
    }
    Ok(())
}

pub fn print_info(source: &str, stats: &IndexStats, format: Format) -> anyhow::Result<()> {
    if format == Format::Json {
        println!("{}", serde_json::to_string_pretty(stats)?);
        return Ok(());
    }

    println!("{} {}", "FlashTag Index:".bold(), source);
    println!("  Tags:             {}", stats.tag_count);
    println!("  Distinct IDs:     {}", stats.distinct_ids);
    println!("  Total postings:   {}", stats.total_postings);
    println!(
        "  Compressed size:  {:.2} MB",
        stats.serialized_bytes as f64 / (1024.0 * 1024.0)
    );
    Ok(())
}

fn format_elapsed(us: u64) -> String {
    if us >= 1_000 {
        format!("{:.3} ms", us as f64 / 1000.0)
    } else {
        format!("{us} µs")
    }
}
