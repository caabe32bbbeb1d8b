#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
//! `FlashTag` CLI - query a tag index from the command line
//!
//! Usage:
//!   `flashtag search --tags even,tri --limit 10`
//!   `flashtag demo --output demo.ftag`
//!   `flashtag build --input tags.csv --output tags.ftag`
//!   `flashtag top --k 5 --snapshot tags.ftag`

mod import;
mod output;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use flashtag_core::demo::{demo_index_with, DEFAULT_DEMO_SIZE};
use flashtag_core::{snapshot, FlashConfig, PageRequest, TagIndex};
use output::Format;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "flashtag")]
#[command(
    author,
    version,
    about = "FlashTag CLI - Tag-based inverted index over u32 IDs"
)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file
    #[arg(long, global = true, default_value = "flashtag.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Where the index comes from.
#[derive(Args, Debug)]
struct SourceArgs {
    /// Load the index from a snapshot file
    #[arg(long, conflicts_with_all = ["demo", "size"])]
    snapshot: Option<PathBuf>,

    /// Use the synthetic demo data set (the default)
    #[arg(long)]
    demo: bool,

    /// Number of IDs in the demo data set
    #[arg(long, default_value_t = DEFAULT_DEMO_SIZE)]
    size: u32,
}

#[derive(Subcommand)]
enum Commands {
    /// Find items carrying every given tag
    Search {
        /// Comma-separated tag names
        #[arg(short, long)]
        tags: String,

        /// Maximum number of IDs to print
        #[arg(short, long)]
        limit: Option<usize>,

        /// Number of matches to skip
        #[arg(short, long, default_value_t = 0)]
        offset: usize,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// List the largest tags
    Top {
        /// Number of tags to list
        #[arg(short, long)]
        k: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Show index statistics
    Info {
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Build a snapshot from a CSV file of `id,tag` rows
    Build {
        /// CSV file with a header row
        #[arg(short, long)]
        input: PathBuf,

        /// Snapshot file to write
        #[arg(short, long)]
        output: PathBuf,

        /// ID column name
        #[arg(long, default_value = "id")]
        id_column: String,

        /// Tag column name
        #[arg(long, default_value = "tag")]
        tag_column: String,

        /// Show progress bar
        #[arg(long, action = clap::ArgAction::Set, default_value_t = true)]
        progress: bool,
    },

    /// Write the demo data set as a snapshot
    Demo {
        /// Snapshot file to write
        #[arg(short, long)]
        output: PathBuf,

        /// Number of IDs
        #[arg(long, default_value_t = DEFAULT_DEMO_SIZE)]
        size: u32,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = FlashConfig::load_from_path(&cli.config)?;
    config.validate()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.logging.level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Search {
            tags,
            limit,
            offset,
            format,
            source,
        } => {
            let tags = parse_tags(&tags)?;
            let (index, _) = open_index(&source, &config)?;

            let start = Instant::now();
            let hits = index.search_and(&tags);
            let limit = limit.unwrap_or(config.query.default_page_size);
            let page = PageRequest::new(offset, limit).fetch(&hits, &config.query);
            let elapsed = start.elapsed();

            output::print_search(&output::SearchReport::new(&tags, elapsed, page), format)?;
        }
        Commands::Top { k, format, source } => {
            let (index, _) = open_index(&source, &config)?;
            let k = k.unwrap_or(config.query.default_top_k);
            output::print_top(&index.top_k_sizes(k), format)?;
        }
        Commands::Info { format, source } => {
            let (index, label) = open_index(&source, &config)?;
            output::print_info(&label, &index.stats(), format)?;
        }
        Commands::Build {
            input,
            output,
            id_column,
            tag_column,
            progress,
        } => {
            let import_config = import::ImportConfig {
                id_column,
                tag_column,
                show_progress: progress,
            };
            let (builder, stats) = import::import_csv(&input, &import_config)?;
            let index = builder.seal_with(&config.index);
            write_snapshot(&index, &output)?;

            println!("\n{}", "Import Summary".green().bold());
            println!("  Total records:    {}", stats.total);
            println!("  Imported:         {}", stats.imported.to_string().green());
            if stats.errors > 0 {
                println!("  Errors:           {}", stats.errors.to_string().red());
            }
            println!("  Tags:             {}", index.tag_count());
            println!("  Duration:         {} ms", stats.duration_ms);
            println!(
                "  Throughput:       {:.0} records/sec",
                stats.records_per_sec()
            );
            println!("  Snapshot:         {}", output.display());
        }
        Commands::Demo { output, size } => {
            let index = demo_index_with(size, &config.index);
            write_snapshot(&index, &output)?;
            println!(
                "{} demo index ({} IDs, {} tags) to {}",
                "Wrote".green().bold(),
                size,
                index.tag_count(),
                output.display()
            );
        }
    }

    Ok(())
}

/// Splits a comma-separated tag list, dropping blanks.
fn parse_tags(raw: &str) -> anyhow::Result<Vec<String>> {
    let tags: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();
    if tags.is_empty() {
        anyhow::bail!("No tags given. Use --tags a,b,c");
    }
    Ok(tags)
}

/// Loads the snapshot or builds the demo index, returning it with a label.
fn open_index(source: &SourceArgs, config: &FlashConfig) -> anyhow::Result<(TagIndex, String)> {
    match &source.snapshot {
        Some(path) => {
            let index = snapshot::load(path)
                .with_context(|| format!("Failed to load snapshot {}", path.display()))?;
            Ok((index, path.display().to_string()))
        }
        None => {
            if !source.demo {
                tracing::debug!("No --snapshot given, using demo data");
            }
            let start = Instant::now();
            let index = demo_index_with(source.size, &config.index);
            tracing::info!(
                size = source.size,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Built demo index"
            );
            Ok((index, format!("demo ({} IDs)", source.size)))
        }
    }
}

fn write_snapshot(index: &TagIndex, path: &Path) -> anyhow::Result<()> {
    snapshot::save(index, path)
        .with_context(|| format!("Failed to write snapshot {}", path.display()))
}
