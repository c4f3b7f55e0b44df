//! Command-line surface for sitlog.
//!
//! Every subcommand follows the same path: open the newest (or explicitly
//! named) state snapshot, read the two persisted log collections, merge and
//! bucket them, then act on the result. Fatal engine errors abort the
//! command naming the failing collection; quarantined records are reported
//! on stderr and included in exports, never silently dropped.

use anyhow::Context;
use clap::{Parser, Subcommand};
use sitlog_core::config::Config;
use sitlog_core::stats::{format_elapsed, summarize, total_elapsed};
use sitlog_core::{bucketize, export, merge, BucketKeys, Bucketed, DateRange, LogRecord, SearchQuery};
use sitlog_state::{files, SnapshotFile, StateReader};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sitlog", about = "Merge, bucket, search, and export meditation practice logs")]
pub struct Cli {
    /// Write debug logs to /tmp/sitlog-debug.log (tail -f to inspect).
    #[arg(long)]
    pub debug: bool,

    /// State snapshot file to read. Defaults to the newest snapshot in the
    /// configured data directory.
    #[arg(long, global = true)]
    pub state: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Export the merged logs as a JSON artifact.
    Export {
        /// Export the bucket map instead of the flat merged sequence.
        #[arg(long)]
        bucketed: bool,
        /// Output file. Defaults to a timestamped name in the data directory.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Search log notes with a case-insensitive regex.
    Search {
        pattern: String,
        /// Restrict the search to one bucket key.
        #[arg(long)]
        bucket: Option<String>,
        /// Inclusive "from,to" range; each element is a days-ago integer or
        /// a %Y-%m-%d date, and either end may be empty.
        #[arg(long)]
        date_range: Option<String>,
        /// Print full records as JSON instead of notes text.
        #[arg(long)]
        full: bool,
    },
    /// List bucket keys with record counts.
    Buckets,
    /// Per-bucket session counts and total practice time.
    Stats,
    /// Remove all but the newest snapshots from the data directory.
    Prune,
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load()?;

    if let Command::Prune = cli.command {
        return prune(&config);
    }

    let state_path = match &cli.state {
        Some(path) => path.clone(),
        None => {
            let dir = config.storage.data_dir();
            files::latest_snapshot(&dir, &config.export.file_stem)?
                .with_context(|| format!("no state snapshot found in {}", dir.display()))?
        }
    };
    let state = SnapshotFile::open(&state_path)?;
    let primary = state.read_key(&config.storage.primary_key)?;
    let mala = state.read_key(&config.storage.mala_key)?;

    let records = merge(primary, mala)?;
    let keys = BucketKeys::from(&config.buckets);
    let bucketed = bucketize(&records, &keys);

    if !bucketed.unrecognized.is_empty() {
        eprintln!(
            "warning: {} record(s) have an unrecognized course shape; they are listed under {:?} in bucketed exports",
            bucketed.unrecognized.len(),
            keys.unrecognized,
        );
    }

    match cli.command {
        Command::Export { bucketed: as_buckets, output } => {
            run_export(&config, &keys, &records, &bucketed, as_buckets, output)
        }
        Command::Search { pattern, bucket, date_range, full } => {
            run_search(&records, &bucketed, &pattern, bucket, date_range, full)
        }
        Command::Buckets => {
            for (key, bucket) in bucketed.buckets.iter() {
                println!("{key}  ({} records)", bucket.len());
            }
            if !bucketed.unrecognized.is_empty() {
                println!("{}  ({} records)", keys.unrecognized, bucketed.unrecognized.len());
            }
            Ok(())
        }
        Command::Stats => {
            run_stats(&records, &bucketed);
            Ok(())
        }
        Command::Prune => unreachable!("handled above"),
    }
}

fn run_export(
    config: &Config,
    keys: &BucketKeys,
    records: &[LogRecord],
    bucketed: &Bucketed<'_>,
    as_buckets: bool,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let path = match output {
        Some(path) => path,
        None => {
            let dir = config.storage.data_dir();
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
            dir.join(export::artifact_name(
                &config.export.file_stem,
                chrono::Utc::now(),
            ))
        }
    };

    let file = std::fs::File::create(&path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    if as_buckets {
        export::write_bucketed(file, bucketed, keys, config.export.pretty)?;
    } else {
        export::write_flat(file, records, config.export.pretty)?;
    }

    println!(
        "exported {} record(s) ({} bucketed, {} unrecognized) to {}",
        records.len(),
        bucketed.buckets.record_count(),
        bucketed.unrecognized.len(),
        path.display(),
    );
    Ok(())
}

fn run_search(
    records: &[LogRecord],
    bucketed: &Bucketed<'_>,
    pattern: &str,
    bucket: Option<String>,
    date_range: Option<String>,
    full: bool,
) -> anyhow::Result<()> {
    let mut query = SearchQuery::new(pattern)?;
    if let Some(range) = date_range {
        let today = chrono::Local::now().date_naive();
        query = query.with_range(DateRange::parse(&range, today)?);
    }

    let matches = match &bucket {
        Some(key) => {
            let bucket = bucketed
                .buckets
                .get(key)
                .with_context(|| format!("no bucket named {key:?}"))?;
            query.filter(bucket.iter().copied())
        }
        None => query.filter(records),
    };

    println!("{} log(s) found\n", matches.len());
    if full {
        println!("{}", serde_json::to_string_pretty(&matches)?);
    } else {
        let notes: Vec<&str> = matches
            .iter()
            .filter_map(|r| r.entry().notes_text())
            .collect();
        println!("{}", notes.join("\n\n"));
    }
    Ok(())
}

fn run_stats(records: &[LogRecord], bucketed: &Bucketed<'_>) {
    println!("{:<24}{:>10}{:>14}", "Bucket", "Sessions", "Total Time");
    for row in summarize(bucketed) {
        println!(
            "{:<24}{:>10}{:>14}",
            row.key,
            row.sessions,
            format_elapsed(row.total_secs),
        );
    }
    if !bucketed.unrecognized.is_empty() {
        println!(
            "{:<24}{:>10}{:>14}",
            "(unrecognized)",
            bucketed.unrecognized.len(),
            format_elapsed(total_elapsed(bucketed.unrecognized.iter().copied())),
        );
    }
    println!(
        "{:<24}{:>10}{:>14}",
        "Overall",
        records.len(),
        format_elapsed(total_elapsed(records)),
    );
}

fn prune(config: &Config) -> anyhow::Result<()> {
    let dir = config.storage.data_dir();
    let removed = files::prune_snapshots(&dir, &config.export.file_stem, config.storage.keep_snapshots)?;
    match removed.len() {
        0 => println!("nothing to prune in {}", dir.display()),
        n => println!("removed {n} old snapshot(s) from {}", dir.display()),
    }
    Ok(())
}
