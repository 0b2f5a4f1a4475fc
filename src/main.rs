//! Postcards CLI
//!
//! Command-line interface over a postcard list file:
//! - Count and query postcards
//! - Merge newly received postcards
//! - Export the list

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use postcards::config::{generate_default_config, Config, LoggingConfig};
use postcards::{DateRange, PostcardStore, WriteMode};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "postcards")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Indexed postcard list: query by date, sender or receiver")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Postcard file (default: from config)
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    /// Config file (default: search standard locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the number of postcards
    Count,

    /// Postcards sent by SENDER
    #[command(name = "from")]
    BySender {
        sender: String,
    },

    /// Postcards addressed to RECEIVER
    #[command(name = "to")]
    ByReceiver {
        receiver: String,
    },

    /// Postcards dated between START and END inclusive (YYYY-MM-DD)
    Range {
        start: NaiveDate,
        end: NaiveDate,
    },

    /// Show index statistics
    Stats,

    /// List known senders
    Senders,

    /// List known receivers
    Receivers,

    /// Append postcards from another file and write the combined list
    Merge {
        /// File with newly received postcards
        path: PathBuf,
        /// Where to write the combined list (default: the postcard file)
        #[arg(long)]
        into: Option<PathBuf>,
    },

    /// Write the postcard list to another file
    Export {
        output: PathBuf,
        /// Append instead of overwriting
        #[arg(long)]
        append: bool,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    init_logging(&config.logging);

    let file = cli.file.clone().unwrap_or_else(|| config.storage.path());
    let json = cli.format == "json";

    match cli.command {
        Commands::Count => {
            let store = open(&file)?;
            if json {
                println!("{}", serde_json::json!({ "count": store.count() }));
            } else {
                println!("{}", store.count());
            }
        }

        Commands::BySender { sender } => {
            let store = open(&file)?;
            print_lines(&store.query_by_sender(&sender), json)?;
        }

        Commands::ByReceiver { receiver } => {
            let store = open(&file)?;
            print_lines(&store.query_by_receiver(&receiver), json)?;
        }

        Commands::Range { start, end } => {
            let range = DateRange::new(start, end);
            if range.is_empty() {
                tracing::warn!("Range start {} is after end {}", start, end);
            }
            let store = open(&file)?;
            print_lines(&store.query_range(range), json)?;
        }

        Commands::Stats => {
            let store = open(&file)?;
            let stats = store.stats();
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Postcards v{}", env!("CARGO_PKG_VERSION"));
                println!();
                println!("File:       {}", file.display());
                println!("Postcards:  {}", stats.records);
                println!("Dates:      {}", stats.dates);
                println!("Senders:    {}", stats.senders);
                println!("Receivers:  {}", stats.receivers);
                if let (Some(first), Some(last)) = (stats.first_date, stats.last_date) {
                    println!("Span:       {} to {}", first, last);
                }
            }
        }

        Commands::Senders => {
            let store = open(&file)?;
            print_lines(&store.senders(), json)?;
        }

        Commands::Receivers => {
            let store = open(&file)?;
            print_lines(&store.receivers(), json)?;
        }

        Commands::Merge { path, into } => {
            let mut store = PostcardStore::new();
            if file.exists() {
                store.load_file(&file)?;
            }
            let added = store
                .append_file(&path)
                .with_context(|| format!("merging {}", path.display()))?;

            let target = into.unwrap_or(file);
            store.save(&target, WriteMode::Overwrite)?;
            println!(
                "Merged {} postcards into {} ({} total)",
                added,
                target.display(),
                store.count()
            );
        }

        Commands::Export { output, append } => {
            let store = open(&file)?;
            let mode = if append {
                WriteMode::Append
            } else {
                WriteMode::Overwrite
            };
            store.save(&output, mode)?;
            println!("Exported {} postcards to {}", store.count(), output.display());
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("Config written to {}", path.display());
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("postcards={}", logging.level)));

    // Logs go to stderr so query output can be piped
    if logging.is_json() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn open(file: &Path) -> anyhow::Result<PostcardStore> {
    let mut store = PostcardStore::new();
    store
        .load_file(file)
        .with_context(|| format!("loading {}", file.display()))?;
    Ok(store)
}

fn print_lines<T: AsRef<str> + serde::Serialize>(lines: &[T], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(lines)?);
    } else {
        for line in lines {
            println!("{}", line.as_ref());
        }
    }
    Ok(())
}
