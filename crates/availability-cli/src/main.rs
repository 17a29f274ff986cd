//! `room-availability` CLI — turn a feed of booked intervals into per-room
//! availability from the command line.
//!
//! The feed is a JSON array of `{id, title, start, end, room}` records with
//! local date-times (`2026-03-16T10:00:00`), read from `-i` or stdin.
//!
//! ## Usage
//!
//! ```sh
//! # Timeline for today through +7 days
//! room-availability timeline -i bookings.json
//!
//! # A specific range, one room, custom hours
//! room-availability timeline -i bookings.json --start 2026-03-16 --end 2026-03-20 \
//!     --room "Room 214" --opening 08:00:00 --closing 18:00:00
//!
//! # Known rooms, one per line
//! room-availability rooms -i bookings.json
//!
//! # Current status of a room
//! room-availability summary -i bookings.json --room "Room 214" --now 2026-03-16T10:30:00
//!
//! # First free hour in a room
//! room-availability next -i bookings.json --room "Room 214" --minutes 60
//! ```
//!
//! Set `RUST_LOG=debug` to see engine diagnostics on stderr.

use anyhow::{Context, Result};
use availability_engine::{
    compute_for_request, first_available, summarize_room, BookedInterval, EngineConfig,
    OperatingWindow, RoomFilter,
};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "room-availability",
    version,
    about = "Room availability timelines from booked intervals"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every subcommand: where the feed comes from and how the
/// engine is configured.
#[derive(Args)]
struct FeedArgs {
    /// Input JSON file of booked intervals (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// JSON engine config file (window, default rooms, range span)
    #[arg(long)]
    config: Option<String>,
    /// Opening time, overriding the config (e.g. 09:00:00)
    #[arg(long)]
    opening: Option<NaiveTime>,
    /// Closing time, overriding the config (e.g. 21:00:00)
    #[arg(long)]
    closing: Option<NaiveTime>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the labeled available/booked timeline as JSON
    Timeline {
        #[command(flatten)]
        feed: FeedArgs,
        /// First day of the range (defaults to --today)
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Last day of the range (defaults to --today plus the configured span)
        #[arg(long)]
        end: Option<NaiveDate>,
        /// Reference date for defaults (defaults to the local date)
        #[arg(long)]
        today: Option<NaiveDate>,
        /// Only include this room ("all" for every room)
        #[arg(long)]
        room: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// List the rooms found in the feed, one per line
    Rooms {
        #[command(flatten)]
        feed: FeedArgs,
    },
    /// Show the current status and upcoming slots of one room as JSON
    Summary {
        #[command(flatten)]
        feed: FeedArgs,
        #[arg(long)]
        room: String,
        /// Reference instant (defaults to the local time)
        #[arg(long)]
        now: Option<NaiveDateTime>,
        /// Maximum number of upcoming bookings and free slots listed
        #[arg(long, default_value_t = availability_engine::summary::DEFAULT_UPCOMING_LIMIT)]
        limit: usize,
    },
    /// Find the first free slot of at least N minutes in one room
    Next {
        #[command(flatten)]
        feed: FeedArgs,
        #[arg(long)]
        room: String,
        /// Minimum slot length in minutes
        #[arg(long)]
        minutes: u32,
        /// Reference instant (defaults to the local time)
        #[arg(long)]
        now: Option<NaiveDateTime>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Timeline {
            feed,
            start,
            end,
            today,
            room,
            output,
        } => {
            let (bookings, config) = load(&feed)?;
            let today = today.unwrap_or_else(|| Local::now().date_naive());
            let report = compute_for_request(
                &bookings,
                start.map(|d| d.and_time(NaiveTime::MIN)),
                end.map(|d| d.and_time(NaiveTime::MIN)),
                today,
                &config,
            )
            .context("Failed to compute availability")?;

            let Ok(filter) = room.as_deref().unwrap_or("all").parse::<RoomFilter>();
            write_json(output.as_deref(), &report.filter(&filter))?;
        }
        Commands::Rooms { feed } => {
            let (bookings, config) = load(&feed)?;
            for room in availability_engine::enumerate_rooms(&bookings, &config) {
                println!("{}", room);
            }
        }
        Commands::Summary {
            feed,
            room,
            now,
            limit,
        } => {
            let (bookings, config) = load(&feed)?;
            let now = now.unwrap_or_else(|| Local::now().naive_local());
            let report = compute_for_request(&bookings, None, None, now.date(), &config)
                .context("Failed to compute availability")?;
            write_json(None, &summarize_room(&report, &room, now, limit))?;
        }
        Commands::Next {
            feed,
            room,
            minutes,
            now,
        } => {
            let (bookings, config) = load(&feed)?;
            let now = now.unwrap_or_else(|| Local::now().naive_local());
            let report = compute_for_request(&bookings, None, None, now.date(), &config)
                .context("Failed to compute availability")?;
            match first_available(&report, &room, now, minutes) {
                Some(slot) => println!(
                    "{} {} - {}",
                    slot.room,
                    slot.start.format("%Y-%m-%d %H:%M"),
                    slot.end.format("%H:%M")
                ),
                None => {
                    eprintln!(
                        "No free slot of {} minutes in {} before {}",
                        minutes, room, report.range.end()
                    );
                    process::exit(1);
                }
            }
        }
    }

    Ok(())
}

/// Read the feed and build the engine config from `--config` plus overrides.
fn load(args: &FeedArgs) -> Result<(Vec<BookedInterval>, EngineConfig)> {
    let mut config = match args.config.as_deref() {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            EngineConfig::from_json(&raw)
                .with_context(|| format!("Invalid config file: {}", path))?
        }
        None => EngineConfig::default(),
    };

    if args.opening.is_some() || args.closing.is_some() {
        config.window = OperatingWindow::new(
            args.opening.unwrap_or(config.window.opening),
            args.closing.unwrap_or(config.window.closing),
        )
        .context("Invalid --opening/--closing")?;
    }

    let bookings = read_feed(args.input.as_deref())?;
    info!(bookings = bookings.len(), "Loaded feed");

    Ok((bookings, config))
}

/// Parse the booked-interval feed from `path`, or from stdin when absent.
fn read_feed(path: Option<&str>) -> Result<Vec<BookedInterval>> {
    let parsed = match path {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("Failed to read file: {}", path))?;
            serde_json::from_reader(BufReader::new(file))
        }
        None => serde_json::from_reader(io::stdin().lock()),
    };
    parsed.context("Failed to parse booked intervals JSON")
}

/// Pretty-print `value` as JSON to `path`, or to stdout when absent.
fn write_json<T: Serialize>(path: Option<&str>, value: &T) -> Result<()> {
    match path {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("Failed to write file: {}", path))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, value)?;
            writer
                .flush()
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, value)?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}
