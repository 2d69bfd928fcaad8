//! tjsonb CLI - normalise, compare and aggregate timestamped JSON documents.

use chrono::FixedOffset;
use clap::{Parser, Subcommand, ValueEnum};
use tjsonb_core::{CodecOptions, JsonStyle, TimestampStyle};

mod commands;

use commands::{average, functions, normalize, overlaps, range, Context};

#[derive(Parser)]
#[command(name = "tjsonb")]
#[command(about = "Timestamped JSON document operations")]
struct Cli {
    /// Timestamp layout on output
    #[arg(long, global = true, value_enum, default_value_t = TimestampArg::Postgres)]
    timestamp_style: TimestampArg,
    /// JSON layout on output
    #[arg(long, global = true, value_enum, default_value_t = JsonArg::Compact)]
    json_style: JsonArg,
    /// Zone for timestamps written without one, e.g. +02:00 (default: UTC)
    #[arg(long, global = true, value_parser = parse_offset_arg)]
    default_offset: Option<FixedOffset>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Re-format one document per line
    Normalize {
        /// Input file (or stdin if not provided)
        input: Option<String>,
        /// Output as JSON objects
        #[arg(long)]
        json: bool,
    },
    /// Check whether two documents share an instant and matching content
    Overlaps {
        /// First document (`timestamp|json`)
        first: String,
        /// Second document (`timestamp|json`)
        second: String,
    },
    /// Report whether START..END is ordered with matching content
    Range {
        /// Start document (`timestamp|json`)
        start: String,
        /// End document (`timestamp|json`)
        end: String,
    },
    /// Average numeric documents, one per line
    Average {
        /// Input file (or stdin if not provided)
        input: Option<String>,
        /// Average this member of object documents instead of the root value
        #[arg(long)]
        field: Option<String>,
    },
    /// List registered functions
    Functions,
}

#[derive(Clone, Copy, ValueEnum)]
enum TimestampArg {
    Postgres,
    Rfc3339,
}

#[derive(Clone, Copy, ValueEnum)]
enum JsonArg {
    Compact,
    Spaced,
}

fn parse_offset_arg(value: &str) -> Result<FixedOffset, String> {
    tjsonb_canonical::parse_offset(value).ok_or_else(|| format!("invalid UTC offset: {value}"))
}

impl Cli {
    fn codec_options(&self) -> CodecOptions {
        let defaults = CodecOptions::default();
        CodecOptions {
            timestamp_style: match self.timestamp_style {
                TimestampArg::Postgres => TimestampStyle::Postgres,
                TimestampArg::Rfc3339 => TimestampStyle::Rfc3339,
            },
            json_style: match self.json_style {
                JsonArg::Compact => JsonStyle::Compact,
                JsonArg::Spaced => JsonStyle::Spaced,
            },
            default_offset: self.default_offset.unwrap_or(defaults.default_offset),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = Context::new(cli.codec_options());

    let result = match cli.command {
        Commands::Normalize { input, json } => normalize::run(&ctx, input, json),
        Commands::Overlaps { first, second } => overlaps::run(&ctx, &first, &second),
        Commands::Range { start, end } => range::run(&ctx, &start, &end),
        Commands::Average { input, field } => average::run(&ctx, input, field),
        Commands::Functions => functions::run(&ctx),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
