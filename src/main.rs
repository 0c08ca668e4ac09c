//! pgurl - PostgreSQL connection URI converter
//!
//! Prints the libpq keyword/value form of a connection URI, or splits a
//! multi-host URI into one URI per host.

use anyhow::Result;
use clap::Parser;
use pgurl::core::{AppConfig, OutputFormat, Overrides};
use tracing::{debug, error};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(
    name = "pgurl",
    about = "Convert PostgreSQL connection URIs into libpq connection strings",
    version
)]
struct Args {
    /// Connection URI (defaults to $DATABASE_URL)
    url: Option<String>,

    /// Print one single-host URI per host instead of a connection string
    #[arg(long)]
    split: bool,

    /// Output format: text or json (defaults to $PGURL_OUTPUT, then text)
    #[arg(long, value_parser = parse_format)]
    format: Option<OutputFormat>,
}

fn parse_format(value: &str) -> Result<OutputFormat, String> {
    value.parse().map_err(|e: pgurl::UrlError| e.to_string())
}

fn main() -> Result<()> {
    // Initialize tracing; stdout carries the result, so logs go to stderr
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = AppConfig::from_env(Overrides {
        database_url: args.url,
        output: args.format,
        split: args.split,
    })
    .inspect_err(|e| error!("{}", e))?;

    debug!(split = config.split, output = %config.output, "Loaded configuration");

    match run(&config) {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            error!("Conversion failed: {}", e);
            Err(e)
        }
    }
}

fn run(config: &AppConfig) -> Result<String> {
    if config.split {
        let urls = pgurl::split_multi_host_url(&config.database_url)?;
        return Ok(if config.uses_json() {
            serde_json::to_string_pretty(&urls)?
        } else {
            urls.join("\n")
        });
    }

    let params = pgurl::conn_params_from_url(&config.database_url)?;
    Ok(if config.uses_json() {
        serde_json::to_string_pretty(&params)?
    } else {
        params.to_string()
    })
}
