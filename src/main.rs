use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use brandscan::{BrandMatcher, BrandscanConfig, check_brand_with, parse_payload};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Check whether a brand is mentioned in a language-model response.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Brand name to look for
    #[arg(short, long)]
    brand: String,

    /// Path to a YAML pipeline configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Include per-item hit details in the report
    #[arg(long)]
    explain: bool,

    /// Response payload (JSON or plain text); reads stdin when omitted
    input: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => BrandscanConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => BrandscanConfig::default(),
    };
    if args.explain {
        config.matcher.explain = true;
    }

    let body = match &args.input {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading payload from stdin")?;
            buf
        }
    };

    let matcher = BrandMatcher::new(&args.brand, &config.matcher)?;
    let report = check_brand_with(&parse_payload(&body), &matcher);

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
