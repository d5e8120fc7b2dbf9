use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use xray_share_link::{Configuration, convert, share_text};

/// Convert the outbounds of an xray configuration into share links
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// xray JSON configuration
    config: PathBuf,

    /// File to write the links to; printed to stdout when omitted
    output: Option<PathBuf>,

    /// Log level, overridden by RUST_LOG
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Loading config from: {}", args.config.display());
    let config = Configuration::load(&args.config)
        .with_context(|| format!("failed to load {}", args.config.display()))?;

    match args.output {
        Some(ref output) => {
            let outcome = convert(&config, output);
            if !outcome.is_empty() {
                bail!(outcome);
            }
            info!("Links written to: {}", output.display());
        }
        None => println!("{}", share_text(&config)?),
    }

    Ok(())
}
