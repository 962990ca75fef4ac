//! cloudwise - Detect anomalous days in cloud billing data

use clap::Parser;
use cloudwise::{cli::Cli, commands, error::Result, source::load_records};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // --verbose opts into info logging; RUST_LOG still wins when set
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("cloudwise=info"))
    } else {
        tracing_subscriber::EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if cli.json || !is_terminal::is_terminal(std::io::stdout()) {
        colored::control::set_override(false);
    }

    let synthetic = cli.synthetic_config()?;
    let records = load_records(cli.source, cli.file.as_deref(), synthetic)?;
    info!("Loaded {} billing records", records.len());

    let output = commands::run(&cli, &records)?;
    println!("{output}");

    Ok(())
}
