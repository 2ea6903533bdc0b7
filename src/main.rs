use std::io::Write;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing_subscriber::EnvFilter;

use zombie_hunter::cli::Cli;
use zombie_hunter::{DefaultCredentialChain, HunterError};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.scan.into_config();
    let credential = DefaultCredentialChain::from_env()?;

    let mut stdout = std::io::stdout();
    match zombie_hunter::run(&config, &credential, &mut stdout).await {
        Ok(report) => {
            tracing::info!(
                idle = report.len(),
                total = report.total_monthly_cost(),
                "scan complete"
            );
            Ok(())
        }
        Err(err) => {
            write_failure(err, &mut std::io::stderr())?;
            std::process::exit(1);
        }
    }
}

/// Error report first, then the troubleshooting hint for its kind.
fn write_failure<W: Write>(err: HunterError, out: &mut W) -> std::io::Result<()> {
    let hint = err.hint();
    writeln!(out, "Error: {:?}", color_eyre::Report::new(err))?;
    write!(out, "{hint}")
}
