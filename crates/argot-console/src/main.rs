//! Interactive console for argot commands
//!
//! Reads lines from stdin, dispatches them through the command registry and
//! prints the result. `--exec` runs a single line and exits.

use std::path::PathBuf;

use anyhow::{Context, Result};
use argot_console::{load_config, Console};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdout};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "argot")]
#[command(about = "Argot - typed command console", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Config file path
    #[arg(short, long, default_value = "argot.toml")]
    config: PathBuf,

    /// Run a single line and exit
    #[arg(short, long)]
    exec: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(&cli.config)?;
    let console = Console::new(config).context("failed to register console commands")?;
    info!(
        commands = console.manager().len(),
        config = %cli.config.display(),
        "console ready"
    );

    let mut stdout = tokio::io::stdout();

    if let Some(line) = cli.exec {
        let output = console.execute(&line).await;
        return print_lines(&mut stdout, &output).await;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        stdout.write_all(console.config().prompt.as_bytes()).await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let output = console.execute(&line).await;
        print_lines(&mut stdout, &output).await?;

        if console.exit_requested() {
            break;
        }
    }

    Ok(())
}

async fn print_lines(stdout: &mut Stdout, lines: &[String]) -> Result<()> {
    for line in lines {
        stdout.write_all(line.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
    }
    stdout.flush().await?;
    Ok(())
}
