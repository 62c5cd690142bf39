//! Marquee CLI - Command-line interface
//!
//! Launches the interactive movie search TUI or runs one-shot catalog
//! queries from the command line.

mod commands;

use clap::Parser;
use marquee_core::tracing_setup::{self, CliLogLevel};

#[derive(Parser)]
#[command(name = "marquee")]
#[command(about = "A movie search terminal UI")]
struct Cli {
    /// Console log level for one-shot commands
    #[arg(long, default_value_t = CliLogLevel::Info)]
    log_level: CliLogLevel,

    /// Use the canned demo catalog instead of the OMDb API
    #[arg(long)]
    demo: bool,

    /// OMDb API key (overrides configuration and environment)
    #[arg(long)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Option<commands::Commands>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or_default();

    // The TUI owns the terminal, so console logging is file-only there.
    let console_level = if command.takes_terminal() {
        None
    } else {
        Some(cli.log_level.as_tracing_level())
    };
    tracing_setup::init_tracing(console_level, None)?;

    if let Err(error) = commands::handle_command(command, cli.demo, cli.api_key).await {
        tracing::error!("command failed: {error}");
        eprintln!("{}", error.user_message());
        std::process::exit(1);
    }

    Ok(())
}
