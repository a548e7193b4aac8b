use anyhow::Result;
use clap::Parser;
use commands::{Command, Commands};
use osdk_utils::Logger;

mod commands;

#[derive(Parser)]
#[command(name = "osdk", version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut logger = Logger::new();

    if let Err(e) = cli.command.execute(&mut logger) {
        logger.critical_error(&format!("{:?}", e));
        std::process::exit(1);
    }
    Ok(())
}
