use anyhow::Result;
use clap::{Args, Subcommand};
use osdk_utils::Logger;

mod build;
mod clean;

pub use build::BuildCommand;
pub use clean::CleanCommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Compile the SDK sources and archive them into one static library
    Build(BuildCommand),
    /// Remove generated objects, the build cache, and optionally the archive
    Clean(CleanCommand),
}

pub trait Command {
    fn execute(&self, logger: &mut Logger) -> Result<()>;
}

impl Command for Commands {
    fn execute(&self, logger: &mut Logger) -> Result<()> {
        match self {
            Self::Build(cmd) => cmd.execute(logger),
            Self::Clean(cmd) => cmd.execute(logger),
        }
    }
}
