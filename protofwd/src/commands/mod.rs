mod check;
mod completions;
mod generate;

use std::path::PathBuf;

use check::CheckCommand;
use clap::{Args, Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use generate::GenerateCommand;
use protofwd_descriptor::DescriptorSet;

/// Extension trait for exiting on descriptor errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for protofwd_descriptor::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

/// Descriptor set input shared by the commands that load one.
#[derive(Args)]
pub struct DescriptorArgs {
    /// Path to the descriptor set (defaults to ./descriptors.toml)
    #[arg(short, long, default_value = "descriptors.toml")]
    pub descriptors: PathBuf,
}

impl DescriptorArgs {
    pub fn load(&self) -> DescriptorSet {
        DescriptorSet::from_file(&self.descriptors).unwrap_or_exit()
    }
}

#[derive(Parser)]
#[command(name = "protofwd")]
#[command(version)]
#[command(about = "Generate Go files with public-import forwarding from a descriptor set")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Go files from the descriptor set
    Generate(GenerateCommand),

    /// Report missing dependencies and import errors without writing files
    Check(CheckCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
