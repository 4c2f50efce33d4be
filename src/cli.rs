use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bindfilter")]
#[command(about = "Type-pattern filtering for binding-generator description registries", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Filter a description registry according to the configured rules
    Filter {
        /// Path to the registry JSON produced by the description builder
        registry: PathBuf,

        /// Configuration file (defaults to discovering .bindfilter.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Create a starter configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}
