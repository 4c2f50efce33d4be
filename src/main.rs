use anyhow::Result;
use clap::Parser;

use bindfilter::cli::{Cli, Commands};
use bindfilter::commands::filter::FilterOptions;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Filter {
            registry,
            config,
            output,
        } => bindfilter::commands::filter::run(FilterOptions {
            registry,
            config,
            output,
        }),
        Commands::Init { force } => bindfilter::commands::init::init_config(force),
    }
}
