use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::Result;

use crate::config;
use crate::filters::apply_filters;
use crate::io;
use crate::resolve::KnownTypeResolver;

pub struct FilterOptions {
    pub registry: PathBuf,
    pub config: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

/// Load, normalize, filter, write. Normalization happens before the
/// registry is touched, so a malformed pattern aborts with nothing mutated.
pub fn run(options: FilterOptions) -> Result<()> {
    let config = match &options.config {
        Some(path) => config::load_from(path)?,
        None => config::load()?,
    };
    let rules = config.filter.normalize()?;

    let mut registry = io::read_registry(&options.registry)?;

    let mut resolver = KnownTypeResolver::from_config(&config.types);
    resolver.learn_registry(&registry);

    apply_filters(&rules, &resolver, &mut registry);

    match &options.output {
        Some(path) => {
            let file = File::create(path)?;
            io::write_registry(BufWriter::new(file), &registry)?;
        }
        None => {
            io::write_registry(std::io::stdout().lock(), &registry)?;
        }
    }
    Ok(())
}
