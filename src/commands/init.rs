use anyhow::Result;
use std::path::PathBuf;

use crate::config::CONFIG_FILE_NAME;
use crate::io;

pub fn init_config(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    let default_config = r#"# bindfilter configuration

[filter]
# Remove methods and attributes whose types cannot be resolved
skipauto = true

# Types to remove everywhere. A bare name matches at any depth; a nested
# form matches one exact signature shape.
# skiptypes = ["uint32", [["vector", "float64", "const"], "&"]]

# Per-class method name prefixes to remove
# [filter.skipmethods]
# Computer = ["blowUp", "sleep", "crash"]

# Per-class attribute names to remove
# [filter.skipattrs]
# Computer = ["firmware_blob"]

# Per-class allow-lists: keep only these methods
# [filter.includemethods]
# Computer = ["turnOn", "checkEmail"]

[types]
# Extra scalar names and template heads the canonicalizer should accept
known = []
templates = []

# [types.aliases]
# float = "float64"
"#;

    io::write_file(&config_path, default_config)?;
    println!("Created {} configuration file", CONFIG_FILE_NAME);

    Ok(())
}
