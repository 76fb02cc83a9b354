use anyhow::{bail, Result};
use std::path::Path;

use crate::config::Config;

/// Write the default configuration under `root`.
pub fn run(root: &Path, force: bool) -> Result<()> {
    if Config::is_initialized(root) && !force {
        bail!(
            "Config already exists at {}. Use --force to overwrite.",
            Config::config_path(root).display()
        );
    }

    Config::default().save(root)?;
    println!("Wrote {}", Config::config_path(root).display());
    println!("Add API keys under [auth] to require authentication.");

    Ok(())
}
