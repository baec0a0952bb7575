//! `kinetic init`

use crate::config::{KineticConfig, CONFIG_FILE};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Write a default kinetic.toml into `dir`, returning the file written
pub fn init_config(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE);
    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite it.",
            config_path.display()
        );
    }

    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let content = format!(
        "# Kinetic demo configuration\n# Logging can be overridden with RUST_LOG.\n\n{}",
        KineticConfig::default().to_toml()?
    );
    fs::write(&config_path, content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    Ok(config_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("kinetic-init-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn written_config_loads_back() {
        let dir = scratch_dir("load");
        let path = init_config(&dir, false).unwrap();
        assert_eq!(path, dir.join(CONFIG_FILE));

        let config = KineticConfig::load_from_dir(&dir).unwrap();
        assert_eq!(config, KineticConfig::default());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn existing_config_needs_force() {
        let dir = scratch_dir("force");
        init_config(&dir, false).unwrap();
        assert!(init_config(&dir, false).is_err());
        assert!(init_config(&dir, true).is_ok());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let dir = scratch_dir("missing");
        assert!(KineticConfig::load_or_default(Some(dir.as_path())).is_err());
    }
}
