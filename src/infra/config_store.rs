// ============================================================
// Layer 6 — Config Store
// ============================================================
// Loads and saves ProcessorConfig as pretty-printed JSON.
//
// A run is described by a file like:
//
//   {
//     "seqsize": 150,
//     "path_to_training_data": "data/train.txt",
//     "path_to_validation_data": null,
//     "path_to_test_data": "data/test.txt",
//     "plasmid_path": "data/plasmid.json",
//     "fold": 0,
//     ...
//   }
//
// Missing keys take their defaults (#[serde(default)] on the struct).
//
// Reference: Rust Book §9 (Error Handling)

use std::{fs, path::Path};

use anyhow::{Context, Result};

use crate::domain::config::ProcessorConfig;

/// Read a processor config from JSON.
pub fn load_config(path: &Path) -> Result<ProcessorConfig> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Cannot read config from '{}'", path.display()))?;

    let cfg = serde_json::from_str(&json)
        .with_context(|| format!("Invalid config in '{}'", path.display()))?;

    tracing::debug!("Loaded processor config from '{}'", path.display());
    Ok(cfg)
}

/// Write a processor config as JSON, creating parent directories.
pub fn save_config(cfg: &ProcessorConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Cannot create '{}'", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(cfg)?;

    fs::write(path, json)
        .with_context(|| format!("Cannot write config to '{}'", path.display()))?;

    tracing::debug!("Saved processor config to '{}'", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runs").join("fold3.json");

        let cfg = ProcessorConfig {
            fold: Some(3),
            seed: 1,
            ..ProcessorConfig::default()
        };
        save_config(&cfg, &path).unwrap();

        assert_eq!(load_config(&path).unwrap(), cfg);
    }

    #[test]
    fn test_invalid_json_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid config"));
    }
}
