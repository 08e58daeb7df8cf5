use std::{
    fs,
    path::{Path, PathBuf},
};

use color_eyre::{
    Result,
    eyre::{WrapErr as _, eyre},
};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::image_model::Model;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Checked in order, the first non-empty one wins.
pub const CREDENTIAL_VARS: [&str; 2] = ["API_KEY", "GEMINI_API_KEY"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: Model,
    pub api_base: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: Model::default(),
            api_base: DEFAULT_API_BASE.into(),
        }
    }
}

impl Config {
    /// Config file first, then the environment on top of it.
    pub fn load() -> Result<Self> {
        let cfg = load_config_from(&config_path()?)?;
        Ok(cfg.with_credential(credential_from_env()))
    }

    /// Replaces the credential if `key` holds one, keeps the current one otherwise.
    pub fn with_credential(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
        self
    }

    pub fn credential(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(dirs::config_local_dir()
        .ok_or(eyre!("Couldn't get config dir"))?
        .join("luminagen.ron"))
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!("No config file at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    info!("Loading config from {}", path.display());
    let src = fs::read_to_string(path)?;
    ron::from_str(&src).wrap_err_with(|| format!("Invalid config file {}", path.display()))
}

pub fn credential_from_env() -> Option<String> {
    credential_from(|var| std::env::var(var).ok())
}

fn credential_from(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    CREDENTIAL_VARS
        .iter()
        .filter_map(|&var| lookup(var))
        .find(|val| !val.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use tempfile::NamedTempFile;

    use super::*;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn missing_file_gives_defaults() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let cfg = load_config_from(&dir.path().join("nope.ron"))?;
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.credential(), None);
        Ok(())
    }

    #[test]
    fn reads_ron_file() -> Result<()> {
        let file = NamedTempFile::new()?;
        fs::write(
            file.path(),
            r#"(api_key: Some("file-key"), model: Imagen4Ultra)"#,
        )?;

        let cfg = load_config_from(file.path())?;
        assert_eq!(cfg.credential(), Some("file-key"));
        assert_eq!(cfg.model, Model::Imagen4Ultra);
        assert_eq!(cfg.api_base, DEFAULT_API_BASE);
        Ok(())
    }

    #[test]
    fn broken_file_is_an_error() -> Result<()> {
        let file = NamedTempFile::new()?;
        fs::write(file.path(), "(api_key: ")?;

        let err = load_config_from(file.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid config file"));
        Ok(())
    }

    #[test]
    fn first_non_empty_var_wins() {
        assert_eq!(
            credential_from(env_of(&[("API_KEY", "a"), ("GEMINI_API_KEY", "b")])),
            Some("a".into())
        );
        assert_eq!(
            credential_from(env_of(&[("API_KEY", "  "), ("GEMINI_API_KEY", "b")])),
            Some("b".into())
        );
        assert_eq!(credential_from(env_of(&[])), None);
    }

    #[test]
    fn env_credential_overrides_file() {
        let cfg = Config {
            api_key: Some("file-key".into()),
            ..Default::default()
        };
        assert_eq!(
            cfg.clone().with_credential(Some("env-key".into())).credential(),
            Some("env-key")
        );
        assert_eq!(cfg.clone().with_credential(None).credential(), Some("file-key"));
        assert_eq!(cfg.with_credential(Some("".into())).credential(), Some("file-key"));
    }

    #[test]
    fn blank_credential_counts_as_missing() {
        let cfg = Config {
            api_key: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(cfg.credential(), None);
    }
}
