//! Simulation settings, loaded from a YAML file.

use std::path::Path;

use anyhow::{Context, Result};
use sbt_core::TreeConfig;
use sbt_tools::DumpOptions;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub tree: TreeConfig,
    pub dump: DumpOptions,
    pub run: RunConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Seconds handed to every tick
    pub dt: f64,
    pub ticks: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            dt: 0.25,
            ticks: 16,
        }
    }
}

impl SimConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Load `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn parse(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = SimConfig::parse("run:\n  ticks: 4\ntree:\n  seed: 9\n").unwrap();
        assert_eq!(config.run.ticks, 4);
        assert_eq!(config.run.dt, 0.25);
        assert_eq!(config.tree.seed, Some(9));
        assert_eq!(config.dump, DumpOptions::default());
    }

    #[test]
    fn default_config_survives_yaml() {
        let config = SimConfig {
            tree: TreeConfig::seeded(3),
            ..SimConfig::default()
        };
        let yaml = config.to_yaml().unwrap();
        assert_eq!(SimConfig::parse(&yaml).unwrap(), config);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = SimConfig::load(Path::new("/nonexistent/sbt.yaml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/sbt.yaml"));
    }
}
