/// Demo configuration
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Optional config file read from the working directory.
const CONFIG_FILE: &str = "ballchasing.toml";

/// Prefix of the environment variables that override the file.
const ENV_PREFIX: &str = "BALLCHASING";

#[derive(Debug, Clone, Deserialize)]
pub struct DemoConfig {
    /// API key from `BALLCHASING_API_KEY`
    #[serde(default)]
    pub api_key: String,

    /// Replay or group id from `BALLCHASING_GROUP_ID`
    #[serde(default)]
    pub group_id: Option<String>,
}

impl DemoConfig {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self> {
        let path = PathBuf::from(CONFIG_FILE);
        let file = path.exists().then_some(path.as_path());
        Self::build(file, config::Environment::with_prefix(ENV_PREFIX))
    }

    fn build(file: Option<&Path>, env: config::Environment) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = file {
            settings = settings.add_source(config::File::from(path));
        }

        // Environment wins over the file
        settings = settings.add_source(env);

        let mut config: Self = settings
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        if config
            .group_id
            .as_deref()
            .is_some_and(|id| id.trim().is_empty())
        {
            config.group_id = None;
        }

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            bail!("{ENV_PREFIX}_API_KEY environment variable is required");
        }
        Ok(())
    }
}
