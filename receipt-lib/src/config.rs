use anyhow::Context;
use serde::Deserialize;
use std::path::PathBuf;
use std::{env, fs};

fn default_pool_size() -> u32 {
    10
}

#[derive(Deserialize)]
pub struct Config {
    pub database_url: String,
    #[serde(default = "default_pool_size")]
    pub max_pool_size: u32,
    pub signups_enabled: bool,
}

impl Config {
    pub fn from_file(path: PathBuf) -> Result<Config, anyhow::Error> {
        let config = fs::read_to_string(path).context("Unable to read config file")?;
        let config: Config =
            toml::from_str(config.as_str()).with_context(|| "Unable to parse config")?;
        Ok(config)
    }

    pub fn from_env() -> Result<Config, anyhow::Error> {
        let database_url = read_env("DATABASE_URL")?;
        let max_pool_size = match env::var("MAX_POOL_SIZE") {
            Ok(value) => value.parse().context("Unable to parse MAX_POOL_SIZE value")?,
            Err(_) => default_pool_size(),
        };
        let signups_enabled = read_env("SIGNUPS_ENABLED")?;
        let signups_enabled = signups_enabled
            .parse()
            .context("Unable to parse SIGNUPS_ENABLED value")?;

        let config = Config {
            database_url,
            max_pool_size,
            signups_enabled,
        };
        Ok(config)
    }
}

fn read_env(key: &str) -> Result<String, anyhow::Error> {
    env::var(key).with_context(|| format!("Unable to read env var: {}", key))
}
