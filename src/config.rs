use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

use crate::error::StartupError;

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub database_url: String,
    pub templates_dir: String,
    pub static_dir: String,
    pub template_dev_mode: bool,
    pub seed_demo_data: bool,
}

impl Config {
    pub fn load() -> Result<Self, StartupError> {
        Ok(Self {
            host: try_load("HOST", "127.0.0.1:3000")?,
            database_url: try_load("DATABASE_URL", "sqlite://laranotes.db?mode=rwc")?,
            templates_dir: try_load("TEMPLATES_DIR", "templates/")?,
            static_dir: try_load("STATIC_DIR", "./static")?,
            template_dev_mode: try_load("TEMPLATE_DEV_MODE", "false")?,
            seed_demo_data: try_load("SEED_DEMO_DATA", "true")?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1:3000".to_string(),
            database_url: "sqlite::memory:".to_string(),
            templates_dir: "templates/".to_string(),
            static_dir: "./static".to_string(),
            template_dev_mode: false,
            seed_demo_data: false,
        }
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, StartupError>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    parse_value(key, &raw)
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> Result<T, StartupError>
where
    T::Err: Display,
{
    raw.trim().parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        StartupError::Config {
            key: key.to_string(),
            reason: e.to_string(),
        }
    })
}
