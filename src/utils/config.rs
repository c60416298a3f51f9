use std::env;
use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use crate::cli::args::Args;

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub environment: String,
    pub catalog_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`] but reads variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Config {
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "warn".to_string()),
            environment: lookup("APP_ENV").unwrap_or_else(|| "development".to_string()),
            catalog_path: lookup("CATALOG_PATH").map(PathBuf::from),
        };

        config.validate()?;
        tracing::debug!("Config: successfully loaded for {} environment", config.environment);
        Ok(config)
    }

    /// Command-line flags win over the environment.
    pub fn apply_args(&mut self, args: &Args) {
        if args.verbose {
            self.log_level = "debug".to_string();
        }
        if let Some(path) = &args.catalog {
            self.catalog_path = Some(path.clone());
        }
    }

    pub fn env_filter(&self) -> anyhow::Result<EnvFilter> {
        EnvFilter::try_new(&self.log_level)
            .map_err(|e| anyhow::anyhow!("LOG_LEVEL '{}' is not a valid filter: {}", self.log_level, e))
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        self.env_filter()?;

        if let Some(path) = &self.catalog_path {
            if path.as_os_str().is_empty() {
                return Err(anyhow::anyhow!("CATALOG_PATH is set but empty"));
            }
        }

        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
