use splitledger_domain::{CurrencyContext, CurrencyContextError, RoundingMode};
use std::env;
use tracing_subscriber::EnvFilter;

pub const SCALE_VAR: &str = "SPLITLEDGER_SCALE";
pub const ROUNDING_VAR: &str = "SPLITLEDGER_ROUNDING";
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("SPLITLEDGER_SCALE must be a non-negative integer, got '{0}'")]
    InvalidScale(String),
    #[error("SPLITLEDGER_ROUNDING: {0}")]
    InvalidRounding(String),
    #[error(transparent)]
    Currency(#[from] CurrencyContextError),
}

/// Display settings read from the environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppConfig {
    pub currency: CurrencyContext,
}

impl AppConfig {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let scale = match lookup(SCALE_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidScale(raw))?,
            None => CurrencyContext::default().scale(),
        };
        let rounding_mode = match lookup(ROUNDING_VAR) {
            Some(raw) => raw
                .parse::<RoundingMode>()
                .map_err(ConfigError::InvalidRounding)?,
            None => RoundingMode::default(),
        };

        Ok(Self {
            currency: CurrencyContext::new(scale, rounding_mode)?,
        })
    }

    /// Command-line flags take precedence over the environment.
    pub fn with_overrides(
        self,
        scale: Option<u32>,
        rounding_mode: Option<RoundingMode>,
    ) -> Result<Self, ConfigError> {
        let currency = CurrencyContext::new(
            scale.unwrap_or(self.currency.scale()),
            rounding_mode.unwrap_or(self.currency.rounding_mode()),
        )?;
        Ok(Self { currency })
    }
}

/// Logs go to stderr so stdout stays clean for reports and JSON.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
