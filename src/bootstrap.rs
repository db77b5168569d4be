use crate::{models::Parameters, service};
use anyhow::Context;
use std::path::PathBuf;
use std::time::Duration;

pub const CONFIG_VAR: &str = "SIGNAL_TIMING_CONFIG";
pub const SEED_VAR: &str = "SIGNAL_TIMING_SEED";
pub const BUDGET_VAR: &str = "SIGNAL_TIMING_BUDGET_MS";
pub const TIMEOUT_VAR: &str = "SIGNAL_TIMING_TIMEOUT_MS";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Default)]
pub struct Configuration {
    /// JSON file with partial [`Parameters`] overrides.
    pub parameters_path: Option<PathBuf>,
    pub seed: Option<u64>,
    pub time_budget: Option<Duration>,
    pub timeout: Option<Duration>,
}

impl Configuration {
    /// Reads the configuration from the process environment. Unset variables
    /// keep their defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let millis = |name: &str| -> anyhow::Result<Option<Duration>> {
            lookup(name)
                .map(|value| {
                    value
                        .parse::<u64>()
                        .map(Duration::from_millis)
                        .with_context(|| format!("{name} must be a number of milliseconds, got {value}"))
                })
                .transpose()
        };

        let seed = lookup(SEED_VAR)
            .map(|value| {
                value
                    .parse::<u64>()
                    .with_context(|| format!("{SEED_VAR} must be an unsigned integer, got {value}"))
            })
            .transpose()?;

        Ok(Self {
            parameters_path: lookup(CONFIG_VAR).map(PathBuf::from),
            seed,
            time_budget: millis(BUDGET_VAR)?,
            timeout: millis(TIMEOUT_VAR)?,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout.unwrap_or(DEFAULT_TIMEOUT)
    }

    /// Defaults overridden by the fields present in the parameter file.
    pub fn parameters(&self) -> anyhow::Result<Parameters> {
        let Some(path) = &self.parameters_path else {
            return Ok(Parameters::default());
        };

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read parameters from {}", path.display()))?;
        let parameters = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse parameters in {}", path.display()))?;

        Ok(parameters)
    }
}

pub fn bootstrap_optimizer(config: &Configuration) -> anyhow::Result<service::ServiceBuilder> {
    let mut builder = service::Service::builder().with_parameters(config.parameters()?);
    if let Some(time_budget) = config.time_budget {
        builder = builder.with_time_budget(time_budget);
    }

    Ok(builder)
}
