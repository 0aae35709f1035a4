// Configuration management module
// This file handles loading and parsing of configuration settings
// from an optional config file and environment variables
//
// Numan Thabit 2025 Nov

use anyhow::{ensure, Context, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub optimizer: OptimizerConfig,
    pub display: DisplayConfig,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Upper bound on offers per route when the caller does not pass one
    pub max_offers_per_route: usize,
    /// Alternatives returned next to the best route
    pub max_alternatives: usize,
    /// Ceiling on subsets enumerated per call, C(n,1) + ... + C(n,k)
    pub max_combinations: u64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            max_offers_per_route: 5,
            max_alternatives: 3,
            max_combinations: 250_000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// ISO fiat code printed in front of amounts, e.g. VES
    pub fiat: String,
    /// BCP 47 tag selecting number grouping, e.g. es-VE
    pub locale: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            fiat: "VES".to_string(),
            locale: "es-VE".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub bind: SocketAddr,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8080)),
        }
    }
}

impl AppConfig {
    /// Load from `file` (if given) and `ROUTER__*` environment variables,
    /// e.g. `ROUTER__OPTIMIZER__MAX_OFFERS_PER_ROUTE=4`. Environment wins.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        let cfg = builder
            .add_source(
                config::Environment::with_prefix("ROUTER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("build configuration sources")?;
        let app: AppConfig = cfg.try_deserialize().context("deserialize configuration")?;
        app.validate()?;
        Ok(app)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.optimizer.max_offers_per_route >= 1,
            "optimizer.max_offers_per_route must be at least 1"
        );
        ensure!(
            self.optimizer.max_combinations >= 1,
            "optimizer.max_combinations must be at least 1"
        );
        ensure!(!self.display.fiat.trim().is_empty(), "display.fiat must not be empty");
        Ok(())
    }
}
