//! Engine Configuration Module
//!
//! Provides configuration loading for the quoting engine. Supports loading
//! from a TOML file with environment-specific overrides and `SWAPKIT_`
//! environment variables. Every section falls back to the compiled-in
//! constants, so a file only needs the keys it changes.

use crate::chains::{self, FEE_DENOMINATOR};
use crate::thresholds::{routing, slippage};
use anyhow::{bail, Context, Result};
use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use swapkit_types::{Address, ChainId, Hash32};
use tracing::{debug, info, warn};

/// Default base configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config/swapkit.toml";

/// Prefix for environment variable overrides, e.g. `SWAPKIT_SEARCH__MAX_HOPS`
pub const ENV_PREFIX: &str = "SWAPKIT";

/// Main engine configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Factory deployment and fee
    pub exchange: ExchangeSettings,

    /// Best-trade search bounds
    pub search: SearchSettings,

    /// Slippage and deadline defaults
    pub slippage: SlippageSettings,

    /// Chains the engine will quote on
    pub chains: ChainSettings,
}

/// Exchange deployment settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ExchangeSettings {
    pub factory_address: String,
    pub init_code_hash: String,
    pub router_address: String,
    pub fee_bips: u32,
}

/// Best-trade search settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct SearchSettings {
    pub max_hops: usize,
    pub max_num_results: usize,
    pub max_iterations: usize,
}

/// Slippage tolerance and transaction deadline settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct SlippageSettings {
    pub default_bips: u32,
    pub deadline_minutes: u64,
    pub better_trade_threshold_bips: u32,
}

/// Chain selection
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ChainSettings {
    pub default_chain_id: u64,
    pub enabled: Vec<u64>,
}

impl Default for ExchangeSettings {
    fn default() -> Self {
        Self {
            factory_address: chains::FACTORY_ADDRESS.to_string(),
            init_code_hash: chains::INIT_CODE_HASH.to_string(),
            router_address: chains::ROUTER_ADDRESS.to_string(),
            fee_bips: chains::FEE_BIPS,
        }
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            max_hops: routing::MAX_HOPS,
            max_num_results: routing::MAX_NUM_RESULTS,
            max_iterations: routing::MAX_ITERATIONS,
        }
    }
}

impl Default for SlippageSettings {
    fn default() -> Self {
        Self {
            default_bips: slippage::DEFAULT_BIPS,
            deadline_minutes: slippage::DEFAULT_DEADLINE_MINUTES,
            better_trade_threshold_bips: routing::BETTER_TRADE_LESS_HOPS_THRESHOLD_BIPS,
        }
    }
}

impl Default for ChainSettings {
    fn default() -> Self {
        Self {
            default_chain_id: ChainId::MAINNET.get(),
            enabled: chains::SUPPORTED_CHAINS.iter().map(|c| c.get()).collect(),
        }
    }
}

impl ExchangeSettings {
    pub fn factory(&self) -> Result<Address> {
        Address::parse(&self.factory_address).context("Invalid exchange.factory_address")
    }

    pub fn init_code_hash(&self) -> Result<Hash32> {
        Hash32::parse(&self.init_code_hash).context("Invalid exchange.init_code_hash")
    }

    pub fn router(&self) -> Result<Address> {
        Address::parse(&self.router_address).context("Invalid exchange.router_address")
    }
}

impl ChainSettings {
    pub fn default_chain(&self) -> ChainId {
        ChainId::new(self.default_chain_id)
    }

    pub fn is_enabled(&self, chain_id: ChainId) -> bool {
        self.enabled.contains(&chain_id.get())
    }
}

impl EngineConfig {
    /// Load configuration from files with environment overrides
    ///
    /// The environment overlay is read from `environments/<env>.toml` next
    /// to the base file.
    pub fn load(base_path: Option<&Path>, environment: Option<&str>) -> Result<Self> {
        let base = base_path.unwrap_or(Path::new(DEFAULT_CONFIG_PATH));

        let mut builder = Config::builder().add_source(File::from(base).required(true));

        // Add environment-specific overrides if specified
        if let Some(env) = environment {
            let env_file = environments_dir(base).join(format!("{env}.toml"));

            if env_file.exists() {
                info!("Loading environment config: {:?}", env_file);
                builder = builder.add_source(File::from(env_file));
            } else {
                warn!("Environment config not found: {:?}", env_file);
            }
        }

        // Override with environment variables (SWAPKIT_ prefix)
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Expand `$VAR` / `${VAR}` references in address and hash settings
    pub fn expand_env_vars(&mut self) -> Result<()> {
        let exchange = &mut self.exchange;
        for (name, value) in [
            ("factory_address", &mut exchange.factory_address),
            ("init_code_hash", &mut exchange.init_code_hash),
            ("router_address", &mut exchange.router_address),
        ] {
            let expanded = shellexpand::env(value.as_str())
                .with_context(|| format!("Failed to expand exchange.{name}"))?
                .into_owned();
            if expanded != *value {
                debug!(setting = name, "expanded environment reference");
                *value = expanded;
            }
        }
        Ok(())
    }

    /// Check cross-field constraints the types alone cannot express
    pub fn validate(&self) -> Result<()> {
        if self.exchange.fee_bips >= FEE_DENOMINATOR {
            bail!(
                "exchange.fee_bips must be below {FEE_DENOMINATOR}, got {}",
                self.exchange.fee_bips
            );
        }
        self.exchange.factory()?;
        self.exchange.init_code_hash()?;
        self.exchange.router()?;

        if self.search.max_hops == 0 {
            bail!("search.max_hops must be at least 1");
        }
        if self.search.max_num_results == 0 {
            bail!("search.max_num_results must be at least 1");
        }
        if self.search.max_iterations == 0 {
            bail!("search.max_iterations must be at least 1");
        }

        if self.slippage.default_bips > slippage::MAX_BIPS {
            bail!(
                "slippage.default_bips must not exceed {}, got {}",
                slippage::MAX_BIPS,
                self.slippage.default_bips
            );
        }
        if self.slippage.deadline_minutes == 0 {
            bail!("slippage.deadline_minutes must be at least 1");
        }

        if self.chains.enabled.is_empty() {
            bail!("chains.enabled must list at least one chain");
        }
        for &id in &self.chains.enabled {
            if !chains::is_supported(ChainId::new(id)) {
                bail!("chains.enabled contains unsupported chain {id}");
            }
        }
        if !self.chains.is_enabled(self.chains.default_chain()) {
            bail!(
                "chains.default_chain_id {} is not enabled",
                self.chains.default_chain_id
            );
        }

        Ok(())
    }

    /// Render as TOML, e.g. to write a starting configuration file
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}

fn environments_dir(base: &Path) -> PathBuf {
    base.parent()
        .map(|dir| dir.join("environments"))
        .unwrap_or_else(|| PathBuf::from("environments"))
}

/// Convenience function to load, expand and validate configuration
pub fn load_config(environment: Option<&str>) -> Result<EngineConfig> {
    let mut config = EngineConfig::load(None, environment)?;
    config.expand_env_vars()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        config.validate().unwrap();
        assert_eq!(config.exchange.fee_bips, 30);
        assert_eq!(config.search.max_hops, 3);
        assert_eq!(config.slippage.default_bips, 50);
        assert_eq!(config.chains.default_chain(), ChainId::MAINNET);
    }

    #[test]
    fn test_load_base_config() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("swapkit.toml");

        let config_content = r#"
[exchange]
fee_bips = 25

[search]
max_hops = 2
max_num_results = 5

[chains]
default_chain_id = 5
enabled = [1, 5]
"#;

        fs::write(&config_path, config_content).unwrap();

        let config = EngineConfig::load(Some(&config_path), None).unwrap();

        assert_eq!(config.exchange.fee_bips, 25);
        assert_eq!(config.exchange.factory_address, chains::FACTORY_ADDRESS);
        assert_eq!(config.search.max_hops, 2);
        assert_eq!(config.search.max_num_results, 5);
        assert_eq!(config.search.max_iterations, routing::MAX_ITERATIONS);
        assert_eq!(config.slippage, SlippageSettings::default());
        assert_eq!(config.chains.default_chain(), ChainId::GOERLI);
        config.validate().unwrap();
    }

    #[test]
    fn test_environment_override() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("swapkit.toml");
        fs::write(&config_path, "[search]\nmax_hops = 2\n").unwrap();

        let env_dir = dir.path().join("environments");
        fs::create_dir(&env_dir).unwrap();
        fs::write(env_dir.join("testnet.toml"), "[search]\nmax_hops = 1\n").unwrap();

        let base_only = EngineConfig::load(Some(&config_path), None).unwrap();
        assert_eq!(base_only.search.max_hops, 2);

        let overlaid = EngineConfig::load(Some(&config_path), Some("testnet")).unwrap();
        assert_eq!(overlaid.search.max_hops, 1);

        let missing = EngineConfig::load(Some(&config_path), Some("nowhere")).unwrap();
        assert_eq!(missing.search.max_hops, 2);
    }

    #[test]
    fn test_missing_base_file_is_an_error() {
        let dir = tempdir().unwrap();
        let err = EngineConfig::load(Some(&dir.path().join("absent.toml")), None).unwrap_err();
        assert!(err.to_string().contains("Failed to build configuration"));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = EngineConfig::default();
        config.exchange.fee_bips = FEE_DENOMINATOR;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.search.max_hops = 0;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.slippage.default_bips = 10_001;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.exchange.factory_address = "0x1234".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("factory_address"));

        let mut config = EngineConfig::default();
        config.exchange.init_code_hash = "0xnothex".to_string();
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.chains.enabled = vec![1, 137];
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.chains.enabled = vec![5];
        assert!(config.validate().is_err(), "default chain 1 is not enabled");
    }

    #[test]
    fn test_toml_round_trip_through_loader() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("swapkit.toml");

        let mut original = EngineConfig::default();
        original.search.max_num_results = 7;
        fs::write(&config_path, original.to_toml_string().unwrap()).unwrap();

        let loaded = EngineConfig::load(Some(&config_path), None).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_expand_env_vars_leaves_literals() {
        let mut config = EngineConfig::default();
        config.expand_env_vars().unwrap();
        assert_eq!(config, EngineConfig::default());
    }
}
