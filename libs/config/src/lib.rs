//! # Swapkit Centralized Configuration
//!
//! This crate provides the constants and runtime configuration shared by
//! the quoting engine and the applications that embed it.
//!
//! ## Features
//!
//! - **Chain Constants**: factory, init-code hash, router, fee, WETH per chain
//! - **Thresholds**: price-impact warning bands, slippage and search defaults
//! - **Engine Configuration**: TOML + environment overlay + `SWAPKIT_` variables
//!
//! ## Usage
//!
//! ```rust
//! use swapkit_config::{chains, thresholds, EngineConfig};
//! use swapkit_types::ChainId;
//!
//! let weth = chains::wrapped_native(ChainId::MAINNET).unwrap();
//! assert_eq!(weth.address().to_checksum(), chains::weth::MAINNET);
//! assert_eq!(thresholds::slippage::DEFAULT_BIPS, 50);
//!
//! let config = EngineConfig::default();
//! config.validate().unwrap();
//! ```

pub mod chains;
pub mod engine_config;
pub mod thresholds;

// Re-export commonly used types
pub use engine_config::{
    load_config, ChainSettings, EngineConfig, ExchangeSettings, SearchSettings, SlippageSettings,
};
