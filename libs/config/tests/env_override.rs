//! Environment variable overrides
//!
//! Kept in its own test binary: the variables are process-wide and would
//! leak into the file-based loader tests.

use std::fs;
use swapkit_config::EngineConfig;
use tempfile::tempdir;

#[test]
fn swapkit_variables_override_file_values() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("swapkit.toml");
    fs::write(&config_path, "[search]\nmax_hops = 2\n\n[slippage]\ndefault_bips = 30\n").unwrap();

    std::env::set_var("SWAPKIT_SEARCH__MAX_HOPS", "1");
    std::env::set_var("SWAPKIT_SLIPPAGE__DEADLINE_MINUTES", "5");

    let config = EngineConfig::load(Some(&config_path), None).unwrap();

    std::env::remove_var("SWAPKIT_SEARCH__MAX_HOPS");
    std::env::remove_var("SWAPKIT_SLIPPAGE__DEADLINE_MINUTES");

    assert_eq!(config.search.max_hops, 1);
    assert_eq!(config.slippage.deadline_minutes, 5);
    assert_eq!(config.slippage.default_bips, 30);
    config.validate().unwrap();
}
