//! Price-impact warning levels

use swapkit_config::thresholds::price_impact::BANDS_BIPS;
use swapkit_types::Percent;

/// Number of warning thresholds (1%, 3%, 5%, 15%) that `price_impact`
/// reaches, from 0 (no warning) to 4 (blocked outside expert mode)
///
/// Each threshold counts as reached when the impact is equal to it.
pub fn warning_severity(price_impact: &Percent) -> u8 {
    BANDS_BIPS
        .iter()
        .filter(|&&bips| !price_impact.less_than(&Percent::from_bips(bips)))
        .count() as u8
}
