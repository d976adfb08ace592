//! Quoting thresholds and search defaults
//!
//! Values shared by the engine and the front-end so that warning levels and
//! default tolerances agree everywhere. All percentages are in basis points.

/// Price-impact warning bands
///
/// A trade's severity is the number of thresholds its price impact reaches,
/// each bound inclusive.
pub mod price_impact {
    /// 1%: worth showing
    pub const LOW_BIPS: u32 = 100;

    /// 3%: warn
    pub const MEDIUM_BIPS: u32 = 300;

    /// 5%: require confirmation
    pub const HIGH_BIPS: u32 = 500;

    /// 15%: only allowed in expert mode
    pub const BLOCKED_BIPS: u32 = 1_500;

    /// All bands in ascending order
    pub const BANDS_BIPS: [u32; 4] = [LOW_BIPS, MEDIUM_BIPS, HIGH_BIPS, BLOCKED_BIPS];
}

/// Slippage and deadline defaults for swap submission
pub mod slippage {
    /// 0.50%
    pub const DEFAULT_BIPS: u32 = 50;

    /// Tolerance may not exceed 100%
    pub const MAX_BIPS: u32 = 10_000;

    pub const DEFAULT_DEADLINE_MINUTES: u64 = 20;
}

/// Best-trade search bounds
pub mod routing {
    /// A trade with more hops must beat one with fewer by this margin
    pub const BETTER_TRADE_LESS_HOPS_THRESHOLD_BIPS: u32 = 50;

    pub const MAX_HOPS: usize = 3;

    pub const MAX_NUM_RESULTS: usize = 3;

    /// Upper bound on pairs examined in one search
    pub const MAX_ITERATIONS: usize = 100_000;
}
