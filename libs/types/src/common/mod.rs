//! Building blocks shared by every currency-aware type
//!
//! - [`fraction`]: exact rationals and decimal formatting
//! - [`percent`]: ratios displayed as percentages
//! - [`math`]: `uint256` bounds and the pair contract's integer square root
//! - [`identifiers`]: addresses, hashes and chain ids
//! - [`errors`]: error enums for all of the above

pub mod errors;
pub mod fraction;
pub mod identifiers;
pub mod math;
pub mod percent;
