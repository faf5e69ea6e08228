//! coin-bias math utilities.

pub mod math;

pub use math::stable::*;
pub use math::beta::*;
pub use math::bernoulli;
pub use math::grid::*;
