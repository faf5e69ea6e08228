//! Core math modules.

pub mod stable;
pub mod beta;
pub mod bernoulli;
pub mod grid;
