pub mod indicators;
pub mod moving_average;

#[cfg(test)]
mod indicators_tests;

pub use indicators::*;
pub use moving_average::*;
