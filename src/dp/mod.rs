//! Exact dynamic-programming solver.
//!
//! Tabulates `dp[i][w]`, the best value reachable with the first `i` items
//! under a budget of `w`, then backtracks from `(n, capacity)` to recover one
//! optimal selection. Time and space are `O(n * capacity)`.
//!
//! Weights and capacity must be integral; fractional input is rejected with
//! [`KnapsackError::NonIntegralInput`](crate::error::KnapsackError::NonIntegralInput)
//! rather than rounded.
//!
//! # References
//!
//! - Bellman (1957), *Dynamic Programming*
//! - Kellerer, Pferschy & Pisinger (2004), *Knapsack Problems*, ch. 2

mod config;
mod runner;

pub use config::DpConfig;
pub use runner::DpRunner;
