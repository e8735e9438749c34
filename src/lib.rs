//! 0/1 knapsack solvers with a shared instance model and result shape.
//!
//! Three independent strategies, directly comparable on the same input:
//!
//! - **Dynamic programming** ([`dp`]): exact; tabulates the best value for
//!   every (item prefix, capacity) pair and backtracks to an optimal set.
//! - **Best-first search** ([`search`]): heuristic graph search over
//!   canonical subsets, ordered by the fractional-knapsack upper bound, with
//!   duplicate-state elimination.
//! - **Binary PSO** ([`bpso`]): a particle swarm over bit-vectors with
//!   sigmoid position sampling and penalty-based fitness.
//!
//! Every solver borrows an immutable [`instance::Instance`] and returns a
//! [`result::SolutionResult`]; [`compare`] runs several and lines them up.
//! Stochastic code takes its seed or generator explicitly (see [`random`]).
//!
//! # Example
//!
//! ```
//! use u_knapsack::dp::{DpConfig, DpRunner};
//! use u_knapsack::instance::Instance;
//!
//! let instance = Instance::from_triples(
//!     [("A", 5.0, 10.0), ("B", 4.0, 6.0), ("C", 3.0, 5.0), ("D", 2.0, 4.0), ("E", 6.0, 13.0)],
//!     10.0,
//! )
//! .unwrap();
//! let result = DpRunner::run(&instance, &DpConfig::default()).unwrap();
//! assert_eq!(result.total_value, 19.0);
//! ```

pub mod bpso;
pub mod compare;
pub mod dp;
pub mod error;
pub mod instance;
pub mod random;
pub mod result;
pub mod search;

pub use error::KnapsackError;
