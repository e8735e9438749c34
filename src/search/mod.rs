//! Best-first search over item subsets.
//!
//! States are canonical selections (sorted index sets). From each state the
//! search may add any unselected item that still fits; a state with no such
//! item is terminal. Of the children that keep their parent's bound, only the
//! first in greedy order is pushed. The frontier is ordered by the negated
//! fractional-knapsack upper bound, so the most promising state is expanded
//! first, and a visited set keyed by the canonical selection ensures each
//! subset enters the frontier at most once.
//!
//! The first terminal state popped is returned. Because discovered states
//! are never reopened, this is a best-effort heuristic: it usually lands on
//! or near the optimum but is not guaranteed to match
//! [`DpRunner`](crate::dp::DpRunner).
//!
//! # References
//!
//! - Pearl (1984), *Heuristics: Intelligent Search Strategies for Computer Problem Solving*
//! - Dantzig (1957), "Discrete-Variable Extremum Problems" (fractional bound)

mod config;
mod runner;
mod state;

pub use config::SearchConfig;
pub use runner::SearchRunner;
pub use state::{FractionalBound, SelectionState};
