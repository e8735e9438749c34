//! Running several solvers on one instance and summarising the outcome.
//!
//! Every solver configuration implements [`Solver`], so a caller can hand a
//! mixed list to [`compare`] and receive a [`Comparison`] with one
//! [`ComparisonEntry`] per solver.

use log::debug;

use crate::bpso::{BpsoConfig, BpsoRunner};
use crate::dp::{DpConfig, DpRunner};
use crate::error::KnapsackError;
use crate::instance::Instance;
use crate::result::{SolutionResult, SolverKind};
use crate::search::{SearchConfig, SearchRunner};

/// A configured solver that can be run on an instance.
pub trait Solver: Send + Sync {
    /// Which algorithm this is.
    fn kind(&self) -> SolverKind;

    /// Solves `instance`.
    fn solve(&self, instance: &Instance) -> Result<SolutionResult, KnapsackError>;
}

impl Solver for DpConfig {
    fn kind(&self) -> SolverKind {
        SolverKind::DynamicProgramming
    }

    fn solve(&self, instance: &Instance) -> Result<SolutionResult, KnapsackError> {
        DpRunner::run(instance, self)
    }
}

impl Solver for SearchConfig {
    fn kind(&self) -> SolverKind {
        SolverKind::BestFirstSearch
    }

    fn solve(&self, instance: &Instance) -> Result<SolutionResult, KnapsackError> {
        SearchRunner::run(instance, self)
    }
}

impl Solver for BpsoConfig {
    fn kind(&self) -> SolverKind {
        SolverKind::BinaryPso
    }

    fn solve(&self, instance: &Instance) -> Result<SolutionResult, KnapsackError> {
        BpsoRunner::run(instance, self)
    }
}

/// One solver's line in a [`Comparison`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComparisonEntry {
    pub result: SolutionResult,

    /// `(reference - total_value) / reference` for feasible results when the
    /// reference is positive; `0.0` when the reference is zero; `None` for
    /// infeasible results.
    pub gap: Option<f64>,

    /// Whether this result reaches the reference value.
    pub matches_reference: bool,
}

/// Side-by-side results of several solvers on the same instance.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Comparison {
    /// Value every entry is measured against: the DP optimum if a DP result
    /// is present, otherwise the best feasible value among the entries.
    pub reference_value: f64,

    /// Whether `reference_value` is a proven optimum.
    pub reference_is_optimal: bool,

    pub entries: Vec<ComparisonEntry>,
}

impl Comparison {
    /// Builds a comparison from results already computed on one instance.
    pub fn from_results(results: Vec<SolutionResult>) -> Self {
        let exact = results
            .iter()
            .find(|r| r.solver == SolverKind::DynamicProgramming)
            .map(|r| r.total_value);
        let reference_value = exact.unwrap_or_else(|| {
            results
                .iter()
                .filter(|r| r.is_feasible)
                .map(|r| r.total_value)
                .fold(0.0, f64::max)
        });

        let entries = results
            .into_iter()
            .map(|result| {
                let gap = result.is_feasible.then(|| {
                    if reference_value > 0.0 {
                        (reference_value - result.total_value) / reference_value
                    } else {
                        0.0
                    }
                });
                let matches_reference =
                    result.is_feasible && result.total_value >= reference_value;
                ComparisonEntry {
                    result,
                    gap,
                    matches_reference,
                }
            })
            .collect();

        Self {
            reference_value,
            reference_is_optimal: exact.is_some(),
            entries,
        }
    }

    /// The entry produced by `kind`, if any.
    pub fn entry(&self, kind: SolverKind) -> Option<&ComparisonEntry> {
        self.entries.iter().find(|e| e.result.solver == kind)
    }
}

/// Runs every solver on `instance`, in order, and compares the results.
///
/// Fails on the first solver error; input-validation errors are never
/// retried.
///
/// # Examples
///
/// ```
/// use u_knapsack::bpso::BpsoConfig;
/// use u_knapsack::compare::{compare, Solver};
/// use u_knapsack::dp::DpConfig;
/// use u_knapsack::instance::Instance;
/// use u_knapsack::search::SearchConfig;
///
/// let instance = Instance::from_triples(
///     [("A", 5.0, 10.0), ("B", 4.0, 6.0), ("C", 3.0, 5.0)],
///     8.0,
/// )
/// .unwrap();
/// let dp = DpConfig::default();
/// let search = SearchConfig::default();
/// let bpso = BpsoConfig::default().with_seed(1);
/// let solvers: [&dyn Solver; 3] = [&dp, &search, &bpso];
///
/// let comparison = compare(&instance, &solvers).unwrap();
/// assert!(comparison.reference_is_optimal);
/// assert_eq!(comparison.entries.len(), 3);
/// ```
pub fn compare(
    instance: &Instance,
    solvers: &[&dyn Solver],
) -> Result<Comparison, KnapsackError> {
    let results = solvers
        .iter()
        .map(|solver| {
            debug!("compare: running {}", solver.kind());
            solver.solve(instance)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Comparison::from_results(results))
}
