//! Common solution summary produced by every solver.

use crate::instance::{Instance, Item};

/// Identifies which solver produced a [`SolutionResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverKind {
    /// Exact dynamic programming.
    DynamicProgramming,
    /// Best-first search guided by the fractional-knapsack bound.
    BestFirstSearch,
    /// Binary particle swarm optimization.
    BinaryPso,
}

impl SolverKind {
    /// Short stable name, suitable for report columns.
    pub fn name(self) -> &'static str {
        match self {
            SolverKind::DynamicProgramming => "dp",
            SolverKind::BestFirstSearch => "search",
            SolverKind::BinaryPso => "bpso",
        }
    }
}

impl std::fmt::Display for SolverKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Solver-specific run statistics.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Diagnostics {
    Dp {
        /// Number of cells in the `(n + 1) x (capacity + 1)` table.
        table_cells: usize,
    },
    Search {
        /// States popped from the frontier and expanded.
        states_explored: usize,
        /// Distinct states ever pushed onto the frontier.
        states_generated: usize,
        /// Largest selection size among expanded states.
        max_depth: usize,
        /// Whether the state cap stopped the search before a terminal state.
        truncated: bool,
    },
    Bpso {
        /// Iterations executed.
        iterations: usize,
        /// Fitness of the final global best (penalized if infeasible).
        global_best_fitness: f64,
        /// Global-best fitness after each iteration.
        best_fitness_history: Vec<f64>,
        /// Mean particle fitness after each iteration.
        avg_fitness_history: Vec<f64>,
    },
}

/// Outcome of a single solver invocation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolutionResult {
    /// Solver that produced this result.
    pub solver: SolverKind,

    /// Indices of the chosen items, ascending.
    pub selected_indices: Vec<usize>,

    /// The chosen items, in instance order.
    pub selected_items: Vec<Item>,

    pub total_value: f64,

    pub total_weight: f64,

    /// `total_weight <= capacity`.
    pub is_feasible: bool,

    pub diagnostics: Diagnostics,
}

impl SolutionResult {
    /// Builds a result from a set of item indices, computing totals and
    /// feasibility against `instance`.
    pub(crate) fn from_indices(
        instance: &Instance,
        mut indices: Vec<usize>,
        solver: SolverKind,
        diagnostics: Diagnostics,
    ) -> Self {
        indices.sort_unstable();
        indices.dedup();
        let total_weight = instance.total_weight(&indices);
        let total_value = instance.total_value(&indices);
        Self {
            solver,
            selected_items: instance.select(&indices),
            selected_indices: indices,
            total_value,
            total_weight,
            is_feasible: total_weight <= instance.capacity(),
            diagnostics,
        }
    }

    pub fn solver_name(&self) -> &'static str {
        self.solver.name()
    }

    /// Names of the selected items, in instance order.
    pub fn selected_names(&self) -> Vec<&str> {
        self.selected_items.iter().map(Item::name).collect()
    }
}
