//! DP table fill and backtracking.

use log::debug;
use rayon::prelude::*;

use super::config::DpConfig;
use crate::error::KnapsackError;
use crate::instance::Instance;
use crate::result::{Diagnostics, SolutionResult, SolverKind};

/// Executes the exact DP solver.
///
/// # Examples
///
/// ```
/// use u_knapsack::dp::{DpConfig, DpRunner};
/// use u_knapsack::instance::Instance;
///
/// let instance = Instance::from_triples(
///     [("A", 5.0, 10.0), ("B", 4.0, 40.0), ("C", 6.0, 30.0), ("D", 4.0, 50.0)],
///     10.0,
/// )
/// .unwrap();
/// let result = DpRunner::run(&instance, &DpConfig::default()).unwrap();
/// assert_eq!(result.total_value, 90.0);
/// assert_eq!(result.selected_names(), vec!["B", "D"]);
/// ```
pub struct DpRunner;

impl DpRunner {
    /// Solves `instance` to optimality.
    ///
    /// Fails if a weight or the capacity is fractional, or if the table would
    /// exceed [`DpConfig::max_table_cells`].
    pub fn run(instance: &Instance, config: &DpConfig) -> Result<SolutionResult, KnapsackError> {
        config.validate()?;

        let capacity = integral(instance.capacity(), || "capacity".to_string())?;
        let weights = instance
            .items()
            .iter()
            .map(|item| integral(item.weight(), || format!("weight of item '{}'", item.name())))
            .collect::<Result<Vec<f64>, _>>()?;

        let n = instance.len();
        let requested = (n as f64 + 1.0) * (capacity + 1.0);
        if requested > config.max_table_cells as f64 {
            return Err(KnapsackError::TableTooLarge {
                cells: requested as usize,
                limit: config.max_table_cells,
            });
        }
        // Bounded by max_table_cells, so the casts below are exact.
        let capacity = capacity as usize;
        let weights: Vec<usize> = weights.iter().map(|&w| w as usize).collect();
        let width = capacity + 1;

        debug!(
            "dp: {} items, capacity {}, {} cells, parallel={}",
            n,
            capacity,
            (n + 1) * width,
            config.parallel
        );

        // Row-major (n + 1) x width table; row 0 stays all zero.
        let mut table = vec![0.0f64; (n + 1) * width];
        for i in 1..=n {
            let (done, rest) = table.split_at_mut(i * width);
            let prev = &done[(i - 1) * width..];
            let row = &mut rest[..width];
            fill_row(prev, row, weights[i - 1], instance.item(i - 1).value(), config.parallel);
        }

        let selected = backtrack(&table, &weights, width, capacity);
        let result = SolutionResult::from_indices(
            instance,
            selected,
            SolverKind::DynamicProgramming,
            Diagnostics::Dp {
                table_cells: table.len(),
            },
        );

        debug!(
            "dp: optimum {} with {} items, weight {}",
            result.total_value,
            result.selected_indices.len(),
            result.total_weight
        );

        Ok(result)
    }
}

/// Returns `amount` if it has no fractional part.
fn integral(amount: f64, what: impl FnOnce() -> String) -> Result<f64, KnapsackError> {
    if amount.fract() != 0.0 {
        return Err(KnapsackError::NonIntegralInput {
            what: what(),
            amount,
        });
    }
    Ok(amount)
}

/// Computes row `i` from row `i - 1` for an item of the given weight and value.
fn fill_row(prev: &[f64], row: &mut [f64], weight: usize, value: f64, parallel: bool) {
    let cell = |w: usize| {
        let skip = prev[w];
        if weight <= w {
            let take = prev[w - weight] + value;
            if take > skip {
                return take;
            }
        }
        skip
    };

    if parallel {
        row.par_iter_mut()
            .enumerate()
            .for_each(|(w, slot)| *slot = cell(w));
    } else {
        for (w, slot) in row.iter_mut().enumerate() {
            *slot = cell(w);
        }
    }
}

/// Walks back from `(n, capacity)`: a row that differs from the one above
/// means that row's item was taken.
fn backtrack(table: &[f64], weights: &[usize], width: usize, capacity: usize) -> Vec<usize> {
    let mut selected = Vec::new();
    let mut w = capacity;
    for i in (1..=weights.len()).rev() {
        if table[i * width + w] != table[(i - 1) * width + w] {
            selected.push(i - 1);
            w -= weights[i - 1];
        }
    }
    selected.reverse();
    selected
}
