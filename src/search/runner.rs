//! Best-first search execution.
//!
//! # Algorithm
//!
//! 1. Push the empty selection with priority `-bound(empty)`
//! 2. Pop the lowest-priority state (ties: deepest, then earliest inserted)
//! 3. If no item can be added, return it
//! 4. Otherwise push every unvisited child and repeat
//!
//! Children that keep their parent's bound are exactly the items of the
//! parent's greedy fill. Only the first of them that fits is pushed, so the
//! subsets of one greedy fill are walked as a single chain.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use log::{debug, trace, warn};

use super::config::SearchConfig;
use super::state::{FractionalBound, SelectionState};
use crate::error::KnapsackError;
use crate::instance::Instance;
use crate::result::{Diagnostics, SolutionResult, SolverKind};

/// Frontier entry. Ordered so that `BinaryHeap` (a max-heap) pops the
/// lowest priority first, then the deepest state, then the lowest sequence.
#[derive(Debug)]
struct FrontierEntry {
    priority: f64,
    sequence: u64,
    state: SelectionState,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| self.state.depth().cmp(&other.state.depth()))
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

/// Open states plus the set of every subset ever pushed.
struct Frontier<'a> {
    instance: &'a Instance,
    bound: FractionalBound,
    heap: BinaryHeap<FrontierEntry>,
    visited: HashSet<Vec<usize>>,
    next_sequence: u64,
}

impl<'a> Frontier<'a> {
    fn new(instance: &'a Instance) -> Self {
        Self {
            instance,
            bound: FractionalBound::new(instance),
            heap: BinaryHeap::new(),
            visited: HashSet::new(),
            next_sequence: 0,
        }
    }

    /// Pushes `state` unless its subset was already reached.
    /// Returns whether it was new.
    fn push(&mut self, state: SelectionState) -> bool {
        if !self.visited.insert(state.indices().to_vec()) {
            return false;
        }
        let priority = -self.bound.upper_bound(&state, self.instance);
        self.heap.push(FrontierEntry {
            priority,
            sequence: self.next_sequence,
            state,
        });
        self.next_sequence += 1;
        true
    }

    fn pop(&mut self) -> Option<SelectionState> {
        self.heap.pop().map(|entry| entry.state)
    }

    fn generated(&self) -> usize {
        self.visited.len()
    }

    /// Drops every equal-bound child except the first one in greedy order.
    fn successors(&self, state: &SelectionState, actions: Vec<usize>) -> Vec<usize> {
        let fill = self.bound.greedy_fill(state, self.instance);
        let lead = fill.iter().copied().find(|i| actions.contains(i));
        actions
            .into_iter()
            .filter(|i| Some(*i) == lead || !fill.contains(i))
            .collect()
    }
}

/// Executes the best-first search solver.
///
/// The search is deterministic: it draws no random numbers, and ties are
/// broken by depth and then by insertion order.
///
/// # Examples
///
/// ```
/// use u_knapsack::instance::Instance;
/// use u_knapsack::result::Diagnostics;
/// use u_knapsack::search::{SearchConfig, SearchRunner};
///
/// let instance = Instance::from_triples(
///     [("A", 5.0, 10.0), ("B", 4.0, 6.0), ("C", 3.0, 5.0)],
///     8.0,
/// )
/// .unwrap();
/// let result = SearchRunner::run(&instance, &SearchConfig::default()).unwrap();
/// assert!(result.is_feasible);
/// assert!(matches!(result.diagnostics, Diagnostics::Search { truncated: false, .. }));
/// ```
pub struct SearchRunner;

impl SearchRunner {
    /// Runs the search on `instance`.
    pub fn run(
        instance: &Instance,
        config: &SearchConfig,
    ) -> Result<SolutionResult, KnapsackError> {
        config.validate()?;

        debug!(
            "search: {} items, capacity {}, max_states={:?}",
            instance.len(),
            instance.capacity(),
            config.max_states
        );

        let mut frontier = Frontier::new(instance);
        frontier.push(SelectionState::empty());

        let mut best = SelectionState::empty();
        let mut explored = 0usize;
        let mut max_depth = 0usize;
        let mut truncated = false;
        let mut goal = None;

        while let Some(state) = frontier.pop() {
            if config.max_states.is_some_and(|cap| explored >= cap) {
                truncated = true;
                break;
            }
            explored += 1;
            max_depth = max_depth.max(state.depth());

            let actions = state.actions(instance);
            if actions.is_empty() {
                goal = Some(state);
                break;
            }

            for index in frontier.successors(&state, actions) {
                let child = state.with_item(index, instance);
                if child.value() > best.value() {
                    best = child.clone();
                }
                frontier.push(child);
            }

            if explored.is_multiple_of(10_000) {
                trace!(
                    "search: {} expanded, {} generated, best value {}",
                    explored,
                    frontier.generated(),
                    best.value()
                );
            }
        }

        if truncated {
            warn!(
                "search: state cap of {} reached before a terminal state; \
                 returning best seen (value {})",
                explored,
                best.value()
            );
        }

        let chosen = goal.unwrap_or(best);
        let states_generated = frontier.generated();
        let result = SolutionResult::from_indices(
            instance,
            chosen.indices().to_vec(),
            SolverKind::BestFirstSearch,
            Diagnostics::Search {
                states_explored: explored,
                states_generated,
                max_depth,
                truncated,
            },
        );

        debug!(
            "search: value {} weight {} after {} expansions ({} generated)",
            result.total_value, result.total_weight, explored, states_generated
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dp::{DpConfig, DpRunner};
    use crate::instance::Item;

    fn five_items() -> Instance {
        Instance::from_triples(
            [
                ("A", 5.0, 10.0),
                ("B", 4.0, 6.0),
                ("C", 3.0, 5.0),
                ("D", 2.0, 4.0),
                ("E", 6.0, 13.0),
            ],
            10.0,
        )
        .unwrap()
    }

    fn search_stats(result: &SolutionResult) -> (usize, usize, usize, bool) {
        match result.diagnostics {
            Diagnostics::Search {
                states_explored,
                states_generated,
                max_depth,
                truncated,
            } => (states_explored, states_generated, max_depth, truncated),
            ref other => panic!("expected search diagnostics, got {other:?}"),
        }
    }

    #[test]
    fn test_frontier_pops_lowest_priority_then_fifo() {
        let mut heap = BinaryHeap::new();
        for (priority, sequence) in [(-3.0, 0), (-5.0, 1), (-5.0, 2), (-1.0, 3)] {
            heap.push(FrontierEntry {
                priority,
                sequence,
                state: SelectionState::empty(),
            });
        }
        let order: Vec<u64> = std::iter::from_fn(|| heap.pop().map(|e| e.sequence)).collect();
        assert_eq!(order, vec![1, 2, 0, 3]);
    }

    #[test]
    fn test_frontier_prefers_deeper_state_on_ties() {
        let inst = five_items();
        let shallow = SelectionState::empty();
        let deep = shallow.with_item(3, &inst);
        let mut heap = BinaryHeap::new();
        let entries = [(-5.0, 0, &shallow), (-5.0, 1, &deep), (-3.0, 2, &deep)];
        for (priority, sequence, state) in entries {
            heap.push(FrontierEntry {
                priority,
                sequence,
                state: state.clone(),
            });
        }
        let order: Vec<u64> = std::iter::from_fn(|| heap.pop().map(|e| e.sequence)).collect();
        assert_eq!(order, vec![1, 0, 2]);
    }

    #[test]
    fn test_equal_bound_children_collapse_to_one() {
        // Greedy fill of the root is x then y; z is cut.
        let inst =
            Instance::from_triples([("x", 1.0, 5.0), ("y", 1.0, 4.0), ("z", 1.0, 3.0)], 2.5)
                .unwrap();
        let frontier = Frontier::new(&inst);
        let root = SelectionState::empty();
        assert_eq!(frontier.successors(&root, root.actions(&inst)), vec![0, 2]);

        let result = SearchRunner::run(&inst, &SearchConfig::default()).unwrap();
        assert_eq!(result.selected_names(), vec!["x", "y"]);
        let (explored, _, _, truncated) = search_stats(&result);
        assert_eq!(explored, 3);
        assert!(!truncated);
    }

    #[test]
    fn test_search_stays_polynomial_on_uncorrelated_instance() {
        use crate::random::create_rng;
        use rand::Rng;

        let n = 32;
        let mut rng = create_rng(7);
        let items: Vec<Item> = (0..n)
            .map(|i| {
                Item::new(
                    format!("item{i}"),
                    rng.random_range(1..=50) as f64,
                    rng.random_range(1..=100) as f64,
                )
            })
            .collect();
        let capacity = (items.iter().map(Item::weight).sum::<f64>() / 2.0).floor();
        let inst = Instance::new(items, capacity).unwrap();

        let result = SearchRunner::run(&inst, &SearchConfig::default()).unwrap();
        let (explored, _, _, truncated) = search_stats(&result);
        assert!(!truncated);
        assert!(explored <= n * n, "expanded {explored} states on {n} items");
        assert!(result.is_feasible);

        let dp = DpRunner::run(&inst, &DpConfig::default()).unwrap();
        assert!(result.total_value <= dp.total_value);
    }

    #[test]
    fn test_frontier_deduplicates_subsets() {
        let inst = five_items();
        let mut frontier = Frontier::new(&inst);
        let a = SelectionState::empty().with_item(0, &inst).with_item(3, &inst);
        let b = SelectionState::empty().with_item(3, &inst).with_item(0, &inst);
        assert!(frontier.push(a));
        assert!(!frontier.push(b));
        assert_eq!(frontier.generated(), 1);
    }

    #[test]
    fn test_search_feasible_and_bounded_by_dp() {
        let inst = five_items();
        let result = SearchRunner::run(&inst, &SearchConfig::default()).unwrap();
        let dp = DpRunner::run(&inst, &DpConfig::default()).unwrap();

        assert!(result.is_feasible);
        assert!(result.total_weight <= inst.capacity());
        assert!(result.total_value <= dp.total_value + 1e-9);

        let (explored, generated, max_depth, truncated) = search_stats(&result);
        assert!(!truncated);
        assert!(explored >= 1);
        assert!(generated >= explored);
        assert_eq!(max_depth, result.selected_indices.len());
    }

    #[test]
    fn test_search_returns_terminal_state() {
        let inst = five_items();
        let result = SearchRunner::run(&inst, &SearchConfig::default()).unwrap();
        let remaining = inst.capacity() - result.total_weight;
        for (i, item) in inst.items().iter().enumerate() {
            if !result.selected_indices.contains(&i) {
                assert!(
                    item.weight() > remaining,
                    "item {} still fits, result is not terminal",
                    item.name()
                );
            }
        }
    }

    #[test]
    fn test_search_deterministic() {
        let inst = five_items();
        let a = SearchRunner::run(&inst, &SearchConfig::default()).unwrap();
        let b = SearchRunner::run(&inst, &SearchConfig::default()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_search_no_items() {
        let inst = Instance::new(vec![], 10.0).unwrap();
        let result = SearchRunner::run(&inst, &SearchConfig::default()).unwrap();
        assert!(result.selected_items.is_empty());
        assert_eq!(result.total_value, 0.0);
        let (explored, generated, _, truncated) = search_stats(&result);
        assert_eq!((explored, generated, truncated), (1, 1, false));
    }

    #[test]
    fn test_search_single_item_too_heavy() {
        let inst = Instance::from_triples([("big", 11.0, 50.0)], 10.0).unwrap();
        let result = SearchRunner::run(&inst, &SearchConfig::default()).unwrap();
        assert!(result.selected_items.is_empty());
        assert_eq!(result.total_value, 0.0);
    }

    #[test]
    fn test_search_zero_capacity() {
        let inst =
            Instance::from_triples([("free", 0.0, 3.0), ("heavy", 1.0, 9.0)], 0.0).unwrap();
        let result = SearchRunner::run(&inst, &SearchConfig::default()).unwrap();
        assert_eq!(result.selected_indices, vec![0]);
        assert_eq!(result.total_weight, 0.0);
    }

    #[test]
    fn test_search_truncation_returns_best_seen() {
        let inst = five_items();
        let config = SearchConfig::default().with_max_states(1);
        let result = SearchRunner::run(&inst, &config).unwrap();

        let (explored, _, _, truncated) = search_stats(&result);
        assert!(truncated);
        assert_eq!(explored, 1);
        assert!(result.is_feasible);
        // Root expansion generates every single-item state; E is the best of them.
        assert_eq!(result.selected_names(), vec!["E"]);
    }

    #[test]
    fn test_search_handles_fractional_weights() {
        let inst =
            Instance::from_triples([("a", 1.5, 3.0), ("b", 2.5, 4.0), ("c", 1.25, 1.0)], 4.0)
                .unwrap();
        let result = SearchRunner::run(&inst, &SearchConfig::default()).unwrap();
        assert!(result.is_feasible);
        assert!((result.total_value - 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_search_invalid_config() {
        let inst = five_items();
        let err = SearchRunner::run(&inst, &SearchConfig::default().with_max_states(0));
        assert!(matches!(err, Err(KnapsackError::InvalidConfig(_))));
    }
}
