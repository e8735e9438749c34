//! Search states and the fractional-knapsack bound.

use crate::instance::Instance;

/// A canonical partial selection.
///
/// Indices are kept sorted and unique, so two paths that reach the same
/// subset produce equal states. Weight never exceeds the capacity: states
/// are only created through [`SelectionState::with_item`] on an action
/// returned by [`SelectionState::actions`].
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    indices: Vec<usize>,
    weight: f64,
    value: f64,
}

impl SelectionState {
    /// The empty selection.
    pub fn empty() -> Self {
        Self {
            indices: Vec::new(),
            weight: 0.0,
            value: 0.0,
        }
    }

    /// Selected item indices, ascending.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Number of selected items.
    pub fn depth(&self) -> usize {
        self.indices.len()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.binary_search(&index).is_ok()
    }

    /// Unselected items whose addition keeps the weight within capacity.
    pub fn actions(&self, instance: &Instance) -> Vec<usize> {
        (0..instance.len())
            .filter(|&i| !self.contains(i) && self.weight_with(i, instance) <= instance.capacity())
            .collect()
    }

    /// Weight after adding `index`, summed in the same ascending order as
    /// [`Instance::total_weight`] so the capacity check agrees with the
    /// final feasibility check bit for bit.
    fn weight_with(&self, index: usize, instance: &Instance) -> f64 {
        let (lo, hi) = self.indices.split_at(self.indices.partition_point(|&i| i < index));
        lo.iter()
            .chain(std::iter::once(&index))
            .chain(hi)
            .map(|&i| instance.item(i).weight())
            .sum()
    }

    /// A state is terminal when nothing else fits.
    pub fn is_terminal(&self, instance: &Instance) -> bool {
        self.actions(instance).is_empty()
    }

    /// Returns the state with `index` added.
    ///
    /// Totals are recomputed over the sorted indices so that every path to
    /// the same subset yields bit-identical weight and value.
    pub fn with_item(&self, index: usize, instance: &Instance) -> Self {
        let mut indices = self.indices.clone();
        if let Err(pos) = indices.binary_search(&index) {
            indices.insert(pos, index);
        }
        Self {
            weight: instance.total_weight(&indices),
            value: instance.total_value(&indices),
            indices,
        }
    }
}

/// Fractional-knapsack upper bound.
///
/// Holds the items ordered by descending value/weight ratio (zero-weight
/// items first, ties by index). The bound of a state is its value plus a
/// greedy fill of the remaining capacity over unselected items, taking a
/// fraction of the first item that does not fit.
#[derive(Debug, Clone)]
pub struct FractionalBound {
    order: Vec<usize>,
}

impl FractionalBound {
    pub fn new(instance: &Instance) -> Self {
        let items = instance.items();
        let mut order: Vec<usize> = (0..items.len()).collect();
        order.sort_by(|&a, &b| {
            items[b]
                .ratio()
                .total_cmp(&items[a].ratio())
                .then(a.cmp(&b))
        });
        Self { order }
    }

    /// Item indices in greedy order.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Upper bound on the best value reachable from `state`.
    pub fn upper_bound(&self, state: &SelectionState, instance: &Instance) -> f64 {
        let mut remaining = instance.capacity() - state.weight;
        let mut bound = state.value;
        for &i in &self.order {
            if state.contains(i) {
                continue;
            }
            let item = instance.item(i);
            if item.weight() <= remaining {
                remaining -= item.weight();
                bound += item.value();
            } else {
                // item.weight() > remaining >= 0 here
                bound += item.value() * remaining / item.weight();
                break;
            }
        }
        bound
    }

    /// Items the greedy fill of `state` takes whole, in greedy order.
    ///
    /// Adding any one of them to `state` leaves the bound unchanged, so the
    /// children they produce all share their parent's priority.
    pub fn greedy_fill(&self, state: &SelectionState, instance: &Instance) -> Vec<usize> {
        let mut remaining = instance.capacity() - state.weight;
        let mut fill = Vec::new();
        for &i in &self.order {
            if state.contains(i) {
                continue;
            }
            let weight = instance.item(i).weight();
            if weight > remaining {
                break;
            }
            remaining -= weight;
            fill.push(i);
        }
        fill
    }
}
