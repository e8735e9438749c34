//! Problem instance: items and a capacity.
//!
//! An [`Instance`] is validated once at construction and never mutated.
//! Solvers only borrow it.

use crate::error::KnapsackError;

/// An item that may be packed.
///
/// Weights and values are stored as `f64` so that fractional input can be
/// represented and rejected explicitly by solvers that require integral
/// units (see [`DpRunner`](crate::dp::DpRunner)).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    name: String,
    weight: f64,
    value: f64,
}

impl Item {
    /// Creates an item. Validation happens in [`Instance::new`].
    pub fn new(name: impl Into<String>, weight: f64, value: f64) -> Self {
        Self {
            name: name.into(),
            weight,
            value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Value per unit of weight. Zero-weight items rank as `+inf`.
    pub fn ratio(&self) -> f64 {
        if self.weight > 0.0 {
            self.value / self.weight
        } else {
            f64::INFINITY
        }
    }
}

/// A 0/1 knapsack instance.
///
/// # Examples
///
/// ```
/// use u_knapsack::instance::{Instance, Item};
///
/// let instance = Instance::new(
///     vec![Item::new("A", 5.0, 10.0), Item::new("B", 4.0, 6.0)],
///     8.0,
/// )
/// .unwrap();
/// assert_eq!(instance.len(), 2);
/// assert!(instance.is_feasible(&[1]));
/// assert!(!instance.is_feasible(&[0, 1]));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Instance {
    items: Vec<Item>,
    capacity: f64,
}

impl Instance {
    /// Creates an instance after checking that the capacity and every
    /// weight and value are finite and non-negative.
    pub fn new(items: Vec<Item>, capacity: f64) -> Result<Self, KnapsackError> {
        if !capacity.is_finite() || capacity < 0.0 {
            return Err(KnapsackError::invalid_instance(format!(
                "capacity must be a non-negative finite number, got {capacity}"
            )));
        }
        for item in &items {
            if !item.weight.is_finite() || item.weight < 0.0 {
                return Err(KnapsackError::invalid_instance(format!(
                    "item '{}' has invalid weight {}",
                    item.name, item.weight
                )));
            }
            if !item.value.is_finite() || item.value < 0.0 {
                return Err(KnapsackError::invalid_instance(format!(
                    "item '{}' has invalid value {}",
                    item.name, item.value
                )));
            }
        }
        Ok(Self { items, capacity })
    }

    /// Convenience constructor from `(name, weight, value)` triples.
    pub fn from_triples<'a>(
        items: impl IntoIterator<Item = (&'a str, f64, f64)>,
        capacity: f64,
    ) -> Result<Self, KnapsackError> {
        let items = items
            .into_iter()
            .map(|(name, weight, value)| Item::new(name, weight, value))
            .collect();
        Self::new(items, capacity)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, index: usize) -> &Item {
        &self.items[index]
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of weights over `indices`.
    pub fn total_weight(&self, indices: &[usize]) -> f64 {
        indices.iter().map(|&i| self.items[i].weight).sum()
    }

    /// Sum of values over `indices`.
    pub fn total_value(&self, indices: &[usize]) -> f64 {
        indices.iter().map(|&i| self.items[i].value).sum()
    }

    /// Whether the items at `indices` fit within the capacity.
    pub fn is_feasible(&self, indices: &[usize]) -> bool {
        self.total_weight(indices) <= self.capacity
    }

    /// Clones the items at `indices`, preserving their order.
    pub fn select(&self, indices: &[usize]) -> Vec<Item> {
        indices.iter().map(|&i| self.items[i].clone()).collect()
    }
}
