//! Search solver configuration.

use crate::error::KnapsackError;

/// Configuration for the best-first search solver.
///
/// # Examples
///
/// ```
/// use u_knapsack::search::SearchConfig;
///
/// let config = SearchConfig::default().with_max_states(10_000);
/// assert_eq!(config.max_states, Some(10_000));
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Maximum number of states to expand.
    ///
    /// When reached before a terminal state, the best state seen so far is
    /// returned and the result is flagged as truncated. `None` means no cap.
    pub max_states: Option<usize>,
}

impl SearchConfig {
    /// Caps the number of expanded states.
    pub fn with_max_states(mut self, n: usize) -> Self {
        self.max_states = Some(n);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), KnapsackError> {
        if self.max_states == Some(0) {
            return Err(KnapsackError::invalid_config(
                "max_states must be positive or None",
            ));
        }
        Ok(())
    }
}
