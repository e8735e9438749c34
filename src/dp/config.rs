//! DP solver configuration.

use crate::error::KnapsackError;

/// Configuration for the DP solver.
///
/// # Examples
///
/// ```
/// use u_knapsack::dp::DpConfig;
///
/// let config = DpConfig::default().with_parallel(true);
/// assert!(config.parallel);
/// assert_eq!(config.max_table_cells, 100_000_000);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DpConfig {
    /// Fill each table row's capacity loop in parallel using rayon.
    ///
    /// Rows are still computed one after another, since row `i` reads
    /// only row `i - 1`.
    pub parallel: bool,

    /// Upper bound on `(n + 1) * (capacity + 1)`.
    ///
    /// Instances that would need a larger table fail with
    /// [`KnapsackError::TableTooLarge`] instead of attempting the allocation.
    pub max_table_cells: usize,
}

impl Default for DpConfig {
    fn default() -> Self {
        Self {
            parallel: false,
            max_table_cells: 100_000_000,
        }
    }
}

impl DpConfig {
    /// Enables or disables parallel row filling.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the table size limit.
    pub fn with_max_table_cells(mut self, cells: usize) -> Self {
        self.max_table_cells = cells;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), KnapsackError> {
        if self.max_table_cells == 0 {
            return Err(KnapsackError::invalid_config(
                "max_table_cells must be at least 1",
            ));
        }
        Ok(())
    }
}
