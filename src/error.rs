//! Error type shared by every solver.

/// Errors raised before or instead of solving.
///
/// Non-optimal or truncated runs are not errors: they are reported through
/// [`Diagnostics`](crate::result::Diagnostics) and
/// [`SolutionResult::is_feasible`](crate::result::SolutionResult::is_feasible).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KnapsackError {
    /// A weight, value, or the capacity is negative or not finite.
    #[error("invalid instance: {reason}")]
    InvalidInstance { reason: String },

    /// The DP solver needs integral weights and capacity to index its table.
    #[error("{what} must be integral for the DP solver, got {amount}")]
    NonIntegralInput { what: String, amount: f64 },

    /// The DP table would exceed the configured cell limit.
    #[error("DP table of {cells} cells exceeds the limit of {limit}")]
    TableTooLarge { cells: usize, limit: usize },

    /// A solver configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl KnapsackError {
    pub(crate) fn invalid_instance(reason: impl Into<String>) -> Self {
        KnapsackError::InvalidInstance {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        KnapsackError::InvalidConfig(reason.into())
    }
}
