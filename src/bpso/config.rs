//! BPSO configuration.

use crate::error::KnapsackError;
use crate::instance::Instance;

/// Configuration for the binary PSO solver.
///
/// # Defaults
///
/// ```
/// use u_knapsack::bpso::BpsoConfig;
///
/// let config = BpsoConfig::default();
/// assert_eq!(config.n_particles, 30);
/// assert_eq!(config.max_iterations, 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_knapsack::bpso::BpsoConfig;
///
/// let config = BpsoConfig::default()
///     .with_n_particles(50)
///     .with_max_iterations(200)
///     .with_inertia(0.9)
///     .with_coefficients(2.0, 2.0)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BpsoConfig {
    /// Number of particles in the swarm.
    pub n_particles: usize,

    /// Number of iterations to run. There is no early stopping.
    pub max_iterations: usize,

    /// Inertia weight `w` applied to the previous velocity.
    ///
    /// Typical range: 0.4–0.9.
    pub inertia: f64,

    /// Cognitive coefficient `c1` (pull toward the personal best).
    pub c1: f64,

    /// Social coefficient `c2` (pull toward the global best).
    pub c2: f64,

    /// Velocities are clamped to `[-v_max, v_max]`.
    ///
    /// Bounds the bit probability to `[sigmoid(-v_max), sigmoid(v_max)]`, so
    /// every bit keeps a small chance of flipping. Initial velocities are
    /// drawn uniformly from the same range.
    pub v_max: f64,

    /// Fitness penalty per unit of weight over capacity.
    ///
    /// `None` uses `1 + sum of all item values`. For integral weights this
    /// scores every infeasible candidate below the empty selection.
    pub penalty_coefficient: Option<f64>,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Whether to update particles in parallel using rayon.
    ///
    /// Each particle draws from its own generator seeded by the master
    /// generator, so results are identical with and without parallelism.
    pub parallel: bool,
}

impl Default for BpsoConfig {
    fn default() -> Self {
        Self {
            n_particles: 30,
            max_iterations: 100,
            inertia: 0.7,
            c1: 1.5,
            c2: 1.5,
            v_max: 4.0,
            penalty_coefficient: None,
            seed: None,
            parallel: false,
        }
    }
}

impl BpsoConfig {
    /// Sets the swarm size.
    pub fn with_n_particles(mut self, n: usize) -> Self {
        self.n_particles = n;
        self
    }

    /// Sets the iteration budget.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_inertia(mut self, w: f64) -> Self {
        self.inertia = w;
        self
    }

    /// Sets the cognitive (`c1`) and social (`c2`) coefficients.
    pub fn with_coefficients(mut self, c1: f64, c2: f64) -> Self {
        self.c1 = c1;
        self.c2 = c2;
        self
    }

    pub fn with_v_max(mut self, v_max: f64) -> Self {
        self.v_max = v_max;
        self
    }

    /// Overrides the automatic penalty coefficient.
    pub fn with_penalty_coefficient(mut self, penalty: f64) -> Self {
        self.penalty_coefficient = Some(penalty);
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel particle updates.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// The penalty coefficient used for `instance`.
    pub fn effective_penalty(&self, instance: &Instance) -> f64 {
        self.penalty_coefficient
            .unwrap_or_else(|| 1.0 + instance.items().iter().map(|item| item.value()).sum::<f64>())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), KnapsackError> {
        if self.n_particles == 0 {
            return Err(KnapsackError::invalid_config("n_particles must be at least 1"));
        }
        if self.max_iterations == 0 {
            return Err(KnapsackError::invalid_config(
                "max_iterations must be at least 1",
            ));
        }
        if !self.inertia.is_finite() {
            return Err(KnapsackError::invalid_config(format!(
                "inertia must be finite, got {}",
                self.inertia
            )));
        }
        for (name, c) in [("c1", self.c1), ("c2", self.c2)] {
            if !c.is_finite() || c < 0.0 {
                return Err(KnapsackError::invalid_config(format!(
                    "{name} must be a non-negative finite number, got {c}"
                )));
            }
        }
        if !self.v_max.is_finite() || self.v_max <= 0.0 {
            return Err(KnapsackError::invalid_config(format!(
                "v_max must be positive and finite, got {}",
                self.v_max
            )));
        }
        if let Some(p) = self.penalty_coefficient {
            if !p.is_finite() || p < 0.0 {
                return Err(KnapsackError::invalid_config(format!(
                    "penalty_coefficient must be a non-negative finite number, got {p}"
                )));
            }
        }
        Ok(())
    }
}
