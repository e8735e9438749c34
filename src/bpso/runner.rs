//! BPSO iteration loop.

use log::{debug, trace, warn};
use rand::Rng;

use super::config::BpsoConfig;
use super::swarm::Swarm;
use crate::error::KnapsackError;
use crate::instance::Instance;
use crate::random::rng_from_option;
use crate::result::{Diagnostics, SolutionResult, SolverKind};

/// Executes the binary PSO solver.
///
/// # Usage
///
/// ```
/// use u_knapsack::bpso::{BpsoConfig, BpsoRunner};
/// use u_knapsack::instance::Instance;
///
/// let instance = Instance::from_triples(
///     [("A", 5.0, 10.0), ("B", 4.0, 6.0), ("C", 3.0, 5.0), ("D", 2.0, 4.0)],
///     10.0,
/// )
/// .unwrap();
/// let config = BpsoConfig::default().with_seed(42);
/// let result = BpsoRunner::run(&instance, &config).unwrap();
/// assert_eq!(result.is_feasible, result.total_weight <= instance.capacity());
/// ```
pub struct BpsoRunner;

impl BpsoRunner {
    /// Runs BPSO with a generator built from [`BpsoConfig::seed`].
    pub fn run(instance: &Instance, config: &BpsoConfig) -> Result<SolutionResult, KnapsackError> {
        let mut rng = rng_from_option(config.seed);
        Self::run_with_rng(instance, config, &mut rng)
    }

    /// Runs BPSO drawing every random number from `rng`.
    ///
    /// [`BpsoConfig::seed`] is ignored.
    pub fn run_with_rng<R: Rng>(
        instance: &Instance,
        config: &BpsoConfig,
        rng: &mut R,
    ) -> Result<SolutionResult, KnapsackError> {
        config.validate()?;
        let penalty = config.effective_penalty(instance);

        debug!(
            "bpso: {} items, capacity {}, {} particles x {} iterations, penalty {}",
            instance.len(),
            instance.capacity(),
            config.n_particles,
            config.max_iterations,
            penalty
        );

        let mut swarm = Swarm::initialize(instance, config, penalty, rng);
        let mut best_fitness_history = Vec::with_capacity(config.max_iterations);
        let mut avg_fitness_history = Vec::with_capacity(config.max_iterations);

        for iteration in 0..config.max_iterations {
            swarm.step(instance, config, penalty, rng);

            let best = swarm.global_best_fitness();
            let avg = swarm.mean_fitness();
            best_fitness_history.push(best);
            avg_fitness_history.push(avg);
            trace!("bpso: iteration {}: best {} avg {}", iteration + 1, best, avg);
        }

        let global_best_fitness = swarm.global_best_fitness();
        let result = SolutionResult::from_indices(
            instance,
            swarm.global_best_indices(),
            SolverKind::BinaryPso,
            Diagnostics::Bpso {
                iterations: config.max_iterations,
                global_best_fitness,
                best_fitness_history,
                avg_fitness_history,
            },
        );

        if result.is_feasible {
            debug!(
                "bpso: value {} weight {} (fitness {})",
                result.total_value, result.total_weight, global_best_fitness
            );
        } else {
            warn!(
                "bpso: no feasible candidate found; best weighs {} against capacity {}",
                result.total_weight,
                instance.capacity()
            );
        }

        Ok(result)
    }
}
