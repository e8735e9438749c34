//! Swarm state kept as flat structure-of-arrays buffers.
//!
//! Particle `p` owns the slice `[p * n_items, (p + 1) * n_items)` of
//! `positions`, `velocities` and `best_positions`, and entry `p` of
//! `fitness` and `best_fitness`.

use rand::rngs::StdRng;
use rand::Rng;
use rayon::prelude::*;

use super::config::BpsoConfig;
use crate::instance::Instance;
use crate::random::create_rng;

/// Fitness of a bit-vector: packed value, minus `penalty * overflow` when
/// the packed weight exceeds the capacity.
pub fn penalized_fitness(instance: &Instance, bits: &[bool], penalty: f64) -> f64 {
    let mut weight = 0.0;
    let mut value = 0.0;
    for (item, &bit) in instance.items().iter().zip(bits) {
        if bit {
            weight += item.weight();
            value += item.value();
        }
    }
    let overflow = weight - instance.capacity();
    if overflow > 0.0 {
        value - penalty * overflow
    } else {
        value
    }
}

fn sigmoid(v: f64) -> f64 {
    1.0 / (1.0 + (-v).exp())
}

/// Read-only inputs shared by every particle during one iteration.
struct StepContext<'a> {
    instance: &'a Instance,
    config: &'a BpsoConfig,
    penalty: f64,
    global_best: &'a [bool],
}

/// Mutable view of one particle's slices.
struct ParticleMut<'a> {
    position: &'a mut [bool],
    velocity: &'a mut [f64],
    best_position: &'a mut [bool],
    fitness: &'a mut f64,
    best_fitness: &'a mut f64,
}

impl ParticleMut<'_> {
    /// Velocity update, sigmoid resampling, evaluation and personal-best
    /// update for one particle, drawing only from `rng`.
    fn update(self, ctx: &StepContext<'_>, rng: &mut StdRng) {
        let cfg = ctx.config;
        for d in 0..self.position.len() {
            let x = f64::from(u8::from(self.position[d]));
            let pbest = f64::from(u8::from(self.best_position[d]));
            let gbest = f64::from(u8::from(ctx.global_best[d]));
            let r1: f64 = rng.random();
            let r2: f64 = rng.random();

            let v = cfg.inertia * self.velocity[d]
                + cfg.c1 * r1 * (pbest - x)
                + cfg.c2 * r2 * (gbest - x);
            let v = v.clamp(-cfg.v_max, cfg.v_max);
            self.velocity[d] = v;
            self.position[d] = rng.random::<f64>() < sigmoid(v);
        }

        let f = penalized_fitness(ctx.instance, self.position, ctx.penalty);
        *self.fitness = f;
        if f > *self.best_fitness {
            *self.best_fitness = f;
            self.best_position.copy_from_slice(self.position);
        }
    }
}

/// The particle population plus the global best.
#[derive(Debug, Clone)]
pub struct Swarm {
    n_particles: usize,
    n_items: usize,
    positions: Vec<bool>,
    velocities: Vec<f64>,
    best_positions: Vec<bool>,
    fitness: Vec<f64>,
    best_fitness: Vec<f64>,
    global_best_position: Vec<bool>,
    global_best_fitness: f64,
}

impl Swarm {
    /// Random bit positions, uniform velocities in `[-v_max, v_max]`,
    /// personal bests set to the initial positions, and the global best
    /// taken from those.
    pub fn initialize<R: Rng>(
        instance: &Instance,
        config: &BpsoConfig,
        penalty: f64,
        rng: &mut R,
    ) -> Self {
        let n_particles = config.n_particles;
        let n_items = instance.len();
        let len = n_particles * n_items;

        let positions: Vec<bool> = (0..len).map(|_| rng.random_bool(0.5)).collect();
        let velocities: Vec<f64> = (0..len)
            .map(|_| rng.random_range(-config.v_max..=config.v_max))
            .collect();
        let fitness: Vec<f64> = (0..n_particles)
            .map(|p| {
                let position = &positions[p * n_items..(p + 1) * n_items];
                penalized_fitness(instance, position, penalty)
            })
            .collect();

        let mut swarm = Self {
            n_particles,
            n_items,
            best_positions: positions.clone(),
            best_fitness: fitness.clone(),
            positions,
            velocities,
            fitness,
            global_best_position: vec![false; n_items],
            global_best_fitness: f64::NEG_INFINITY,
        };
        swarm.update_global_best();
        swarm
    }

    /// Advances every particle by one iteration, then refreshes the global
    /// best.
    ///
    /// All particles read the global best of the previous iteration; it is
    /// only recomputed once every particle has finished.
    pub fn step<R: Rng>(
        &mut self,
        instance: &Instance,
        config: &BpsoConfig,
        penalty: f64,
        rng: &mut R,
    ) {
        if self.n_items == 0 {
            return;
        }

        let seeds: Vec<u64> = (0..self.n_particles).map(|_| rng.random()).collect();
        let ctx = StepContext {
            instance,
            config,
            penalty,
            global_best: &self.global_best_position,
        };
        let n = self.n_items;

        if config.parallel {
            self.positions
                .par_chunks_mut(n)
                .zip(self.velocities.par_chunks_mut(n))
                .zip(self.best_positions.par_chunks_mut(n))
                .zip(self.fitness.par_iter_mut())
                .zip(self.best_fitness.par_iter_mut())
                .zip(seeds.par_iter())
                .for_each(|(parts, &seed)| {
                    let ((((position, velocity), best_position), fitness), best_fitness) = parts;
                    let particle = ParticleMut {
                        position,
                        velocity,
                        best_position,
                        fitness,
                        best_fitness,
                    };
                    particle.update(&ctx, &mut create_rng(seed));
                });
        } else {
            self.positions
                .chunks_mut(n)
                .zip(self.velocities.chunks_mut(n))
                .zip(self.best_positions.chunks_mut(n))
                .zip(self.fitness.iter_mut())
                .zip(self.best_fitness.iter_mut())
                .zip(seeds.iter())
                .for_each(|(parts, &seed)| {
                    let ((((position, velocity), best_position), fitness), best_fitness) = parts;
                    let particle = ParticleMut {
                        position,
                        velocity,
                        best_position,
                        fitness,
                        best_fitness,
                    };
                    particle.update(&ctx, &mut create_rng(seed));
                });
        }

        self.update_global_best();
    }

    /// Promotes the best personal best if it beats the current global best.
    /// Ties keep the earlier particle.
    fn update_global_best(&mut self) {
        let n = self.n_items;
        let mut leader = None;
        for (p, &f) in self.best_fitness.iter().enumerate() {
            if f > self.global_best_fitness {
                self.global_best_fitness = f;
                leader = Some(p);
            }
        }
        if let Some(p) = leader {
            self.global_best_position
                .copy_from_slice(&self.best_positions[p * n..(p + 1) * n]);
        }
    }

    pub fn n_particles(&self) -> usize {
        self.n_particles
    }

    pub fn position(&self, particle: usize) -> &[bool] {
        &self.positions[particle * self.n_items..(particle + 1) * self.n_items]
    }

    pub fn velocity(&self, particle: usize) -> &[f64] {
        &self.velocities[particle * self.n_items..(particle + 1) * self.n_items]
    }

    pub fn personal_best_position(&self, particle: usize) -> &[bool] {
        &self.best_positions[particle * self.n_items..(particle + 1) * self.n_items]
    }

    pub fn personal_best_fitness(&self, particle: usize) -> f64 {
        self.best_fitness[particle]
    }

    pub fn global_best_position(&self) -> &[bool] {
        &self.global_best_position
    }

    pub fn global_best_fitness(&self) -> f64 {
        self.global_best_fitness
    }

    /// Indices of the items set in the global best.
    pub fn global_best_indices(&self) -> Vec<usize> {
        self.global_best_position
            .iter()
            .enumerate()
            .filter(|&(_, &bit)| bit)
            .map(|(i, _)| i)
            .collect()
    }

    /// Mean current fitness across the population.
    pub fn mean_fitness(&self) -> f64 {
        self.fitness.iter().sum::<f64>() / self.n_particles as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Instance {
        Instance::from_triples([("a", 4.0, 5.0), ("b", 3.0, 4.0), ("c", 2.0, 3.0)], 6.0).unwrap()
    }

    #[test]
    fn test_penalized_fitness() {
        let inst = sample();
        assert!((penalized_fitness(&inst, &[false, true, true], 10.0) - 7.0).abs() < 1e-12);
        // a + b: weight 7, overflow 1
        let overflowing = penalized_fitness(&inst, &[true, true, false], 10.0);
        assert!((overflowing - (9.0 - 10.0)).abs() < 1e-12);
        // all: weight 9, overflow 3
        assert!((penalized_fitness(&inst, &[true, true, true], 2.0) - (12.0 - 6.0)).abs() < 1e-12);
        assert_eq!(penalized_fitness(&inst, &[false, false, false], 10.0), 0.0);
    }

    #[test]
    fn test_sigmoid() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
        assert!(sigmoid(4.0) > 0.98);
        assert!(sigmoid(-4.0) < 0.02);
    }

    #[test]
    fn test_initialize_bests() {
        let inst = sample();
        let config = BpsoConfig::default().with_n_particles(8);
        let mut rng = create_rng(3);
        let swarm = Swarm::initialize(&inst, &config, 10.0, &mut rng);

        assert_eq!(swarm.n_particles(), 8);
        let mut best = f64::NEG_INFINITY;
        for p in 0..8 {
            assert_eq!(swarm.position(p), swarm.personal_best_position(p));
            assert!(swarm.velocity(p).iter().all(|v| v.abs() <= config.v_max));
            let f = penalized_fitness(&inst, swarm.position(p), 10.0);
            assert_eq!(swarm.personal_best_fitness(p), f);
            best = best.max(f);
        }
        assert_eq!(swarm.global_best_fitness(), best);
        assert_eq!(
            penalized_fitness(&inst, swarm.global_best_position(), 10.0),
            best
        );
    }

    #[test]
    fn test_step_keeps_invariants() {
        let inst = sample();
        let config = BpsoConfig::default().with_n_particles(6);
        let mut rng = create_rng(11);
        let mut swarm = Swarm::initialize(&inst, &config, 10.0, &mut rng);

        for _ in 0..20 {
            let before = swarm.global_best_fitness();
            let personal: Vec<f64> = (0..6).map(|p| swarm.personal_best_fitness(p)).collect();
            swarm.step(&inst, &config, 10.0, &mut rng);

            assert!(swarm.global_best_fitness() >= before);
            for (p, &old) in personal.iter().enumerate() {
                assert!(swarm.personal_best_fitness(p) >= old);
                assert!(swarm.personal_best_fitness(p) <= swarm.global_best_fitness());
                assert!(swarm.velocity(p).iter().all(|v| v.abs() <= config.v_max));
            }
        }
    }

    #[test]
    fn test_parallel_step_matches_sequential() {
        let inst = sample();
        let seq_config = BpsoConfig::default().with_n_particles(16);
        let par_config = seq_config.clone().with_parallel(true);

        let mut rng_a = create_rng(99);
        let mut rng_b = create_rng(99);
        let mut a = Swarm::initialize(&inst, &seq_config, 10.0, &mut rng_a);
        let mut b = Swarm::initialize(&inst, &par_config, 10.0, &mut rng_b);
        for _ in 0..10 {
            a.step(&inst, &seq_config, 10.0, &mut rng_a);
            b.step(&inst, &par_config, 10.0, &mut rng_b);
        }
        assert_eq!(a.positions, b.positions);
        assert_eq!(a.velocities, b.velocities);
        assert_eq!(a.global_best_position, b.global_best_position);
        assert_eq!(a.global_best_fitness, b.global_best_fitness);
    }

    #[test]
    fn test_empty_instance() {
        let inst = Instance::new(vec![], 5.0).unwrap();
        let config = BpsoConfig::default().with_n_particles(4);
        let mut rng = create_rng(1);
        let mut swarm = Swarm::initialize(&inst, &config, 1.0, &mut rng);
        swarm.step(&inst, &config, 1.0, &mut rng);
        assert_eq!(swarm.global_best_fitness(), 0.0);
        assert!(swarm.global_best_indices().is_empty());
        assert_eq!(swarm.mean_fitness(), 0.0);
    }
}
