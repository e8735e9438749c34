//! Binary Particle Swarm Optimization (BPSO).
//!
//! Each particle holds a bit-vector position (bit `i` set = item `i` packed)
//! and a real-valued velocity. Velocities are pulled toward the particle's
//! personal best and the swarm's global best; positions are then resampled
//! bit by bit with probability `sigmoid(v)`.
//!
//! Infeasible candidates are not rejected. Their fitness is the packed value
//! minus `penalty_coefficient * overflow`, which keeps the search space
//! connected while steering the swarm back under capacity.
//!
//! The swarm runs exactly `max_iterations` iterations. The returned global
//! best may still be infeasible; [`SolutionResult::is_feasible`] reports it.
//!
//! [`SolutionResult::is_feasible`]: crate::result::SolutionResult::is_feasible
//!
//! # References
//!
//! - Kennedy & Eberhart (1997), "A Discrete Binary Version of the Particle Swarm Algorithm"
//! - Shi & Eberhart (1998), "A Modified Particle Swarm Optimizer" (inertia weight)

mod config;
mod runner;
mod swarm;

pub use config::BpsoConfig;
pub use runner::BpsoRunner;
pub use swarm::{penalized_fitness, Swarm};
