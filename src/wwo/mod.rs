//! Multi-objective water wave optimization (MOWWO).
//!
//! Each solution is a wave. Every generation the population is ranked by
//! feasibility-aware non-dominated sorting, and every wave propagates
//! (mutates) with a wavelength proportional to its rank: front members
//! barely move while poorly ranked waves are perturbed strongly.
//!
//! # Algorithm
//!
//! 1. Evaluate and rank the population
//! 2. Propagate every wave and keep the child only if it dominates its parent
//! 3. When the first front shrinks below the best size seen, search the
//!    neighborhood of each front member with a short wavelength
//! 4. Reinitialize waves that failed to improve for `stagnation_limit`
//!    generations
//! 5. Truncate to `population_size`
//!
//! # Usage
//!
//! ```
//! # use u_mowwo::problem::{InstanceData, MedicalSupplyProblem, ProblemInstance};
//! # fn data() -> InstanceData {
//! #     InstanceData {
//! #         m: 1, n: 1, k: 1, k1: 1, k2: None, n_open: None,
//! #         wk: vec![1.0], ro: vec![1.0], rs: vec![0.0], rm: vec![0.0], rv: vec![0.0],
//! #         aik: vec![vec![5.0]], ajk: vec![vec![0.0]],
//! #         cijk: vec![vec![vec![1.0]]], cjjk: vec![vec![vec![1.0]]],
//! #         coij: vec![vec![1.0]], csij: vec![vec![1.0]],
//! #         cmij: vec![vec![1.0]], cvij: vec![vec![1.0]],
//! #         bjk: vec![vec![0.0]],
//! #         no_i: vec![10.0], ns_i: vec![0.0], nm_i: vec![0.0], nv_i: vec![0.0],
//! #         no_j: vec![10.0], ns_j: vec![0.0], nm_j: vec![0.0], nv_j: vec![0.0],
//! #         c: 50.0, s: 0.5,
//! #     }
//! # }
//! use u_mowwo::wwo::{MowwoConfig, MowwoRunner};
//!
//! let problem = MedicalSupplyProblem::new(ProblemInstance::from_data(data()).unwrap());
//! let config = MowwoConfig::fast().with_seed(42);
//! let result = MowwoRunner::run(&problem, &config).unwrap();
//!
//! assert!(!result.front.is_empty());
//! assert_eq!(result.front.len(), result.objectives.len());
//! ```
//!
//! # References
//!
//! - Zheng (2015), "Water wave optimization: A new nature-inspired metaheuristic"

mod config;
mod mutation;
mod runner;
mod state;

pub use config::{MowwoConfig, Truncation};
pub use mutation::{wave_mutate, wavelength};
pub use runner::{MowwoResult, MowwoRunner};
pub use state::{GenerationStats, SearchState};
