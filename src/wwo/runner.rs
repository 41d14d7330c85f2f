//! MOWWO run execution.
//!
//! [`MowwoRunner`] drives a [`SearchState`] for `max_iterations`
//! generations and extracts the final Pareto front.

use super::config::MowwoConfig;
use super::state::{GenerationStats, SearchState};
use crate::error::ConfigError;
use crate::problem::{FeasibilityRule, MedicalSupplyProblem, Objectives, RepairStrategy, Solution};
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Result of a MOWWO run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MowwoResult {
    /// Non-dominated plans of the final population, in front order.
    pub front: Vec<Solution>,

    /// Objectives of each plan in `front`, index-aligned.
    pub objectives: Vec<Objectives>,

    /// Total number of generations executed.
    pub generations: usize,

    /// Per-generation statistics.
    pub history: Vec<GenerationStats>,

    /// Children that replaced their parent, summed over all generations.
    pub accepted_children: usize,

    /// Generations in which local search fired.
    pub local_searches: usize,

    /// Slots reset because of stagnation, summed over all generations.
    pub reinitializations: usize,
}

/// Executes the MOWWO loop.
///
/// # Usage
///
/// ```ignore
/// let problem = MedicalSupplyProblem::new(instance);
/// let config = MowwoConfig::default().with_seed(42);
/// let result = MowwoRunner::run(&problem, &config)?;
/// for (plan, obj) in result.front.iter().zip(&result.objectives) {
///     println!("{:.3} {:.3}", obj.satisfaction, obj.cost_objective);
/// }
/// ```
pub struct MowwoRunner;

impl MowwoRunner {
    /// Runs MOWWO with an RNG seeded from `config.seed` (or a random seed).
    pub fn run<R: RepairStrategy, F: FeasibilityRule>(
        problem: &MedicalSupplyProblem<R, F>,
        config: &MowwoConfig,
    ) -> Result<MowwoResult, ConfigError> {
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        Self::run_with_rng(problem, config, &mut rng)
    }

    /// Runs MOWWO drawing all randomness from `rng`; `config.seed` is
    /// ignored.
    pub fn run_with_rng<R: RepairStrategy, F: FeasibilityRule, G: Rng>(
        problem: &MedicalSupplyProblem<R, F>,
        config: &MowwoConfig,
        rng: &mut G,
    ) -> Result<MowwoResult, ConfigError> {
        let mut state = SearchState::new(problem, config, rng)?;
        let dims = problem.instance().dims();
        info!(
            "MOWWO start: m={} n={} K={} K1={} N={} iterations={} KN={} hmax={} truncation={:?}",
            dims.m,
            dims.n,
            dims.k,
            dims.k1,
            config.population_size,
            config.max_iterations,
            config.neighbors_per_search,
            config.stagnation_limit,
            config.truncation
        );

        let history: Vec<GenerationStats> =
            (0..config.max_iterations).map(|_| state.step(rng)).collect();
        let (front, objectives) = state.pareto_front();

        let accepted_children = history.iter().map(|s| s.accepted_children).sum();
        let local_searches = history.iter().filter(|s| s.local_search).count();
        let reinitializations = history.iter().map(|s| s.reinitialized).sum();
        info!(
            "MOWWO done: {} generations, front size {}, {} accepted children, {} local searches, {} reinitializations",
            history.len(),
            front.len(),
            accepted_children,
            local_searches,
            reinitializations
        );

        Ok(MowwoResult {
            front,
            objectives,
            generations: history.len(),
            history,
            accepted_children,
            local_searches,
            reinitializations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pareto::{dominates, Evaluation};
    use crate::problem::instance::fixtures::uniform;
    use crate::problem::{evaluate, CapacityRepair, ConstraintFeasibility};
    use crate::wwo::Truncation;

    fn problem() -> MedicalSupplyProblem {
        MedicalSupplyProblem::new(uniform(2, 3, 3, 2))
    }

    #[test]
    fn test_run_basic() {
        let config = MowwoConfig::fast().with_seed(42);
        let result = MowwoRunner::run(&problem(), &config).unwrap();

        assert_eq!(result.generations, 30);
        assert_eq!(result.history.len(), 30);
        assert!(!result.front.is_empty());
        assert_eq!(result.front.len(), result.objectives.len());
        assert!(result.local_searches >= 1);
        assert!(result.history[0].local_search);
    }

    #[test]
    fn test_run_rejects_invalid_config() {
        let config = MowwoConfig::default().with_max_iterations(0);
        assert_eq!(
            MowwoRunner::run(&problem(), &config).err(),
            Some(ConfigError::NoIterations)
        );
    }

    #[test]
    fn test_run_deterministic_with_seed() {
        let problem = problem();
        let config = MowwoConfig::fast().with_seed(7);
        let a = MowwoRunner::run(&problem, &config).unwrap();
        let b = MowwoRunner::run(&problem, &config).unwrap();
        assert_eq!(a.front, b.front);
        assert_eq!(a.objectives, b.objectives);
        assert_eq!(a.history, b.history);
    }

    #[test]
    fn test_front_objectives_match_reevaluation() {
        let problem = problem();
        let result = MowwoRunner::run(&problem, &MowwoConfig::fast().with_seed(3)).unwrap();
        for (sol, obj) in result.front.iter().zip(&result.objectives) {
            assert_eq!(evaluate(problem.instance(), sol), *obj);
        }
    }

    #[test]
    fn test_front_mutually_nondominated() {
        let problem = problem();
        let config = MowwoConfig::fast()
            .with_truncation(Truncation::Ranked)
            .with_seed(11);
        let result = MowwoRunner::run(&problem, &config).unwrap();
        for a in &result.objectives {
            for b in &result.objectives {
                assert!(!dominates(
                    &Evaluation::new(*a, true),
                    &Evaluation::new(*b, true)
                ));
            }
        }
    }

    #[test]
    fn test_counters_sum_history() {
        let result = MowwoRunner::run(
            &problem(),
            &MowwoConfig::fast().with_stagnation_limit(1).with_seed(5),
        )
        .unwrap();
        let reinit: usize = result.history.iter().map(|s| s.reinitialized).sum();
        assert_eq!(result.reinitializations, reinit);
        assert!(result.reinitializations > 0);
    }

    #[test]
    fn test_run_with_constraint_handling() {
        let problem = problem()
            .with_repair(CapacityRepair)
            .with_feasibility(ConstraintFeasibility);
        let config = MowwoConfig::fast().with_initial_value_max(20).with_seed(9);
        let result = MowwoRunner::run(&problem, &config).unwrap();
        assert!(!result.front.is_empty());
        for sol in &result.front {
            assert_eq!(&CapacityRepair.repair(problem.instance(), sol.clone()), sol);
        }
    }
}
