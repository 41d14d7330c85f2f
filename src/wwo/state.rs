//! Search state and the per-generation transition.

use super::config::{MowwoConfig, Truncation};
use super::mutation::{wave_mutate, wavelength};
use crate::error::ConfigError;
use crate::pareto::{dominates, non_dominated_sort, Evaluation};
use crate::problem::{FeasibilityRule, MedicalSupplyProblem, Objectives, RepairStrategy, Solution};
use log::{debug, trace};
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// What happened during one generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// 0-based generation index.
    pub generation: usize,

    /// Size of the parents' first front.
    pub front_size: usize,

    /// Highest Pareto rank among the parents.
    pub max_rank: usize,

    /// Slots where the child dominated its parent.
    pub accepted_children: usize,

    /// Whether local search fired this generation.
    pub local_search: bool,

    /// Neighbors appended by local search (before truncation).
    pub neighbors_generated: usize,

    /// Slots reset to a fresh random plan.
    pub reinitialized: usize,
}

/// Mutable state of a MOWWO run.
///
/// Holds the population, one stagnation counter per slot and the size of
/// the smallest first front seen so far. [`step`](Self::step) advances the
/// search by one generation; [`MowwoRunner`](super::MowwoRunner) simply
/// calls it `max_iterations` times.
///
/// ```
/// # use u_mowwo::problem::{InstanceData, MedicalSupplyProblem, ProblemInstance};
/// # fn data() -> InstanceData {
/// #     InstanceData {
/// #         m: 1, n: 1, k: 1, k1: 1, k2: None, n_open: None,
/// #         wk: vec![1.0], ro: vec![1.0], rs: vec![0.0], rm: vec![0.0], rv: vec![0.0],
/// #         aik: vec![vec![5.0]], ajk: vec![vec![0.0]],
/// #         cijk: vec![vec![vec![1.0]]], cjjk: vec![vec![vec![1.0]]],
/// #         coij: vec![vec![1.0]], csij: vec![vec![1.0]],
/// #         cmij: vec![vec![1.0]], cvij: vec![vec![1.0]],
/// #         bjk: vec![vec![0.0]],
/// #         no_i: vec![10.0], ns_i: vec![0.0], nm_i: vec![0.0], nv_i: vec![0.0],
/// #         no_j: vec![10.0], ns_j: vec![0.0], nm_j: vec![0.0], nv_j: vec![0.0],
/// #         c: 50.0, s: 0.5,
/// #     }
/// # }
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use u_mowwo::wwo::{MowwoConfig, SearchState};
///
/// let problem = MedicalSupplyProblem::new(ProblemInstance::from_data(data()).unwrap());
/// let config = MowwoConfig::fast();
/// let mut rng = StdRng::seed_from_u64(1);
///
/// let mut state = SearchState::new(&problem, &config, &mut rng).unwrap();
/// let stats = state.step(&mut rng);
/// assert_eq!(stats.generation, 0);
/// assert_eq!(state.population().len(), config.population_size);
/// ```
#[derive(Debug, Clone)]
pub struct SearchState<'p, R, F> {
    problem: &'p MedicalSupplyProblem<R, F>,
    config: MowwoConfig,
    population: Vec<Solution>,
    stagnation: Vec<usize>,
    best_front_size: Option<usize>,
    generation: usize,
}

impl<'p, R: RepairStrategy, F: FeasibilityRule> SearchState<'p, R, F> {
    /// Validates `config` and draws the initial population.
    ///
    /// Every initial plan has entries in `0..=initial_value_max` and passes
    /// through the problem's repair strategy.
    pub fn new<G: Rng>(
        problem: &'p MedicalSupplyProblem<R, F>,
        config: &MowwoConfig,
        rng: &mut G,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let population = (0..config.population_size)
            .map(|_| problem.repair(problem.random_solution(config.initial_value_max, rng)))
            .collect();
        Ok(Self {
            problem,
            config: config.clone(),
            population,
            stagnation: vec![0; config.population_size],
            best_front_size: None,
            generation: 0,
        })
    }

    pub fn population(&self) -> &[Solution] {
        &self.population
    }

    pub fn stagnation(&self) -> &[usize] {
        &self.stagnation
    }

    /// Smallest first-front size that triggered local search so far.
    pub fn best_front_size(&self) -> Option<usize> {
        self.best_front_size
    }

    /// Number of completed generations.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Evaluates every solution, in parallel when enabled.
    pub fn evaluate_all(&self, solutions: &[Solution]) -> Vec<Evaluation> {
        let problem = self.problem;
        #[cfg(feature = "parallel")]
        if self.config.parallel {
            return solutions.par_iter().map(|s| problem.evaluate(s)).collect();
        }
        solutions.iter().map(|s| problem.evaluate(s)).collect()
    }

    /// Runs one generation.
    ///
    /// 1. Evaluate and rank the parents
    /// 2. Mutate every parent with its rank's wavelength, then repair
    /// 3. Replace a parent by its child only if the child dominates it
    /// 4. If the first front shrank below the best size seen, append
    ///    `neighbors_per_search` neighbors of each front member (mutated from
    ///    the parents before replacement)
    /// 5. Reinitialize slots whose stagnation counter exceeds the limit
    /// 6. Truncate back to `population_size`
    pub fn step<G: Rng>(&mut self, rng: &mut G) -> GenerationStats {
        let problem = self.problem;
        let n = self.config.population_size;
        let parents = std::mem::take(&mut self.population);

        let evaluations = self.evaluate_all(&parents);
        let sorted = non_dominated_sort(&evaluations);
        let max_rank = sorted.max_rank();

        let children: Vec<Solution> = parents
            .iter()
            .zip(&sorted.ranks)
            .map(|(parent, &rank)| problem.repair(wave_mutate(parent, wavelength(rank, max_rank), rng)))
            .collect();
        let child_evaluations = self.evaluate_all(&children);

        let front = sorted.first_front();
        let local_search = !front.is_empty()
            && self.best_front_size.map_or(true, |best| front.len() < best);
        let mut neighbors = Vec::new();
        if local_search {
            self.best_front_size = Some(front.len());
            for &idx in front {
                for _ in 0..self.config.neighbors_per_search {
                    let neighbor = wave_mutate(&parents[idx], self.config.local_search_wavelength, rng);
                    neighbors.push(problem.repair(neighbor));
                }
            }
        }
        let neighbors_generated = neighbors.len();

        let mut accepted_children = 0;
        let mut population = Vec::with_capacity(n + neighbors_generated);
        for (slot, (parent, child)) in parents.into_iter().zip(children).enumerate() {
            if dominates(&child_evaluations[slot], &evaluations[slot]) {
                trace!("generation {}: child replaces slot {}", self.generation, slot);
                population.push(child);
                self.stagnation[slot] = 0;
                accepted_children += 1;
            } else {
                population.push(parent);
                self.stagnation[slot] += 1;
            }
        }
        population.extend(neighbors);

        let mut reinitialized = 0;
        for slot in 0..n {
            if self.stagnation[slot] > self.config.stagnation_limit {
                trace!(
                    "generation {}: slot {} stagnated for {} generations, reinitializing",
                    self.generation,
                    slot,
                    self.stagnation[slot]
                );
                population[slot] =
                    problem.repair(problem.random_solution(self.config.initial_value_max, rng));
                self.stagnation[slot] = 0;
                reinitialized += 1;
            }
        }

        match self.config.truncation {
            Truncation::Ranked if population.len() > n => {
                let pool_evaluations = self.evaluate_all(&population);
                let (kept, stagnation) =
                    truncate_ranked(population, &pool_evaluations, &self.stagnation, n);
                self.population = kept;
                self.stagnation = stagnation;
            }
            _ => {
                population.truncate(n);
                self.population = population;
            }
        }

        let stats = GenerationStats {
            generation: self.generation,
            front_size: front.len(),
            max_rank,
            accepted_children,
            local_search,
            neighbors_generated,
            reinitialized,
        };
        debug!(
            "generation {}: front={} max_rank={} accepted={} local_search={} neighbors={} reinitialized={}",
            stats.generation,
            stats.front_size,
            stats.max_rank,
            stats.accepted_children,
            stats.local_search,
            stats.neighbors_generated,
            stats.reinitialized
        );
        self.generation += 1;
        stats
    }

    /// First front of the current population, in front order, with the
    /// objectives of each member.
    pub fn pareto_front(&self) -> (Vec<Solution>, Vec<Objectives>) {
        let evaluations = self.evaluate_all(&self.population);
        let sorted = non_dominated_sort(&evaluations);
        sorted
            .first_front()
            .iter()
            .map(|&i| (self.population[i].clone(), evaluations[i].objectives))
            .unzip()
    }
}

/// Keeps the best `n` of `pool` by `(rank, index)`, preserving pool order.
///
/// Survivors from the first `stagnation.len()` slots keep their counter;
/// appended entries start at 0.
fn truncate_ranked(
    pool: Vec<Solution>,
    evaluations: &[Evaluation],
    stagnation: &[usize],
    n: usize,
) -> (Vec<Solution>, Vec<usize>) {
    let sorted = non_dominated_sort(evaluations);
    let mut order: Vec<usize> = (0..pool.len()).collect();
    order.sort_by_key(|&i| (sorted.ranks[i], i));

    let mut keep = vec![false; pool.len()];
    for &i in order.iter().take(n) {
        keep[i] = true;
    }

    let counters = (0..pool.len())
        .filter(|&i| keep[i])
        .map(|i| stagnation.get(i).copied().unwrap_or(0))
        .collect();
    let kept = pool
        .into_iter()
        .zip(&keep)
        .filter_map(|(solution, &k)| k.then_some(solution))
        .collect();
    (kept, counters)
}
