//! Feasibility-aware Pareto dominance and non-dominated sorting.
//!
//! Both objectives are **maximized**. Feasibility is compared first: a
//! feasible solution dominates every infeasible one regardless of
//! objective values, and objectives only decide between solutions of the
//! same feasibility class.
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"
//! - Deb (2000), "An efficient constraint handling method for genetic algorithms"

use crate::problem::Objectives;

/// A solution's evaluation as seen by the ranking engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub objectives: Objectives,
    pub feasible: bool,
}

impl Evaluation {
    pub fn new(objectives: Objectives, feasible: bool) -> Self {
        Self {
            objectives,
            feasible,
        }
    }
}

/// Result of non-dominated sorting.
///
/// Each element of `ranks` corresponds to the Pareto rank of the solution
/// at the same index. Rank 0 is the Pareto front (non-dominated solutions).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NondominatedSortResult {
    /// Pareto rank for each solution (0 = front).
    pub ranks: Vec<usize>,

    /// Indices grouped by front: `fronts[0]` contains rank-0 indices, etc.
    /// Never contains an empty front.
    pub fronts: Vec<Vec<usize>>,
}

impl NondominatedSortResult {
    /// Highest rank present, 0 for an empty population.
    pub fn max_rank(&self) -> usize {
        self.ranks.iter().copied().max().unwrap_or(0)
    }

    /// Indices of rank 0.
    pub fn first_front(&self) -> &[usize] {
        self.fronts.first().map_or(&[], Vec::as_slice)
    }
}

/// Whether `a` dominates `b`.
///
/// Feasible beats infeasible outright. Otherwise `a` must be at least as
/// good in both objectives and strictly better in one.
pub fn dominates(a: &Evaluation, b: &Evaluation) -> bool {
    match (a.feasible, b.feasible) {
        (true, false) => true,
        (false, true) => false,
        _ => pareto_dominates(&a.objectives.as_array(), &b.objectives.as_array()),
    }
}

/// Plain Pareto dominance under maximization.
pub fn pareto_dominates(a: &[f64], b: &[f64]) -> bool {
    let mut strictly_better = false;
    for (&va, &vb) in a.iter().zip(b.iter()) {
        if va < vb {
            return false;
        }
        if va > vb {
            strictly_better = true;
        }
    }
    strictly_better
}

/// Fast non-dominated sorting.
///
/// # Algorithm (Deb et al., 2002)
///
/// 1. For each pair, determine dominance; count dominators `n[p]` and
///    collect dominated sets `S[p]`
/// 2. Solutions with `n[p] == 0` form front 0
/// 3. For each member of the current front, decrement `n[q]` for every
///    `q ∈ S[p]`; those reaching zero form the next front
/// 4. Stop at the first empty front
///
/// # Complexity
///
/// O(n²) dominance tests for n solutions.
///
/// # Example
///
/// ```
/// use u_mowwo::pareto::{non_dominated_sort, Evaluation};
/// use u_mowwo::problem::Objectives;
///
/// let eval = |s: f64, c: f64, feasible: bool| Evaluation::new(
///     Objectives { satisfaction: s, cost_objective: c, cost: 0.0 },
///     feasible,
/// );
/// let pop = vec![
///     eval(0.9, 0.9, true),
///     eval(0.8, 0.95, true),
///     eval(0.5, 0.5, false),
///     eval(0.95, 0.85, true),
/// ];
///
/// let result = non_dominated_sort(&pop);
/// assert_eq!(result.fronts[0], vec![0, 1, 3]);
/// assert_eq!(result.ranks[2], 1);
/// ```
pub fn non_dominated_sort(evaluations: &[Evaluation]) -> NondominatedSortResult {
    let n = evaluations.len();
    if n == 0 {
        return NondominatedSortResult::default();
    }

    let mut domination_count = vec![0usize; n];
    let mut dominated: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut ranks = vec![0usize; n];

    for i in 0..n {
        for j in (i + 1)..n {
            if dominates(&evaluations[i], &evaluations[j]) {
                dominated[i].push(j);
                domination_count[j] += 1;
            } else if dominates(&evaluations[j], &evaluations[i]) {
                dominated[j].push(i);
                domination_count[i] += 1;
            }
        }
    }

    let front_0: Vec<usize> = (0..n).filter(|&i| domination_count[i] == 0).collect();
    debug_assert!(!front_0.is_empty(), "dominance must leave a non-dominated solution");

    let mut fronts = vec![front_0];
    loop {
        let mut next_front = Vec::new();
        if let Some(current) = fronts.last() {
            for &i in current {
                for &j in &dominated[i] {
                    domination_count[j] -= 1;
                    if domination_count[j] == 0 {
                        ranks[j] = fronts.len();
                        next_front.push(j);
                    }
                }
            }
        }

        if next_front.is_empty() {
            break;
        }
        fronts.push(next_front);
    }

    NondominatedSortResult { ranks, fronts }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(s: f64, c: f64, feasible: bool) -> Evaluation {
        Evaluation::new(
            Objectives {
                satisfaction: s,
                cost_objective: c,
                cost: 0.0,
            },
            feasible,
        )
    }

    // ---- Dominance ----

    #[test]
    fn test_dominates_maximization() {
        assert!(dominates(&eval(0.9, 0.9, true), &eval(0.8, 0.9, true)));
        assert!(!dominates(&eval(0.8, 0.9, true), &eval(0.9, 0.9, true)));
        assert!(!dominates(&eval(0.9, 0.8, true), &eval(0.8, 0.9, true)));
    }

    #[test]
    fn test_dominates_irreflexive() {
        let a = eval(0.7, 0.6, true);
        assert!(!dominates(&a, &a));
        let b = eval(0.7, 0.6, false);
        assert!(!dominates(&b, &b));
    }

    #[test]
    fn test_feasibility_primacy() {
        let feasible = eval(0.0, 0.5, true);
        let infeasible = eval(1.0, 1.0, false);
        assert!(dominates(&feasible, &infeasible));
        assert!(!dominates(&infeasible, &feasible));
    }

    #[test]
    fn test_infeasible_pair_uses_objectives() {
        assert!(dominates(&eval(0.6, 0.6, false), &eval(0.5, 0.6, false)));
    }

    // ---- Non-dominated sort ----

    #[test]
    fn test_empty() {
        let result = non_dominated_sort(&[]);
        assert!(result.ranks.is_empty());
        assert!(result.fronts.is_empty());
        assert!(result.first_front().is_empty());
        assert_eq!(result.max_rank(), 0);
    }

    #[test]
    fn test_single_solution() {
        let result = non_dominated_sort(&[eval(0.1, 0.2, true)]);
        assert_eq!(result.ranks, vec![0]);
        assert_eq!(result.fronts, vec![vec![0]]);
    }

    #[test]
    fn test_clear_dominance_chain() {
        let pop = vec![
            eval(0.3, 0.3, true),
            eval(0.9, 0.9, true), // dominates all
            eval(0.5, 0.5, true),
        ];
        let result = non_dominated_sort(&pop);
        assert_eq!(result.ranks, vec![2, 0, 1]);
        assert_eq!(result.fronts, vec![vec![1], vec![2], vec![0]]);
        assert_eq!(result.max_rank(), 2);
    }

    #[test]
    fn test_mixed_fronts() {
        let pop = vec![
            eval(0.5, 0.1, true), // front 0
            eval(0.3, 0.3, true), // front 0
            eval(0.1, 0.5, true), // front 0
            eval(0.2, 0.2, true), // dominated by [1] -> front 1
            eval(0.0, 0.0, true), // dominated by [3] -> front 2
        ];
        let result = non_dominated_sort(&pop);
        assert_eq!(result.ranks, vec![0, 0, 0, 1, 2]);
    }

    #[test]
    fn test_all_equal() {
        let pop = vec![eval(0.4, 0.4, true); 3];
        let result = non_dominated_sort(&pop);
        assert!(result.ranks.iter().all(|&r| r == 0));
        assert_eq!(result.fronts.len(), 1);
    }

    #[test]
    fn test_infeasible_ranked_behind() {
        let pop = vec![
            eval(0.9, 0.9, true),
            eval(0.8, 0.95, true),
            eval(0.5, 0.5, false),
            eval(0.95, 0.85, true),
        ];
        let result = non_dominated_sort(&pop);
        assert_eq!(result.first_front(), &[0, 1, 3]);
        assert_eq!(result.ranks[2], 1);
    }
}
