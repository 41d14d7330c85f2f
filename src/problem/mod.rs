//! Medical supply scheduling model.
//!
//! Civilian facilities (`m`) and military facilities (`n`) hold stocks of
//! `K` supply types, of which the first `K1` can be moved between
//! facilities. A plan ([`Solution`]) moves supplies and transfers patients
//! of four classes from civilian to military facilities. Two objectives are
//! optimized jointly:
//!
//! - **Supply satisfaction rate**: how well every facility's stock covers
//!   the consumption of the patients it serves, weighted by supply
//!   importance (maximize)
//! - **Scheduling cost**: cost of all supply flows and patient transfers
//!   (minimize; exposed as a maximized objective in `[0.5, 1]`)
//!
//! # Submodules
//!
//! - [`instance`]: validated instance data
//! - [`solution`]: decision variables
//! - [`objectives`]: objective evaluation
//! - [`constraints`]: constraints (18)–(30)
//! - [`repair`] / [`feasibility`]: pluggable constraint handling

pub mod constraints;
pub mod feasibility;
pub mod instance;
pub mod objectives;
pub mod repair;
pub mod solution;

pub use constraints::{validate_solution, violated_constraints, Constraint};
pub use feasibility::{AlwaysFeasible, ConstraintFeasibility, FeasibilityRule};
pub use instance::{Dimensions, InstanceData, PatientClass, ProblemInstance};
pub use objectives::{evaluate, scheduling_cost, supply_satisfaction_rate, Objectives};
pub use repair::{CapacityRepair, IdentityRepair, RepairStrategy};
pub use solution::Solution;

use crate::pareto::Evaluation;
use rand::Rng;

/// A problem instance bundled with its constraint-handling strategies.
///
/// The defaults, [`IdentityRepair`] and [`AlwaysFeasible`], leave
/// constraints unenforced during search. Swap in [`CapacityRepair`] and
/// [`ConstraintFeasibility`] to search within the constrained space:
///
/// ```
/// use u_mowwo::problem::{
///     CapacityRepair, ConstraintFeasibility, InstanceData, MedicalSupplyProblem,
///     ProblemInstance,
/// };
///
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
/// let instance = ProblemInstance::from_data(data()).unwrap();
/// let problem = MedicalSupplyProblem::new(instance)
///     .with_repair(CapacityRepair)
///     .with_feasibility(ConstraintFeasibility);
/// ```
#[derive(Debug, Clone)]
pub struct MedicalSupplyProblem<R = IdentityRepair, F = AlwaysFeasible> {
    instance: ProblemInstance,
    repair: R,
    feasibility: F,
}

impl MedicalSupplyProblem {
    /// Reference configuration: identity repair, everything feasible.
    pub fn new(instance: ProblemInstance) -> Self {
        Self {
            instance,
            repair: IdentityRepair,
            feasibility: AlwaysFeasible,
        }
    }
}

impl<R: RepairStrategy, F: FeasibilityRule> MedicalSupplyProblem<R, F> {
    /// Replaces the repair strategy.
    pub fn with_repair<R2: RepairStrategy>(self, repair: R2) -> MedicalSupplyProblem<R2, F> {
        MedicalSupplyProblem {
            instance: self.instance,
            repair,
            feasibility: self.feasibility,
        }
    }

    /// Replaces the feasibility rule.
    pub fn with_feasibility<F2: FeasibilityRule>(self, feasibility: F2) -> MedicalSupplyProblem<R, F2> {
        MedicalSupplyProblem {
            instance: self.instance,
            repair: self.repair,
            feasibility,
        }
    }

    pub fn instance(&self) -> &ProblemInstance {
        &self.instance
    }

    /// Objectives plus the feasibility flag of the configured rule.
    pub fn evaluate(&self, solution: &Solution) -> Evaluation {
        let objectives = objectives::evaluate(&self.instance, solution);
        let feasible = self
            .feasibility
            .is_feasible(&self.instance, solution, &objectives);
        Evaluation::new(objectives, feasible)
    }

    pub fn repair(&self, solution: Solution) -> Solution {
        self.repair.repair(&self.instance, solution)
    }

    /// A random plan with entries in `0..=max_value`.
    pub fn random_solution<G: Rng>(&self, max_value: u32, rng: &mut G) -> Solution {
        Solution::random(self.instance.dims(), max_value, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::instance::fixtures::uniform;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_marks_everything_feasible() {
        let problem = MedicalSupplyProblem::new(uniform(2, 2, 2, 1));
        let mut rng = StdRng::seed_from_u64(5);
        let sol = problem.random_solution(50, &mut rng);
        assert!(!validate_solution(problem.instance(), &sol));
        assert!(problem.evaluate(&sol).feasible);
        assert_eq!(problem.repair(sol.clone()), sol);
    }

    #[test]
    fn test_constraint_feasibility_wired() {
        let problem =
            MedicalSupplyProblem::new(uniform(2, 2, 2, 1)).with_feasibility(ConstraintFeasibility);
        let zeros = Solution::zeros(problem.instance().dims());
        assert!(problem.evaluate(&zeros).feasible);

        let mut rng = StdRng::seed_from_u64(5);
        let sol = problem.random_solution(50, &mut rng);
        assert!(!problem.evaluate(&sol).feasible);
    }

    #[test]
    fn test_capacity_repair_wired() {
        let problem = MedicalSupplyProblem::new(uniform(2, 2, 2, 1)).with_repair(CapacityRepair);
        let mut rng = StdRng::seed_from_u64(5);
        let sol = problem.random_solution(50, &mut rng);
        let repaired = problem.repair(sol.clone());
        assert_ne!(repaired, sol);
        let violated = violated_constraints(problem.instance(), &repaired);
        assert!(violated
            .iter()
            .all(|c| matches!(c, Constraint::SatisfactionFloor | Constraint::CostCap)));
    }
}
