//! Feasibility rules used to flag evaluated solutions.
//!
//! Feasibility is lexicographically primary in dominance, so the rule
//! chosen here changes which plans can enter the Pareto front.

use super::constraints::validate_evaluated;
use super::instance::ProblemInstance;
use super::objectives::Objectives;
use super::solution::Solution;

/// Decides whether an evaluated solution counts as feasible.
pub trait FeasibilityRule: Send + Sync {
    fn is_feasible(
        &self,
        instance: &ProblemInstance,
        solution: &Solution,
        objectives: &Objectives,
    ) -> bool;
}

/// Every solution is feasible; ranking is purely on objectives.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysFeasible;

impl FeasibilityRule for AlwaysFeasible {
    fn is_feasible(&self, _: &ProblemInstance, _: &Solution, _: &Objectives) -> bool {
        true
    }
}

/// Feasible iff constraints (18)–(30) all hold.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstraintFeasibility;

impl FeasibilityRule for ConstraintFeasibility {
    fn is_feasible(
        &self,
        instance: &ProblemInstance,
        solution: &Solution,
        objectives: &Objectives,
    ) -> bool {
        validate_evaluated(instance, solution, objectives)
    }
}
