//! Feasibility constraints (18)–(30).
//!
//! Each constraint is an independent predicate over the instance and a
//! solution. [`validate_solution`] is their conjunction and
//! [`violated_constraints`] lists the ones that fail, for post-hoc
//! reporting.
//!
//! Military facilities `0..n_open` are *open*, the rest *closed*. The
//! supply reserve of a facility is reduced by its `xijk` flows and by its
//! `xjjk` flows toward the other group.

use super::instance::{PatientClass, ProblemInstance};
use super::objectives::{col_sum, evaluate, requirement, row_sum, Objectives};
use super::solution::Solution;
use std::fmt;

/// One of the thirteen model constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constraint {
    /// (18) Open military facilities keep their reserve of non-fixed supplies.
    OpenReserve,
    /// (19) Closed military facilities keep their reserve of non-fixed supplies.
    ClosedReserve,
    /// (20) Fixed supplies at open facilities cover received patients and
    /// the reserve.
    FixedSupplyReserve,
    /// (21)–(24) Military intake capacity per patient class.
    MilitaryIntake(PatientClass),
    /// (25)–(28) Civilian outflow limit per patient class.
    CivilianOutflow(PatientClass),
    /// (29) Satisfaction rate reaches the floor `S`.
    SatisfactionFloor,
    /// (30) Scheduling cost stays within the cap `C`.
    CostCap,
}

impl Constraint {
    /// All constraints, in model order.
    pub const ALL: [Constraint; 13] = [
        Constraint::OpenReserve,
        Constraint::ClosedReserve,
        Constraint::FixedSupplyReserve,
        Constraint::MilitaryIntake(PatientClass::Normal),
        Constraint::MilitaryIntake(PatientClass::Suspected),
        Constraint::MilitaryIntake(PatientClass::Mild),
        Constraint::MilitaryIntake(PatientClass::Severe),
        Constraint::CivilianOutflow(PatientClass::Normal),
        Constraint::CivilianOutflow(PatientClass::Suspected),
        Constraint::CivilianOutflow(PatientClass::Mild),
        Constraint::CivilianOutflow(PatientClass::Severe),
        Constraint::SatisfactionFloor,
        Constraint::CostCap,
    ];

    /// Equation number in the model (18–30).
    pub fn number(self) -> u8 {
        match self {
            Constraint::OpenReserve => 18,
            Constraint::ClosedReserve => 19,
            Constraint::FixedSupplyReserve => 20,
            Constraint::MilitaryIntake(c) => 21 + c.index() as u8,
            Constraint::CivilianOutflow(c) => 25 + c.index() as u8,
            Constraint::SatisfactionFloor => 29,
            Constraint::CostCap => 30,
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "constraint ({})", self.number())
    }
}

/// Checks a single constraint.
///
/// `objectives` must be the evaluation of `solution`; it is only consulted
/// by (29) and (30).
pub fn check(
    constraint: Constraint,
    instance: &ProblemInstance,
    solution: &Solution,
    objectives: &Objectives,
) -> bool {
    match constraint {
        Constraint::OpenReserve => open_reserve(instance, solution),
        Constraint::ClosedReserve => closed_reserve(instance, solution),
        Constraint::FixedSupplyReserve => fixed_supply_reserve(instance, solution),
        Constraint::MilitaryIntake(c) => military_intake(instance, solution, c),
        Constraint::CivilianOutflow(c) => civilian_outflow(instance, solution, c),
        Constraint::SatisfactionFloor => satisfaction_floor(instance, objectives.satisfaction),
        Constraint::CostCap => cost_cap(instance, objectives.cost),
    }
}

/// Whether every constraint (18)–(30) holds.
pub fn validate_solution(instance: &ProblemInstance, solution: &Solution) -> bool {
    validate_evaluated(instance, solution, &evaluate(instance, solution))
}

/// [`validate_solution`] with the objectives already computed.
pub fn validate_evaluated(
    instance: &ProblemInstance,
    solution: &Solution,
    objectives: &Objectives,
) -> bool {
    Constraint::ALL
        .iter()
        .all(|&c| check(c, instance, solution, objectives))
}

/// The constraints `solution` violates, in model order.
pub fn violated_constraints(instance: &ProblemInstance, solution: &Solution) -> Vec<Constraint> {
    let objectives = evaluate(instance, solution);
    Constraint::ALL
        .iter()
        .copied()
        .filter(|&c| !check(c, instance, solution, &objectives))
        .collect()
}

/// (18) `ajk − Σ_i xijk − Σ_{j' closed} xjjk ≥ bjk` for open `j`, `k < K1`.
pub fn open_reserve(instance: &ProblemInstance, solution: &Solution) -> bool {
    (0..instance.n_open()).all(|j| reserve_holds(instance, solution, j))
}

/// (19) `ajk − Σ_i xijk − Σ_{j' open} xjjk ≥ bjk` for closed `j`, `k < K1`.
pub fn closed_reserve(instance: &ProblemInstance, solution: &Solution) -> bool {
    (instance.n_open()..instance.dims().n).all(|j| reserve_holds(instance, solution, j))
}

/// (20) `ajk − Σ_class Σ_i y[i][j]·rate[k] ≥ bjk` for open `j`, `k ≥ K1`.
pub fn fixed_supply_reserve(instance: &ProblemInstance, solution: &Solution) -> bool {
    let dims = instance.dims();
    (0..instance.n_open()).all(|j| (dims.k1..dims.k).all(|k| fixed_slack(instance, solution, j, k) >= 0.0))
}

/// (21)–(24) `Σ_i y[i][j] ≤ capacity[j]` for every military `j`.
pub fn military_intake(instance: &ProblemInstance, solution: &Solution, class: PatientClass) -> bool {
    let y = solution.transfers(class);
    let capacity = instance.military_capacity(class);
    (0..instance.dims().n).all(|j| col_sum(y, j) <= capacity[j])
}

/// (25)–(28) `Σ_j y[i][j] ≤ patients[i]` for every civilian `i`.
pub fn civilian_outflow(instance: &ProblemInstance, solution: &Solution, class: PatientClass) -> bool {
    let y = solution.transfers(class);
    let patients = instance.civilian_patients(class);
    (0..instance.dims().m).all(|i| row_sum(y, i) <= patients[i])
}

/// (29) Satisfaction rate `≥ S`.
pub fn satisfaction_floor(instance: &ProblemInstance, satisfaction: f64) -> bool {
    satisfaction >= instance.satisfaction_floor()
}

/// (30) Raw scheduling cost `≤ C`.
pub fn cost_cap(instance: &ProblemInstance, cost: f64) -> bool {
    cost <= instance.cost_cap()
}

fn reserve_holds(instance: &ProblemInstance, solution: &Solution, j: usize) -> bool {
    (0..instance.dims().k1).all(|k| reserve_slack(instance, solution, j, k) >= 0.0)
}

/// Supply flows counted against military facility `j`'s reserve of `k`.
pub(crate) fn reserve_outflow(instance: &ProblemInstance, solution: &Solution, j: usize, k: usize) -> f64 {
    let dims = instance.dims();
    let to_civilian: f64 = (0..dims.m).map(|i| solution.xijk()[[i, j, k]] as f64).sum();
    let across_groups: f64 = (0..dims.n)
        .filter(|&jp| instance.is_open(jp) != instance.is_open(j))
        .map(|jp| solution.xjjk()[[j, jp, k]] as f64)
        .sum();
    to_civilian + across_groups
}

/// `ajk − outflow − bjk` for a non-fixed `k`; negative means violated.
pub(crate) fn reserve_slack(instance: &ProblemInstance, solution: &Solution, j: usize, k: usize) -> f64 {
    instance.military_stock()[[j, k]] - reserve_outflow(instance, solution, j, k) - instance.reserve()[[j, k]]
}

/// `ajk − consumption − bjk` for a fixed `k`; negative means violated.
pub(crate) fn fixed_slack(instance: &ProblemInstance, solution: &Solution, j: usize, k: usize) -> f64 {
    let consumption = requirement(instance, k, |c| col_sum(solution.transfers(c), j));
    instance.military_stock()[[j, k]] - consumption - instance.reserve()[[j, k]]
}
