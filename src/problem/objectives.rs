//! Objective functions: supply satisfaction rate and scheduling cost.
//!
//! Both objectives are pure functions of a [`Solution`] and a
//! [`ProblemInstance`]. The combined [`evaluate`] maps them onto a
//! maximize-both pair in `[0, 1]`.

use super::instance::{PatientClass, ProblemInstance};
use super::solution::Solution;
use ndarray::{Array2, Axis, Zip};

/// Objective values of one solution.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Objectives {
    /// Weighted supply satisfaction rate in `[0, 1]`. Higher is better.
    pub satisfaction: f64,
    /// `1 - min(cost, C) / (2C)`, in `[0.5, 1]`. Higher is better.
    pub cost_objective: f64,
    /// Raw scheduling cost (unbounded, non-negative).
    pub cost: f64,
}

impl Objectives {
    /// The maximized pair `[satisfaction, cost_objective]`.
    pub fn as_array(&self) -> [f64; 2] {
        [self.satisfaction, self.cost_objective]
    }
}

/// Evaluates both objectives.
pub fn evaluate(instance: &ProblemInstance, solution: &Solution) -> Objectives {
    let satisfaction = supply_satisfaction_rate(instance, solution);
    let cost = scheduling_cost(instance, solution);
    Objectives {
        satisfaction,
        cost_objective: cost_objective(cost, instance.cost_cap()),
        cost,
    }
}

/// Maps a raw cost onto `[0.5, 1]`; lower cost gives a higher value.
pub fn cost_objective(cost: f64, cap: f64) -> f64 {
    1.0 - cost.min(cap) / (2.0 * cap)
}

/// Per-facility, per-supply satisfaction scores, each in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SatisfactionScores {
    /// Civilian scores, m×K.
    pub civilian: Array2<f64>,
    /// Military scores, n×K.
    pub military: Array2<f64>,
}

/// Scores every (facility, supply type) pair.
///
/// Civilian facilities serve the patients they keep (their population minus
/// outbound transfers); military facilities serve the patients they receive.
/// The score is `min(available / required, 1)`, or 1 when the requirement is
/// not positive.
pub fn satisfaction_scores(instance: &ProblemInstance, solution: &Solution) -> SatisfactionScores {
    let dims = instance.dims();

    let residual: [Vec<f64>; 4] = PatientClass::ALL.map(|c| {
        let y = solution.transfers(c);
        (0..dims.m)
            .map(|i| instance.civilian_patients(c)[i] - row_sum(y, i))
            .collect()
    });
    let civilian = Array2::from_shape_fn((dims.m, dims.k), |(i, k)| {
        let required = requirement(instance, k, |c| residual[c.index()][i]);
        let mut available = instance.civilian_stock()[[i, k]];
        if k < dims.k1 {
            available += (0..dims.n)
                .map(|j| solution.xijk()[[i, j, k]] as f64)
                .sum::<f64>();
        }
        score(available, required)
    });

    let inbound: [Vec<f64>; 4] = PatientClass::ALL.map(|c| {
        let y = solution.transfers(c);
        (0..dims.n).map(|j| col_sum(y, j)).collect()
    });
    let military = Array2::from_shape_fn((dims.n, dims.k), |(j, k)| {
        let required = requirement(instance, k, |c| inbound[c.index()][j]);
        let mut available = instance.military_stock()[[j, k]];
        if k < dims.k1 {
            available += (0..dims.m)
                .map(|i| solution.xijk()[[i, j, k]] as f64)
                .sum::<f64>();
            available += (0..dims.n)
                .map(|jp| solution.xjjk()[[j, jp, k]] as f64)
                .sum::<f64>();
        }
        score(available, required)
    });

    SatisfactionScores { civilian, military }
}

/// Weighted average of all [`satisfaction_scores`]: `Σ wk·score / Σ wk`
/// over every facility and supply type. Returns 0 when the total weight
/// is 0.
pub fn supply_satisfaction_rate(instance: &ProblemInstance, solution: &Solution) -> f64 {
    let scores = satisfaction_scores(instance, solution);
    let weights = instance.weights();
    let weighted = |rows: &Array2<f64>| -> f64 { rows.dot(weights).sum() };

    let facilities = (scores.civilian.nrows() + scores.military.nrows()) as f64;
    let total_weight = facilities * weights.sum();
    if total_weight > 0.0 {
        (weighted(&scores.civilian) + weighted(&scores.military)) / total_weight
    } else {
        0.0
    }
}

/// Total cost of supply flows and patient transfers.
pub fn scheduling_cost(instance: &ProblemInstance, solution: &Solution) -> f64 {
    let mut cost = weighted_sum(instance.civilian_supply_cost(), solution.xijk());
    cost += weighted_sum(instance.military_supply_cost(), solution.xjjk());
    for class in PatientClass::ALL {
        cost += weighted_sum(instance.transfer_cost(class), solution.transfers(class));
    }
    cost
}

/// Supply `k` consumed by a patient mix: `Σ_class count(class) · rate_class[k]`.
pub(crate) fn requirement(
    instance: &ProblemInstance,
    k: usize,
    count: impl Fn(PatientClass) -> f64,
) -> f64 {
    PatientClass::ALL
        .iter()
        .map(|&c| count(c) * instance.rates(c)[k])
        .sum()
}

fn score(available: f64, required: f64) -> f64 {
    if required > 0.0 {
        (available / required).min(1.0)
    } else {
        1.0
    }
}

pub(crate) fn row_sum(y: &Array2<u32>, i: usize) -> f64 {
    y.index_axis(Axis(0), i).iter().map(|&v| v as f64).sum()
}

pub(crate) fn col_sum(y: &Array2<u32>, j: usize) -> f64 {
    y.index_axis(Axis(1), j).iter().map(|&v| v as f64).sum()
}

fn weighted_sum<D: ndarray::Dimension>(
    cost: &ndarray::Array<f64, D>,
    amount: &ndarray::Array<u32, D>,
) -> f64 {
    let mut sum = 0.0;
    Zip::from(cost).and(amount).for_each(|&c, &x| sum += c * x as f64);
    sum
}
