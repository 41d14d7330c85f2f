//! Repair strategies applied after every mutation.
//!
//! A repair takes a possibly infeasible plan and returns one that respects
//! the model's constraints as far as the strategy can establish them, while
//! keeping as much of the mutated plan as possible.
//!
//! - [`IdentityRepair`]: returns the plan unchanged (the default)
//! - [`CapacityRepair`]: lowers transfers and supply flows until
//!   constraints (18)–(28) hold

use super::constraints::{fixed_slack, reserve_slack};
use super::instance::{PatientClass, ProblemInstance};
use super::solution::Solution;
use ndarray::ArrayViewMut1;

/// Turns a possibly infeasible plan into a repaired one.
pub trait RepairStrategy: Send + Sync {
    fn repair(&self, instance: &ProblemInstance, solution: Solution) -> Solution;
}

/// Leaves the plan untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityRepair;

impl RepairStrategy for IdentityRepair {
    fn repair(&self, _instance: &ProblemInstance, solution: Solution) -> Solution {
        solution
    }
}

/// Enforces the capacity and reserve constraints by decreasing entries.
///
/// Passes, in order:
///
/// 1. Civilian outflows, `Σ_j y[i][j] ≤ patients[i]` (25)–(28)
/// 2. Military intakes, `Σ_i y[i][j] ≤ capacity[j]` (21)–(24)
/// 3. Non-fixed supply reserves (18)/(19): cross-group `xjjk` flows are
///    drained before `xijk` flows
/// 4. Fixed supply reserves at open facilities (20): one patient at a time
///    is removed from the inbound transfer with the highest consumption
///    rate of the short supply
///
/// Entries only ever decrease, so a later pass never undoes an earlier one.
/// When a reserve floor exceeds the stock itself (`bjk > ajk`) the pass
/// drains every flow it can and the constraint stays violated. The global
/// constraints (29) and (30) are not repaired.
#[derive(Debug, Clone, Copy, Default)]
pub struct CapacityRepair;

impl RepairStrategy for CapacityRepair {
    fn repair(&self, instance: &ProblemInstance, mut solution: Solution) -> Solution {
        limit_transfers(instance, &mut solution);
        restore_supply_reserves(instance, &mut solution);
        restore_fixed_reserves(instance, &mut solution);
        solution
    }
}

fn limit_transfers(instance: &ProblemInstance, solution: &mut Solution) {
    let dims = instance.dims();
    for class in PatientClass::ALL {
        let patients = instance.civilian_patients(class);
        let capacity = instance.military_capacity(class);
        let y = solution.transfers_mut(class);
        for i in 0..dims.m {
            drain(y.row_mut(i), whole_units(patients[i]));
        }
        for j in 0..dims.n {
            drain(y.column_mut(j), whole_units(capacity[j]));
        }
    }
}

fn restore_supply_reserves(instance: &ProblemInstance, solution: &mut Solution) {
    let dims = instance.dims();
    for j in 0..dims.n {
        for k in 0..dims.k1 {
            let slack = reserve_slack(instance, solution, j, k);
            if slack >= 0.0 {
                continue;
            }
            let mut excess = (-slack).ceil() as u64;
            for jp in (0..dims.n).rev() {
                if instance.is_open(jp) != instance.is_open(j) {
                    take(&mut solution.xjjk_mut()[[j, jp, k]], &mut excess);
                }
            }
            for i in (0..dims.m).rev() {
                take(&mut solution.xijk_mut()[[i, j, k]], &mut excess);
            }
        }
    }
}

fn restore_fixed_reserves(instance: &ProblemInstance, solution: &mut Solution) {
    let dims = instance.dims();
    for j in 0..instance.n_open() {
        for k in dims.k1..dims.k {
            while fixed_slack(instance, solution, j, k) < 0.0 {
                let heaviest = PatientClass::ALL
                    .iter()
                    .filter(|&&c| instance.rates(c)[k] > 0.0)
                    .flat_map(|&c| (0..dims.m).map(move |i| (c, i)))
                    .filter(|&(c, i)| solution.transfers(c)[[i, j]] > 0)
                    .max_by(|&(a, ia), &(b, ib)| {
                        instance.rates(a)[k]
                            .total_cmp(&instance.rates(b)[k])
                            .then(solution.transfers(a)[[ia, j]].cmp(&solution.transfers(b)[[ib, j]]))
                    });
                match heaviest {
                    Some((c, i)) => solution.transfers_mut(c)[[i, j]] -= 1,
                    None => break,
                }
            }
        }
    }
}

/// Largest whole number of units within a (possibly fractional) limit.
fn whole_units(limit: f64) -> u64 {
    limit.max(0.0).floor() as u64
}

/// Lowers entries of `lane`, last first, until its sum is at most `limit`.
fn drain(mut lane: ArrayViewMut1<'_, u32>, limit: u64) {
    let total: u64 = lane.iter().map(|&v| v as u64).sum();
    let mut excess = total.saturating_sub(limit);
    for slot in lane.iter_mut().rev() {
        if excess == 0 {
            break;
        }
        take(slot, &mut excess);
    }
}

fn take(slot: &mut u32, excess: &mut u64) {
    let d = (*slot as u64).min(*excess);
    *slot -= d as u32;
    *excess -= d;
}
