//! Decision variables of a scheduling plan.

use super::instance::{Dimensions, PatientClass};
use crate::error::InstanceError;
use ndarray::{Array2, Array3};
use rand::Rng;

/// A candidate plan: supply flows and patient transfers, all non-negative
/// integers.
///
/// - `xijk` (m×n×K1): non-fixed supplies between civilian facility `i` and
///   military facility `j`
/// - `xjjk` (n×n×K1): non-fixed supplies between military facilities
/// - `y[class]` (m×n): patients of each class moved from civilian `i` to
///   military `j` (`yo`, `ys`, `ym`, `yv`)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    xijk: Array3<u32>,
    xjjk: Array3<u32>,
    transfers: [Array2<u32>; 4],
}

impl Solution {
    /// The empty plan: nothing moves.
    pub fn zeros(dims: Dimensions) -> Self {
        let t = dims.transfer_shape();
        Self {
            xijk: Array3::zeros(dims.supply_flow_shape()),
            xjjk: Array3::zeros(dims.military_flow_shape()),
            transfers: [
                Array2::zeros(t),
                Array2::zeros(t),
                Array2::zeros(t),
                Array2::zeros(t),
            ],
        }
    }

    /// Draws every entry uniformly from `0..=max_value`.
    ///
    /// This is a seed for the search, not a feasible plan: no constraint is
    /// consulted.
    pub fn random<R: Rng>(dims: Dimensions, max_value: u32, rng: &mut R) -> Self {
        let mut solution = Self::zeros(dims);
        for mut array in solution.genes_mut() {
            array.map_inplace(|v| *v = rng.random_range(0..=max_value));
        }
        solution
    }

    /// Assembles a plan from explicit arrays, checking their shapes.
    ///
    /// `transfers` is ordered as [`PatientClass::ALL`].
    pub fn from_arrays(
        dims: Dimensions,
        xijk: Array3<u32>,
        xjjk: Array3<u32>,
        transfers: [Array2<u32>; 4],
    ) -> Result<Self, InstanceError> {
        check_shape("xijk", xijk.shape(), &[dims.m, dims.n, dims.k1])?;
        check_shape("xjjk", xjjk.shape(), &[dims.n, dims.n, dims.k1])?;
        let (m, n) = dims.transfer_shape();
        for (class, y) in PatientClass::ALL.iter().zip(&transfers) {
            check_shape(transfer_name(*class), y.shape(), &[m, n])?;
        }
        Ok(Self {
            xijk,
            xjjk,
            transfers,
        })
    }

    pub fn xijk(&self) -> &Array3<u32> {
        &self.xijk
    }

    pub fn xijk_mut(&mut self) -> &mut Array3<u32> {
        &mut self.xijk
    }

    pub fn xjjk(&self) -> &Array3<u32> {
        &self.xjjk
    }

    pub fn xjjk_mut(&mut self) -> &mut Array3<u32> {
        &mut self.xjjk
    }

    /// Transfer matrix of one patient class (`yo`, `ys`, `ym`, `yv`).
    pub fn transfers(&self, class: PatientClass) -> &Array2<u32> {
        &self.transfers[class.index()]
    }

    pub fn transfers_mut(&mut self, class: PatientClass) -> &mut Array2<u32> {
        &mut self.transfers[class.index()]
    }

    /// The six decision arrays, flattened to dynamic dimension views:
    /// `xijk`, `xjjk`, `yo`, `ys`, `ym`, `yv`.
    pub fn genes_mut(&mut self) -> [ndarray::ArrayViewMutD<'_, u32>; 6] {
        let [yo, ys, ym, yv] = &mut self.transfers;
        [
            self.xijk.view_mut().into_dyn(),
            self.xjjk.view_mut().into_dyn(),
            yo.view_mut().into_dyn(),
            ys.view_mut().into_dyn(),
            ym.view_mut().into_dyn(),
            yv.view_mut().into_dyn(),
        ]
    }

    /// Total number of decision variables.
    pub fn len(&self) -> usize {
        self.xijk.len() + self.xjjk.len() + self.transfers.iter().map(|y| y.len()).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn transfer_name(class: PatientClass) -> &'static str {
    match class {
        PatientClass::Normal => "yo",
        PatientClass::Suspected => "ys",
        PatientClass::Mild => "ym",
        PatientClass::Severe => "yv",
    }
}

fn check_shape(field: &'static str, actual: &[usize], expected: &[usize]) -> Result<(), InstanceError> {
    if actual == expected {
        Ok(())
    } else {
        Err(InstanceError::ShapeMismatch {
            field,
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        })
    }
}
