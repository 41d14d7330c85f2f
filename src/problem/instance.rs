//! Problem instance: facilities, supplies, stocks, costs and patient counts.
//!
//! Raw data arrives as [`InstanceData`] (nested `Vec`s, the shape a tabular
//! or JSON reader naturally produces) and is converted once into a
//! [`ProblemInstance`] whose tensors are fixed-shape `ndarray` arrays. Every
//! shape is checked against the declared dimensions `(m, n, K, K1)` during
//! that conversion, so the rest of the crate can index without checks.

use crate::error::InstanceError;
use ndarray::{Array1, Array2, Array3};

/// Patient classes distinguished by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PatientClass {
    /// Ordinary residents (`o`).
    Normal,
    /// Suspected cases (`s`).
    Suspected,
    /// Mild cases (`m`).
    Mild,
    /// Severe cases (`v`).
    Severe,
}

impl PatientClass {
    /// All classes in storage order.
    pub const ALL: [PatientClass; 4] = [
        PatientClass::Normal,
        PatientClass::Suspected,
        PatientClass::Mild,
        PatientClass::Severe,
    ];

    /// Position of this class in per-class arrays.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Problem dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimensions {
    /// Civilian facility count.
    pub m: usize,
    /// Military facility count.
    pub n: usize,
    /// Supply types overall.
    pub k: usize,
    /// Non-fixed (transferable) supply types; types `0..k1`.
    pub k1: usize,
}

impl Dimensions {
    /// Fixed supply types; types `k1..k`.
    pub fn k2(&self) -> usize {
        self.k - self.k1
    }

    /// Shape of `xijk` and `cijk`.
    pub fn supply_flow_shape(&self) -> (usize, usize, usize) {
        (self.m, self.n, self.k1)
    }

    /// Shape of `xjjk` and `cjjk`.
    pub fn military_flow_shape(&self) -> (usize, usize, usize) {
        (self.n, self.n, self.k1)
    }

    /// Shape of the patient transfer matrices and their costs.
    pub fn transfer_shape(&self) -> (usize, usize) {
        (self.m, self.n)
    }
}

/// Raw instance data, before shape validation.
///
/// Field names follow the model notation; with the `serde` feature the
/// serialized keys are exactly `m, n, K, K1, K2, wk, ro, …, C, S`.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstanceData {
    pub m: usize,
    pub n: usize,
    #[cfg_attr(feature = "serde", serde(rename = "K"))]
    pub k: usize,
    #[cfg_attr(feature = "serde", serde(rename = "K1"))]
    pub k1: usize,
    /// Optional; checked against `K - K1` when present.
    #[cfg_attr(feature = "serde", serde(rename = "K2", default))]
    pub k2: Option<usize>,
    /// Number of open military facilities (`0..n_open`); defaults to `n`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub n_open: Option<usize>,

    pub wk: Vec<f64>,
    pub ro: Vec<f64>,
    pub rs: Vec<f64>,
    pub rm: Vec<f64>,
    pub rv: Vec<f64>,

    pub aik: Vec<Vec<f64>>,
    pub ajk: Vec<Vec<f64>>,
    pub cijk: Vec<Vec<Vec<f64>>>,
    pub cjjk: Vec<Vec<Vec<f64>>>,
    pub coij: Vec<Vec<f64>>,
    pub csij: Vec<Vec<f64>>,
    pub cmij: Vec<Vec<f64>>,
    pub cvij: Vec<Vec<f64>>,
    pub bjk: Vec<Vec<f64>>,

    pub no_i: Vec<f64>,
    pub ns_i: Vec<f64>,
    pub nm_i: Vec<f64>,
    pub nv_i: Vec<f64>,
    pub no_j: Vec<f64>,
    pub ns_j: Vec<f64>,
    pub nm_j: Vec<f64>,
    pub nv_j: Vec<f64>,

    #[cfg_attr(feature = "serde", serde(rename = "C"))]
    pub c: f64,
    #[cfg_attr(feature = "serde", serde(rename = "S"))]
    pub s: f64,
}

/// A validated, immutable problem instance.
///
/// Per-class quantities are stored as `[T; 4]` indexed by
/// [`PatientClass::index`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ProblemInstance {
    dims: Dimensions,
    n_open: usize,
    weights: Array1<f64>,
    rates: [Array1<f64>; 4],
    civilian_stock: Array2<f64>,
    military_stock: Array2<f64>,
    civilian_supply_cost: Array3<f64>,
    military_supply_cost: Array3<f64>,
    transfer_cost: [Array2<f64>; 4],
    reserve: Array2<f64>,
    civilian_patients: [Array1<f64>; 4],
    military_capacity: [Array1<f64>; 4],
    cost_cap: f64,
    satisfaction_floor: f64,
}

impl ProblemInstance {
    /// Builds an instance, checking every tensor against `(m, n, K, K1)`.
    ///
    /// # Errors
    ///
    /// Returns an [`InstanceError`] on any shape mismatch, on `K1 > K`, on
    /// an inconsistent `K2`, on `n_open > n`, or on a cost cap that is not
    /// positive and finite.
    pub fn from_data(data: InstanceData) -> Result<Self, InstanceError> {
        let dims = Dimensions {
            m: data.m,
            n: data.n,
            k: data.k,
            k1: data.k1,
        };
        if dims.k1 > dims.k {
            return Err(InstanceError::NonFixedExceedsTotal {
                k1: dims.k1,
                k: dims.k,
            });
        }
        if let Some(k2) = data.k2 {
            if k2 != dims.k2() {
                return Err(InstanceError::FixedCountMismatch {
                    k2,
                    expected: dims.k2(),
                });
            }
        }
        let n_open = data.n_open.unwrap_or(dims.n);
        if n_open > dims.n {
            return Err(InstanceError::OpenExceedsMilitary { n_open, n: dims.n });
        }
        if !(data.c.is_finite() && data.c > 0.0) {
            return Err(InstanceError::InvalidCostCap(data.c));
        }

        let Dimensions { m, n, k, k1 } = dims;
        Ok(Self {
            dims,
            n_open,
            weights: vector("wk", data.wk, k)?,
            rates: [
                vector("ro", data.ro, k)?,
                vector("rs", data.rs, k)?,
                vector("rm", data.rm, k)?,
                vector("rv", data.rv, k)?,
            ],
            civilian_stock: matrix("aik", data.aik, (m, k))?,
            military_stock: matrix("ajk", data.ajk, (n, k))?,
            civilian_supply_cost: tensor("cijk", data.cijk, (m, n, k1))?,
            military_supply_cost: tensor("cjjk", data.cjjk, (n, n, k1))?,
            transfer_cost: [
                matrix("coij", data.coij, (m, n))?,
                matrix("csij", data.csij, (m, n))?,
                matrix("cmij", data.cmij, (m, n))?,
                matrix("cvij", data.cvij, (m, n))?,
            ],
            reserve: matrix("bjk", data.bjk, (n, k))?,
            civilian_patients: [
                vector("no_i", data.no_i, m)?,
                vector("ns_i", data.ns_i, m)?,
                vector("nm_i", data.nm_i, m)?,
                vector("nv_i", data.nv_i, m)?,
            ],
            military_capacity: [
                vector("no_j", data.no_j, n)?,
                vector("ns_j", data.ns_j, n)?,
                vector("nm_j", data.nm_j, n)?,
                vector("nv_j", data.nv_j, n)?,
            ],
            cost_cap: data.c,
            satisfaction_floor: data.s,
        })
    }

    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    /// Number of open military facilities; indices `0..n_open` are open.
    pub fn n_open(&self) -> usize {
        self.n_open
    }

    pub fn is_open(&self, j: usize) -> bool {
        j < self.n_open
    }

    /// Importance weight per supply type (`wk`).
    pub fn weights(&self) -> &Array1<f64> {
        &self.weights
    }

    /// Consumption rate per supply type for one patient class (`ro`…`rv`).
    pub fn rates(&self, class: PatientClass) -> &Array1<f64> {
        &self.rates[class.index()]
    }

    /// Civilian on-hand stock `aik`, m×K.
    pub fn civilian_stock(&self) -> &Array2<f64> {
        &self.civilian_stock
    }

    /// Military on-hand stock `ajk`, n×K.
    pub fn military_stock(&self) -> &Array2<f64> {
        &self.military_stock
    }

    /// Civilian/military supply cost `cijk`, m×n×K1.
    pub fn civilian_supply_cost(&self) -> &Array3<f64> {
        &self.civilian_supply_cost
    }

    /// Military/military supply cost `cjjk`, n×n×K1.
    pub fn military_supply_cost(&self) -> &Array3<f64> {
        &self.military_supply_cost
    }

    /// Per-patient transfer cost for one class (`coij`…`cvij`), m×n.
    pub fn transfer_cost(&self, class: PatientClass) -> &Array2<f64> {
        &self.transfer_cost[class.index()]
    }

    /// Reserve floor `bjk`, n×K.
    pub fn reserve(&self) -> &Array2<f64> {
        &self.reserve
    }

    /// Patients of one class at each civilian facility (`no_i`…`nv_i`).
    pub fn civilian_patients(&self, class: PatientClass) -> &Array1<f64> {
        &self.civilian_patients[class.index()]
    }

    /// Intake capacity of one class at each military facility (`no_j`…`nv_j`).
    pub fn military_capacity(&self, class: PatientClass) -> &Array1<f64> {
        &self.military_capacity[class.index()]
    }

    /// Cost cap `C`.
    pub fn cost_cap(&self) -> f64 {
        self.cost_cap
    }

    /// Satisfaction-rate floor `S`.
    pub fn satisfaction_floor(&self) -> f64 {
        self.satisfaction_floor
    }
}

impl TryFrom<InstanceData> for ProblemInstance {
    type Error = InstanceError;

    fn try_from(data: InstanceData) -> Result<Self, Self::Error> {
        Self::from_data(data)
    }
}

fn mismatch(field: &'static str, expected: &[usize], actual: Vec<usize>) -> InstanceError {
    InstanceError::ShapeMismatch {
        field,
        expected: expected.to_vec(),
        actual,
    }
}

fn vector(field: &'static str, data: Vec<f64>, len: usize) -> Result<Array1<f64>, InstanceError> {
    if data.len() != len {
        return Err(mismatch(field, &[len], vec![data.len()]));
    }
    Ok(Array1::from(data))
}

fn matrix(
    field: &'static str,
    rows: Vec<Vec<f64>>,
    (r, c): (usize, usize),
) -> Result<Array2<f64>, InstanceError> {
    let expected = [r, c];
    if rows.len() != r {
        return Err(mismatch(field, &expected, vec![rows.len()]));
    }
    if let Some(row) = rows.iter().find(|row| row.len() != c) {
        return Err(mismatch(field, &expected, vec![r, row.len()]));
    }
    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((r, c), flat).map_err(|_| mismatch(field, &expected, vec![r, c]))
}

fn tensor(
    field: &'static str,
    planes: Vec<Vec<Vec<f64>>>,
    (a, b, c): (usize, usize, usize),
) -> Result<Array3<f64>, InstanceError> {
    let expected = [a, b, c];
    if planes.len() != a {
        return Err(mismatch(field, &expected, vec![planes.len()]));
    }
    for plane in &planes {
        if plane.len() != b {
            return Err(mismatch(field, &expected, vec![a, plane.len()]));
        }
        if let Some(row) = plane.iter().find(|row| row.len() != c) {
            return Err(mismatch(field, &expected, vec![a, b, row.len()]));
        }
    }
    let flat: Vec<f64> = planes.into_iter().flatten().flatten().collect();
    Array3::from_shape_vec((a, b, c), flat).map_err(|_| mismatch(field, &expected, vec![a, b, c]))
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Uniformly filled instance: every stock `stock`, every cost `cost`,
    /// every rate 1, every patient count/capacity `patients`, reserve 0.
    pub(crate) fn uniform_data(
        m: usize,
        n: usize,
        k: usize,
        k1: usize,
        stock: f64,
        cost: f64,
        patients: f64,
    ) -> InstanceData {
        InstanceData {
            m,
            n,
            k,
            k1,
            k2: Some(k - k1),
            n_open: None,
            wk: vec![1.0; k],
            ro: vec![1.0; k],
            rs: vec![1.0; k],
            rm: vec![1.0; k],
            rv: vec![1.0; k],
            aik: vec![vec![stock; k]; m],
            ajk: vec![vec![stock; k]; n],
            cijk: vec![vec![vec![cost; k1]; n]; m],
            cjjk: vec![vec![vec![cost; k1]; n]; n],
            coij: vec![vec![cost; n]; m],
            csij: vec![vec![cost; n]; m],
            cmij: vec![vec![cost; n]; m],
            cvij: vec![vec![cost; n]; m],
            bjk: vec![vec![0.0; k]; n],
            no_i: vec![patients; m],
            ns_i: vec![patients; m],
            nm_i: vec![patients; m],
            nv_i: vec![patients; m],
            no_j: vec![patients; n],
            ns_j: vec![patients; n],
            nm_j: vec![patients; n],
            nv_j: vec![patients; n],
            c: 100.0,
            s: 0.5,
        }
    }

    pub(crate) fn uniform(m: usize, n: usize, k: usize, k1: usize) -> ProblemInstance {
        ProblemInstance::from_data(uniform_data(m, n, k, k1, 5.0, 1.0, 10.0))
            .expect("fixture instance is well-formed")
    }
}
