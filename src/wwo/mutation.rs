//! Wave propagation operator.
//!
//! In water wave optimization a wave's wavelength controls how far it
//! travels: poorly ranked solutions (long waves) are perturbed more often
//! than front members (short waves).
//!
//! # References
//!
//! - Zheng (2015), "Water wave optimization: A new nature-inspired metaheuristic"

use crate::problem::Solution;
use rand::Rng;

/// Wavelength of a solution with Pareto rank `rank`.
///
/// `rank / max_rank`, so front members get 0 and the worst front gets 1.
/// When every solution shares rank 0, the wavelength is 1.
///
/// # Examples
///
/// ```
/// use u_mowwo::wwo::wavelength;
///
/// assert_eq!(wavelength(0, 4), 0.0);
/// assert_eq!(wavelength(2, 4), 0.5);
/// assert_eq!(wavelength(0, 0), 1.0);
/// ```
pub fn wavelength(rank: usize, max_rank: usize) -> f64 {
    if max_rank == 0 {
        1.0
    } else {
        rank as f64 / max_rank as f64
    }
}

/// Propagates a wave: returns a perturbed copy of `solution`.
///
/// Each of the six decision arrays is visited once. With probability
/// `wavelength` (clamped to `[0, 1]`) one uniformly chosen entry is moved by
/// +1 or -1, saturating at 0. Empty arrays are skipped.
///
/// The parent is never modified.
pub fn wave_mutate<R: Rng>(solution: &Solution, wavelength: f64, rng: &mut R) -> Solution {
    let p = if wavelength.is_nan() {
        0.0
    } else {
        wavelength.clamp(0.0, 1.0)
    };
    let mut child = solution.clone();
    for mut gene in child.genes_mut() {
        let len = gene.len();
        if len == 0 || !rng.random_bool(p) {
            continue;
        }
        let pos = rng.random_range(0..len);
        if let Some(v) = gene.iter_mut().nth(pos) {
            *v = if rng.random_bool(0.5) {
                v.saturating_add(1)
            } else {
                v.saturating_sub(1)
            };
        }
    }
    child
}
