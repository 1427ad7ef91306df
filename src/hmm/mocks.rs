//!
//! Mock HMMs and brute-force references for testing
//!
use super::model::HmmModel;
use crate::common::{Labels, Path, Symbol};
use itertools::Itertools;
use ndarray::{array, Array2};

fn mock_model(states: &[&str], symbols: &[&str], a: Array2<f64>, b: Array2<f64>) -> HmmModel {
    HmmModel::from_arrays(
        Labels::from_strs(states).unwrap(),
        Labels::from_strs(symbols).unwrap(),
        a,
        b,
    )
    .unwrap()
}

///
/// Two states `{A, B}` over `{x, y}` that tend to stay.
///
/// ```text
/// A = [[0.9, 0.1],    B = [[0.8, 0.2],
///      [0.1, 0.9]]         [0.2, 0.8]]
/// ```
///
pub fn mock_sticky() -> HmmModel {
    mock_model(
        &["A", "B"],
        &["x", "y"],
        array![[0.9, 0.1], [0.1, 0.9]],
        array![[0.8, 0.2], [0.2, 0.8]],
    )
}

///
/// Same emissions as `mock_sticky` but states tend to switch, so that
/// `xyxy` is decoded as `ABAB`.
///
pub fn mock_switching() -> HmmModel {
    mock_model(
        &["A", "B"],
        &["x", "y"],
        array![[0.1, 0.9], [0.9, 0.1]],
        array![[0.8, 0.2], [0.2, 0.8]],
    )
}

///
/// Three states `{A, B, C}` over `{x, y, z}` with every probability nonzero.
///
pub fn mock_three_state() -> HmmModel {
    mock_model(
        &["A", "B", "C"],
        &["x", "y", "z"],
        array![[0.5, 0.3, 0.2], [0.2, 0.6, 0.2], [0.3, 0.1, 0.6]],
        array![[0.7, 0.2, 0.1], [0.1, 0.3, 0.6], [0.3, 0.4, 0.3]],
    )
}

///
/// All `|Q|^n` hidden paths of length `n`
///
fn all_paths(model: &HmmModel, n: usize) -> impl Iterator<Item = Path> {
    let n_states = model.n_states();
    (0..n).map(move |_| 0..n_states).multi_cartesian_product()
}

///
/// `P(x) = \sum_π P(x, π)` by enumerating every path
///
pub fn brute_force_likelihood(model: &HmmModel, emissions: &[Symbol]) -> f64 {
    all_paths(model, emissions.len())
        .map(|path| model.joint_prob(emissions, &path).unwrap())
        .sum()
}

///
/// `argmax_π P(x, π)` by enumerating every path
///
pub fn brute_force_best_path(model: &HmmModel, emissions: &[Symbol]) -> (Path, f64) {
    all_paths(model, emissions.len())
        .map(|path| {
            let p = model.joint_prob(emissions, &path).unwrap();
            (path, p)
        })
        .fold((Vec::new(), f64::NEG_INFINITY), |best, (path, p)| {
            if p > best.1 {
                (path, p)
            } else {
                best
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brute_force_sums_over_all_sequences() {
        // \sum_x P(x) over all x of length 3 is 1
        let m = mock_three_state();
        let total: f64 = (0..3)
            .map(|_| 0..3)
            .multi_cartesian_product()
            .map(|xs| brute_force_likelihood(&m, &xs))
            .sum();
        assert_abs_diff_eq!(total, 1.0, epsilon = 1e-12);
    }
}
