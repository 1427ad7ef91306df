//!
//! Supervised estimation by counting
//!
//! ```text
//! A[p][q] = #(π_i = p, π_{i+1} = q) / #(π_i = p, i < n-1)
//! B[q][c] = #(π_i = q, x_i = c) / #(π_i = q)
//! ```
//!
//! Only the `n-1` consecutive pairs of the path are transitions, so the last
//! state of the path is never counted as a transition source.
//!
use super::Estimate;
use crate::common::{Freq, Labels, State, Symbol};
use crate::error::{invalid, Result};
use itertools::{izip, Itertools};
use log::info;
use ndarray::Array2;

///
/// Estimate the tables from the emissions and the hidden path that emitted it.
///
pub fn estimate(
    emissions: &[Symbol],
    path: &[State],
    states: &Labels,
    symbols: &Labels,
) -> Result<Estimate> {
    check_training_data(emissions, path, states, symbols)?;
    let transition_counts = count_transitions(path, states.len());
    let emission_counts = count_emissions(emissions, path, states.len(), symbols.len());
    let e = Estimate::from_counts(states, symbols, transition_counts, emission_counts)?;
    info!(
        "estimated from {} emissions ({} degenerate rows)",
        emissions.len(),
        e.degenerate_rows.len()
    );
    Ok(e)
}

///
/// `counts[p][q]` = the number of `i` with `(π_i, π_{i+1}) = (p, q)`
///
pub fn count_transitions(path: &[State], n_states: usize) -> Array2<Freq> {
    let mut counts = Array2::zeros((n_states, n_states));
    for (&p, &q) in path.iter().tuple_windows() {
        counts[[p, q]] += 1.0;
    }
    counts
}

///
/// `counts[q][c]` = the number of `i` with `(π_i, x_i) = (q, c)`
///
pub fn count_emissions(
    emissions: &[Symbol],
    path: &[State],
    n_states: usize,
    n_symbols: usize,
) -> Array2<Freq> {
    let mut counts = Array2::zeros((n_states, n_symbols));
    for (&q, &x) in izip!(path, emissions) {
        counts[[q, x]] += 1.0;
    }
    counts
}

fn check_training_data(
    emissions: &[Symbol],
    path: &[State],
    states: &Labels,
    symbols: &Labels,
) -> Result<()> {
    if emissions.is_empty() {
        return Err(invalid("emission sequence is empty"));
    }
    if emissions.len() != path.len() {
        return Err(invalid(format!(
            "emission sequence (length {}) and path (length {}) differ in length",
            emissions.len(),
            path.len()
        )));
    }
    if let Some(&x) = emissions.iter().find(|&&x| x >= symbols.len()) {
        return Err(invalid(format!("symbol index {} is out of the alphabet", x)));
    }
    if let Some(&q) = path.iter().find(|&&q| q >= states.len()) {
        return Err(invalid(format!("state index {} is out of the states", q)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hmm::table::{RowStochastic, NORMALIZED_TOLERANCE};
    use crate::learn::TableKind;

    fn labels() -> (Labels, Labels) {
        (
            Labels::from_strs(&["A", "B", "C"]).unwrap(),
            Labels::from_strs(&["x", "y", "z"]).unwrap(),
        )
    }

    #[test]
    fn estimate_by_counting() {
        let (states, symbols) = labels();
        let xs = symbols.encode("yzzzyxzxxx").unwrap();
        let path = states.encode("BBABABABAB").unwrap();
        let e = estimate(&xs, &path, &states, &symbols).unwrap();
        let m = &e.model;
        // A -> B four times
        assert_eq!(m.transition.row(0).to_vec(), vec![0.0, 1.0, 0.0]);
        // B -> A four times and B -> B once
        assert_abs_diff_eq!(m.p_trans(1, 0), 0.8, epsilon = 1e-12);
        assert_abs_diff_eq!(m.p_trans(1, 1), 0.2, epsilon = 1e-12);
        assert_eq!(m.p_trans(1, 2), 0.0);
        // C never appears
        for r in 0..3 {
            assert_abs_diff_eq!(m.p_trans(2, r), 1.0 / 3.0, epsilon = 1e-12);
            assert_abs_diff_eq!(m.p_emit(2, r), 1.0 / 3.0, epsilon = 1e-12);
        }
        assert_eq!(m.emission.row(0).to_vec(), vec![0.25, 0.25, 0.5]);
        assert_abs_diff_eq!(m.p_emit(1, 0), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(m.p_emit(1, 1), 1.0 / 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(m.p_emit(1, 2), 1.0 / 3.0, epsilon = 1e-12);
        assert!(m.is_stochastic(NORMALIZED_TOLERANCE));

        let kinds: Vec<TableKind> = e.degenerate_rows.iter().map(|d| d.table).collect();
        assert_eq!(kinds, vec![TableKind::Transition, TableKind::Emission]);
        assert!(e.degenerate_rows.iter().all(|d| d.state == "C"));
    }

    #[test]
    fn last_state_is_not_a_transition_source() {
        let (states, symbols) = labels();
        // C appears only at the end, so its transition row has no counts
        // while its emission row does.
        let xs = symbols.encode("xyz").unwrap();
        let path = states.encode("ABC").unwrap();
        let e = estimate(&xs, &path, &states, &symbols).unwrap();
        assert_eq!(
            e.degenerate_rows
                .iter()
                .map(|d| (d.table, d.state.as_str()))
                .collect::<Vec<_>>(),
            vec![(TableKind::Transition, "C")]
        );
        assert_eq!(e.model.emission.row(2).to_vec(), vec![0.0, 0.0, 1.0]);
        assert_eq!(count_transitions(&path, 3).sum(), 2.0);
    }

    #[test]
    fn estimate_rejects_bad_input() {
        let (states, symbols) = labels();
        assert!(estimate(&[0, 1], &[0], &states, &symbols).is_err());
        assert!(estimate(&[], &[], &states, &symbols).is_err());
        assert!(estimate(&[0, 3], &[0, 1], &states, &symbols).is_err());
        assert!(estimate(&[0, 1], &[0, 4], &states, &symbols).is_err());
    }
}
