//!
//! Construct a profile HMM from a multiple alignment
//!
//! ## Details
//!
//! * classify columns into match/insert columns by `theta`
//! * convert each row into a path of states
//!     match column with a symbol: `Mk`, match column with a gap: `Dk`,
//!     insert column with a symbol: `Ik` (`k` is the last match level),
//!     insert column with a gap: nothing
//! * count transitions along the paths (from `S` to `E`) and emissions
//! * normalize the counts (with or without pseudocounts)
//!
use super::alignment::MultipleAlignment;
use super::params::ProfileParams;
use super::state::{ProfileState, ProfileTopology};
use crate::common::{Freq, Labels, Symbol};
use crate::error::Result;
use crate::hmm::table::{EmissionTable, TransitionTable};
use crate::hmm::HmmModel;
use crate::learn::{DegenerateRow, TableKind};
use log::{info, warn};
use ndarray::Array2;
use serde::Serialize;

///
/// Profile HMM
///
/// `model` is an ordinary `HmmModel` whose states are the profile states
/// (`S`, `I0`, `M1`, ..., `E`) in the order of `topology`.
///
#[derive(Debug, Clone, Serialize)]
pub struct ProfileHmm {
    pub topology: ProfileTopology,
    pub model: HmmModel,
    pub params: ProfileParams,
    /// rows made uniform because they had no counts
    pub degenerate_rows: Vec<DegenerateRow>,
}

impl ProfileHmm {
    ///
    /// Build the profile HMM of the alignment over the alphabet `symbols`.
    ///
    pub fn from_alignment(
        alignment: &MultipleAlignment,
        symbols: &Labels,
        params: &ProfileParams,
    ) -> Result<ProfileHmm> {
        params.validate()?;
        params.check_pseudocount(symbols.len())?;

        let is_insert = alignment.insert_columns(params.theta);
        let n_match = is_insert.iter().filter(|&&b| !b).count();
        let topology = ProfileTopology::new(n_match)?;
        info!(
            "profile: {} rows x {} columns, {} match columns",
            alignment.n_rows(),
            alignment.n_columns(),
            n_match
        );

        let n_states = topology.n_states();
        let mut transition_counts = Array2::<Freq>::zeros((n_states, n_states));
        let mut emission_counts = Array2::<Freq>::zeros((n_states, symbols.len()));
        for row in alignment.rows() {
            let path = row_to_path(row, &is_insert);
            for w in path.windows(2) {
                let (from, _) = w[0];
                let (to, _) = w[1];
                transition_counts[[index_of(&topology, from), index_of(&topology, to)]] += 1.0;
            }
            for &(state, symbol) in path.iter() {
                if let Some(x) = symbol {
                    emission_counts[[index_of(&topology, state), x]] += 1.0;
                }
            }
        }

        let mut degenerate_rows = Vec::new();
        let (transition, emission) = match params.pseudocount {
            None => (
                normalize_raw(transition_counts),
                normalize_raw(emission_counts),
            ),
            Some(sigma) => (
                normalize_transitions(&topology, transition_counts, sigma, &mut degenerate_rows),
                normalize_emissions(&topology, emission_counts, sigma, &mut degenerate_rows),
            ),
        };
        let model = HmmModel::new(
            topology.labels()?,
            symbols.clone(),
            TransitionTable::from_normalized(transition),
            EmissionTable::from_normalized(emission),
        )?;
        Ok(ProfileHmm {
            topology,
            model,
            params: *params,
            degenerate_rows,
        })
    }
    /// `L`
    pub fn n_match(&self) -> usize {
        self.topology.n_match()
    }
    ///
    /// Transition probability between two states. 0 if either state is
    /// not in the profile.
    ///
    pub fn trans(&self, from: ProfileState, to: ProfileState) -> f64 {
        match (self.topology.index(from), self.topology.index(to)) {
            (Some(i), Some(j)) => self.model.p_trans(i, j),
            _ => 0.0,
        }
    }
    ///
    /// Emission probability of the symbol from the state. 0 for silent
    /// states or states not in the profile.
    ///
    pub fn emit(&self, state: ProfileState, symbol: Symbol) -> f64 {
        match self.topology.index(state) {
            Some(i) => self.model.p_emit(i, symbol),
            None => 0.0,
        }
    }
}

///
/// Convert an alignment row into the path of states from `S` to `E`,
/// each with the emitted symbol (if any).
///
fn row_to_path(row: &[Option<Symbol>], is_insert: &[bool]) -> Vec<(ProfileState, Option<Symbol>)> {
    let mut path = vec![(ProfileState::Start, None)];
    let mut k = 0;
    for (&symbol, &insert) in row.iter().zip(is_insert.iter()) {
        match (insert, symbol) {
            (false, Some(x)) => {
                k += 1;
                path.push((ProfileState::Match(k), Some(x)));
            }
            (false, None) => {
                k += 1;
                path.push((ProfileState::Del(k), None));
            }
            (true, Some(x)) => path.push((ProfileState::Ins(k), Some(x))),
            (true, None) => {}
        }
    }
    path.push((ProfileState::End, None));
    path
}

fn index_of(topology: &ProfileTopology, state: ProfileState) -> usize {
    // every state produced by row_to_path is in the topology
    topology.index(state).unwrap_or_default()
}

///
/// `count/rowsum` for each row. Rows without counts stay zero.
///
fn normalize_raw(mut counts: Array2<Freq>) -> Array2<f64> {
    for mut row in counts.outer_iter_mut() {
        let sum = row.sum();
        if sum > 0.0 {
            row /= sum;
        }
    }
    counts
}

///
/// ```text
/// p = (count / realSum) (1 - |legal| σ) + σ
/// ```
///
/// for the legal successors of each state. If the state has no outgoing
/// counts, the row is uniform over the legal successors (when `σ > 0`).
///
fn normalize_transitions(
    topology: &ProfileTopology,
    counts: Array2<Freq>,
    sigma: f64,
    degenerate_rows: &mut Vec<DegenerateRow>,
) -> Array2<f64> {
    let mut probs = Array2::zeros(counts.dim());
    for state in topology.states() {
        let legal: Vec<usize> = topology
            .legal_successors(state)
            .into_iter()
            .filter_map(|s| topology.index(s))
            .collect();
        if legal.is_empty() {
            continue;
        }
        let from = index_of(topology, state);
        let real_sum: f64 = legal.iter().map(|&to| counts[[from, to]]).sum();
        let n_legal = legal.len() as f64;
        if real_sum > 0.0 {
            for &to in legal.iter() {
                probs[[from, to]] = counts[[from, to]] / real_sum * (1.0 - n_legal * sigma) + sigma;
            }
        } else if sigma > 0.0 {
            for &to in legal.iter() {
                probs[[from, to]] = 1.0 / n_legal;
            }
            push_degenerate(degenerate_rows, TableKind::Transition, state);
        }
    }
    probs
}

///
/// ```text
/// p = (count / realSum) (1 - |Σ| σ) + σ
/// ```
///
/// for match/insert states. If the state emitted nothing, the row is
/// uniform over the alphabet. Rows of silent states stay zero.
///
fn normalize_emissions(
    topology: &ProfileTopology,
    counts: Array2<Freq>,
    sigma: f64,
    degenerate_rows: &mut Vec<DegenerateRow>,
) -> Array2<f64> {
    let n_symbols = counts.ncols() as f64;
    let mut probs = Array2::zeros(counts.dim());
    for state in topology.states().filter(|s| s.is_emitting()) {
        let q = index_of(topology, state);
        let real_sum = counts.row(q).sum();
        if real_sum > 0.0 {
            for x in 0..counts.ncols() {
                probs[[q, x]] = counts[[q, x]] / real_sum * (1.0 - n_symbols * sigma) + sigma;
            }
        } else {
            probs.row_mut(q).fill(1.0 / n_symbols);
            push_degenerate(degenerate_rows, TableKind::Emission, state);
        }
    }
    probs
}

fn push_degenerate(degenerate_rows: &mut Vec<DegenerateRow>, table: TableKind, state: ProfileState) {
    let d = DegenerateRow {
        table,
        state: state.to_string(),
    };
    warn!("{}", d);
    degenerate_rows.push(d);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hmm::table::{RowStochastic, NORMALIZED_TOLERANCE};
    use ProfileState::*;

    fn build(rows: &[&str], alphabet: &[&str], theta: f64, sigma: Option<f64>) -> ProfileHmm {
        let symbols = Labels::from_strs(alphabet).unwrap();
        let alignment = MultipleAlignment::from_strs(rows, &symbols).unwrap();
        let params = ProfileParams::new(theta, sigma).unwrap();
        ProfileHmm::from_alignment(&alignment, &symbols, &params).unwrap()
    }

    #[test]
    fn row_to_path_labels() {
        let is_insert = vec![false, true, true, false];
        let path: Vec<String> = row_to_path(&[Some(0), Some(1), None, None], &is_insert)
            .iter()
            .map(|(s, _)| s.to_string())
            .collect();
        assert_eq!(path, vec!["S", "M1", "I1", "D2", "E"]);
        let path: Vec<String> = row_to_path(&[None, None, Some(1), Some(0)], &is_insert)
            .iter()
            .map(|(s, _)| s.to_string())
            .collect();
        assert_eq!(path, vec!["S", "D1", "I1", "M2", "E"]);
    }

    #[test]
    fn build_without_pseudocount() {
        let p = build(&["ACAC", "ACGC", "A-AC"], &["A", "C", "G", "T"], 0.5, None);
        assert_eq!(p.n_match(), 4);
        assert_eq!(p.trans(Start, Match(1)), 1.0);
        assert_abs_diff_eq!(p.trans(Match(1), Match(2)), 2.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.trans(Match(1), Del(2)), 1.0 / 3.0, epsilon = 1e-12);
        assert_eq!(p.trans(Match(2), Match(3)), 1.0);
        assert_eq!(p.trans(Del(2), Match(3)), 1.0);
        assert_eq!(p.trans(Match(4), End), 1.0);
        assert_eq!(p.emit(Match(1), 0), 1.0);
        assert_abs_diff_eq!(p.emit(Match(3), 0), 2.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.emit(Match(3), 2), 1.0 / 3.0, epsilon = 1e-12);
        // unused states stay zero
        assert_eq!(p.model.transition.row_sum(1), 0.0);
        assert_eq!(p.model.emission.row_sum(1), 0.0);
        assert!(p.degenerate_rows.is_empty());
        assert!(p.model.is_stochastic(NORMALIZED_TOLERANCE));
    }

    #[test]
    fn build_with_pseudocount() {
        let sigma = 0.01;
        let p = build(&["ACAC", "ACGC", "A-AC"], &["A", "C", "G", "T"], 0.5, Some(sigma));
        let t = p.topology;
        // M1 -> {I1, M2, D2}: counts 0, 2, 1
        assert_abs_diff_eq!(p.trans(Match(1), Ins(1)), sigma, epsilon = 1e-12);
        assert_abs_diff_eq!(
            p.trans(Match(1), Match(2)),
            2.0 / 3.0 * 0.97 + sigma,
            epsilon = 1e-12
        );
        // M4 -> {I4, E}
        assert_abs_diff_eq!(p.trans(Match(4), End), 0.98 + sigma, epsilon = 1e-12);
        // emission: A at M1 is (1 * (1 - 4σ) + σ)
        assert_abs_diff_eq!(p.emit(Match(1), 0), 0.96 + sigma, epsilon = 1e-12);
        assert_abs_diff_eq!(p.emit(Match(1), 3), sigma, epsilon = 1e-12);
        // I0 never used: uniform rows
        assert_abs_diff_eq!(p.trans(Ins(0), Match(1)), 1.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.emit(Ins(0), 2), 0.25, epsilon = 1e-12);
        // D rows have no emission
        assert_eq!(p.model.emission.row_sum(t.index(Del(2)).unwrap()), 0.0);
        // E has no outgoing row
        assert_eq!(p.model.transition.row_sum(t.index(End).unwrap()), 0.0);
        // illegal transitions stay exactly zero
        for from in t.states() {
            let legal = t.legal_successors(from);
            for to in t.states() {
                if !legal.contains(&to) {
                    assert_eq!(p.trans(from, to), 0.0, "{} -> {}", from, to);
                }
            }
        }
        assert!(p.model.is_stochastic(NORMALIZED_TOLERANCE));
        assert!(p
            .degenerate_rows
            .contains(&DegenerateRow {
                table: TableKind::Emission,
                state: "I0".to_owned()
            }));
    }

    #[test]
    fn build_with_insert_columns() {
        // columns 2 and 3 have gap fractions 3/4 and 1/2, so both are insert
        // columns at theta 0.5 and symbols there are emitted by I1
        let rows = ["A--C", "AGGC", "A--C", "A-TC"];
        let (g, t) = (2, 3);
        let p = build(&rows, &["A", "C", "G", "T"], 0.5, None);
        assert_eq!(p.n_match(), 2);
        assert_abs_diff_eq!(p.trans(Match(1), Ins(1)), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(p.trans(Match(1), Match(2)), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(p.trans(Ins(1), Ins(1)), 1.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.trans(Ins(1), Match(2)), 2.0 / 3.0, epsilon = 1e-12);
        assert_eq!(p.trans(Ins(1), Del(2)), 0.0);
        assert_abs_diff_eq!(p.emit(Ins(1), g), 2.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.emit(Ins(1), t), 1.0 / 3.0, epsilon = 1e-12);
        assert_eq!(p.emit(Ins(1), 0), 0.0);
        assert!(p.model.is_stochastic(NORMALIZED_TOLERANCE));

        let sigma = 0.01;
        let p = build(&rows, &["A", "C", "G", "T"], 0.5, Some(sigma));
        assert_eq!(p.n_match(), 2);
        assert_abs_diff_eq!(p.trans(Match(1), Ins(1)), 0.5 * 0.97 + sigma, epsilon = 1e-12);
        assert_abs_diff_eq!(p.trans(Match(1), Del(2)), sigma, epsilon = 1e-12);
        assert_abs_diff_eq!(
            p.trans(Ins(1), Ins(1)),
            1.0 / 3.0 * 0.97 + sigma,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            p.trans(Ins(1), Match(2)),
            2.0 / 3.0 * 0.97 + sigma,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(p.emit(Ins(1), g), 2.0 / 3.0 * 0.96 + sigma, epsilon = 1e-12);
        assert_abs_diff_eq!(p.emit(Ins(1), 0), sigma, epsilon = 1e-12);
        assert!(p.model.is_stochastic(NORMALIZED_TOLERANCE));
    }

    #[test]
    fn all_insert_columns_is_configuration_error() {
        let symbols = Labels::from_strs(&["A", "C"]).unwrap();
        let alignment = MultipleAlignment::from_strs(&["A-", "-C"], &symbols).unwrap();
        let params = ProfileParams::new(0.5, None).unwrap();
        assert!(matches!(
            ProfileHmm::from_alignment(&alignment, &symbols, &params),
            Err(crate::error::HmmError::Configuration(_))
        ));
    }
}
