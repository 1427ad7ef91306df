//!
//! Align a sequence to a profile HMM (Viterbi on the three planes)
//!
//! ## Tables
//!
//! `M[k][j]`, `I[k][j]`, `D[k][j]` for `0 <= k <= L` (level) and
//! `0 <= j <= n` (number of emitted symbols) are the max probabilities of
//! the paths from `S` that end at `Mk`, `Ik`, `Dk` after emitting `x[..j]`.
//!
//! `S` is treated as a virtual `M0` at `(0, 0)` with probability 1,
//! whose outgoing transitions are those of `S`.
//!
//! ```text
//! D[k][j] = max(D[k-1][j] T(Dk-1,Dk), M[k-1][j] T(Mk-1,Dk), I[k-1][j] T(Ik-1,Dk))
//! M[k][j] = max(D[k-1][j-1] T(Dk-1,Mk), M[k-1][j-1] T(Mk-1,Mk), I[k-1][j-1] T(Ik-1,Mk)) E(Mk,x[j-1])
//! I[k][j] = max(D[k][j-1] T(Dk,Ik), M[k][j-1] T(Mk,Ik), I[k][j-1] T(Ik,Ik)) E(Ik,x[j-1])
//! ```
//!
//! Candidates are compared in the order Del, Match, Ins, and the first
//! maximum wins.
//!
use super::builder::ProfileHmm;
use super::state::{ProfileState, StateKind};
use crate::common::{first_argmax, Symbol};
use crate::error::{invalid, HmmError, Result};
use ndarray::Array2;
use serde::Serialize;

/// The most probable path of the query through the profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileAlignment {
    /// states from the one after `S` to the one before `E`
    pub path: Vec<ProfileState>,
    /// `Pr(x, π*)` including the transitions from `S` and into `E`
    pub prob: f64,
}

impl std::fmt::Display for ProfileAlignment {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let names: Vec<String> = self.path.iter().map(|s| s.to_string()).collect();
        write!(f, "{}", names.join(" "))
    }
}

///
/// Three DP planes of size `(L+1) x (n+1)` with their backpointers.
///
#[derive(Debug, Clone)]
pub struct ProfileTable {
    /// Match state probability
    pub m: Array2<f64>,
    /// Ins state probability
    pub i: Array2<f64>,
    /// Del state probability
    pub d: Array2<f64>,
    /// kind of the predecessor of each cell (`None` if unreachable)
    pub from_m: Array2<Option<StateKind>>,
    pub from_i: Array2<Option<StateKind>>,
    pub from_d: Array2<Option<StateKind>>,
}

impl ProfileTable {
    fn zero(n_match: usize, n_emissions: usize) -> ProfileTable {
        let shape = (n_match + 1, n_emissions + 1);
        ProfileTable {
            m: Array2::zeros(shape),
            i: Array2::zeros(shape),
            d: Array2::zeros(shape),
            from_m: Array2::from_elem(shape, None),
            from_i: Array2::from_elem(shape, None),
            from_d: Array2::from_elem(shape, None),
        }
    }
    /// value of the cell
    pub fn value(&self, kind: StateKind, k: usize, j: usize) -> f64 {
        match kind {
            StateKind::Match => self.m[[k, j]],
            StateKind::Ins => self.i[[k, j]],
            StateKind::Del => self.d[[k, j]],
        }
    }
    /// backpointer of the cell
    pub fn from(&self, kind: StateKind, k: usize, j: usize) -> Option<StateKind> {
        match kind {
            StateKind::Match => self.from_m[[k, j]],
            StateKind::Ins => self.from_i[[k, j]],
            StateKind::Del => self.from_d[[k, j]],
        }
    }
    fn set(&mut self, kind: StateKind, k: usize, j: usize, value: f64, from: Option<StateKind>) {
        let (plane, pointers) = match kind {
            StateKind::Match => (&mut self.m, &mut self.from_m),
            StateKind::Ins => (&mut self.i, &mut self.from_i),
            StateKind::Del => (&mut self.d, &mut self.from_d),
        };
        plane[[k, j]] = value;
        pointers[[k, j]] = from;
    }
}

///
/// The cell which precedes the cell `(k, j)` of the kind.
///
fn predecessor_cell(kind: StateKind, k: usize, j: usize) -> (usize, usize) {
    match kind {
        StateKind::Match => (k - 1, j - 1),
        StateKind::Del => (k - 1, j),
        StateKind::Ins => (k, j - 1),
    }
}

impl ProfileHmm {
    ///
    /// Profile state at level `k` of the kind, where `M0` is `S`.
    ///
    fn state_at(kind: StateKind, k: usize) -> ProfileState {
        match (kind, k) {
            (StateKind::Match, 0) => ProfileState::Start,
            _ => ProfileState::new(kind, k),
        }
    }
    ///
    /// Fill the three planes for the query. Every symbol of the query should
    /// be in the alphabet.
    ///
    pub(crate) fn align_table(&self, query: &[Symbol]) -> ProfileTable {
        let n_match = self.n_match();
        let n = query.len();
        let mut t = ProfileTable::zero(n_match, n);
        // virtual M0 = S
        t.m[[0, 0]] = 1.0;

        for k in 0..=n_match {
            for j in 0..=n {
                if k == 0 && j == 0 {
                    continue;
                }
                for kind in StateKind::ALIGNMENT_ORDER {
                    let reachable = match kind {
                        StateKind::Del => k >= 1,
                        StateKind::Match => k >= 1 && j >= 1,
                        StateKind::Ins => j >= 1,
                    };
                    if !reachable {
                        continue;
                    }
                    let to = ProfileHmm::state_at(kind, k);
                    let (pk, pj) = predecessor_cell(kind, k, j);
                    let emission = if to.is_emitting() {
                        self.emit(to, query[j - 1])
                    } else {
                        1.0
                    };
                    let candidates = StateKind::ALIGNMENT_ORDER.map(|from_kind| {
                        let from = ProfileHmm::state_at(from_kind, pk);
                        t.value(from_kind, pk, pj) * self.trans(from, to) * emission
                    });
                    if let Some((best, value)) = first_argmax(candidates) {
                        if value > 0.0 {
                            t.set(kind, k, j, value, Some(StateKind::ALIGNMENT_ORDER[best]));
                        }
                    }
                }
            }
        }
        t
    }
    ///
    /// Align the query to the profile and return the most probable path.
    ///
    /// Ties are broken in the order Del, Match, Ins at every step including
    /// the termination.
    ///
    pub fn align(&self, query: &[Symbol]) -> Result<ProfileAlignment> {
        if query.is_empty() {
            return Err(invalid("query sequence is empty"));
        }
        if let Some(&x) = query.iter().find(|&&x| x >= self.model.n_symbols()) {
            return Err(invalid(format!(
                "query symbol index {} is out of the alphabet",
                x
            )));
        }
        let n_match = self.n_match();
        let n = query.len();
        let t = self.align_table(query);

        // termination
        let candidates = StateKind::ALIGNMENT_ORDER.map(|kind| {
            let from = ProfileHmm::state_at(kind, n_match);
            t.value(kind, n_match, n) * self.trans(from, ProfileState::End)
        });
        let (last, prob) = match first_argmax(candidates) {
            Some((last, prob)) if prob > 0.0 => (StateKind::ALIGNMENT_ORDER[last], prob),
            _ => return Err(HmmError::NoViablePath { position: n }),
        };

        // traceback
        let mut path = Vec::new();
        let (mut kind, mut k, mut j) = (last, n_match, n);
        while !(kind == StateKind::Match && k == 0) {
            path.push(ProfileState::new(kind, k));
            let from = t
                .from(kind, k, j)
                .ok_or(HmmError::NoViablePath { position: j })?;
            let (pk, pj) = predecessor_cell(kind, k, j);
            kind = from;
            k = pk;
            j = pj;
        }
        path.reverse();
        Ok(ProfileAlignment { path, prob })
    }
}
