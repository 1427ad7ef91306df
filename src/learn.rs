//!
//! Parameter estimation of `HmmModel`
//!
//! * `count`: supervised estimation from an emission sequence and its known
//!   hidden path, by counting transitions and emissions.
//! * `viterbi_learning`: hard-EM. Decode the most probable path with the
//!   current model, then re-estimate by counting.
//! * `baum_welch`: soft-EM. Re-estimate from the expected counts of the
//!   forward/backward result.
//!
//! Every learner returns a new model (the input is only borrowed). A row of
//! counts with zero mass cannot be normalized; it is replaced by the uniform
//! distribution and recorded as a `DegenerateRow`.
//!
pub mod baum_welch;
pub mod count;
pub mod params;
pub mod viterbi_learning;

use crate::common::{Freq, Labels};
use crate::error::Result;
use crate::hmm::table::{EmissionTable, TransitionTable};
use crate::hmm::HmmModel;
use log::warn;
use ndarray::Array2;
use serde::Serialize;

pub use baum_welch::baum_welch;
pub use count::estimate;
pub use params::LearnParams;
pub use viterbi_learning::viterbi_learning;

/// Which table a row belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TableKind {
    Transition,
    Emission,
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            TableKind::Transition => write!(f, "transition"),
            TableKind::Emission => write!(f, "emission"),
        }
    }
}

///
/// Diagnostic of a row which had no counts and was replaced by the uniform
/// distribution.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DegenerateRow {
    pub table: TableKind,
    /// label of the state of the row
    pub state: String,
}

impl std::fmt::Display for DegenerateRow {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} row of state {} has no counts and was made uniform",
            self.table, self.state
        )
    }
}

///
/// A learned model with the diagnostics of its estimation.
///
#[derive(Debug, Clone, Serialize)]
pub struct Estimate {
    pub model: HmmModel,
    pub degenerate_rows: Vec<DegenerateRow>,
}

impl Estimate {
    ///
    /// Estimate with no diagnostics, i.e. the model is given as is.
    ///
    pub fn given(model: HmmModel) -> Estimate {
        Estimate {
            model,
            degenerate_rows: Vec::new(),
        }
    }
    ///
    /// Build a model by normalizing (expected) counts.
    ///
    /// * `transition_counts`: `|Q| x |Q|`
    /// * `emission_counts`: `|Q| x |Σ|`
    ///
    pub fn from_counts(
        states: &Labels,
        symbols: &Labels,
        transition_counts: Array2<Freq>,
        emission_counts: Array2<Freq>,
    ) -> Result<Estimate> {
        let mut degenerate_rows = Vec::new();
        let transition = normalize_rows(
            transition_counts,
            TableKind::Transition,
            states,
            &mut degenerate_rows,
        );
        let emission = normalize_rows(
            emission_counts,
            TableKind::Emission,
            states,
            &mut degenerate_rows,
        );
        let model = HmmModel::new(
            states.clone(),
            symbols.clone(),
            TransitionTable::from_normalized(transition),
            EmissionTable::from_normalized(emission),
        )?;
        Ok(Estimate {
            model,
            degenerate_rows,
        })
    }
}

///
/// Normalize each row of counts by its sum.
///
/// A row with zero sum becomes uniform over the columns, and is pushed to
/// `degenerate_rows`.
///
pub fn normalize_rows(
    mut counts: Array2<Freq>,
    table: TableKind,
    states: &Labels,
    degenerate_rows: &mut Vec<DegenerateRow>,
) -> Array2<f64> {
    let uniform = 1.0 / counts.ncols() as f64;
    for (q, mut row) in counts.outer_iter_mut().enumerate() {
        let sum = row.sum();
        if sum > 0.0 {
            row /= sum;
        } else {
            row.fill(uniform);
            let d = DegenerateRow {
                table,
                state: states.name(q).to_owned(),
            };
            warn!("{}", d);
            degenerate_rows.push(d);
        }
    }
    counts
}

///
/// Models and likelihoods of each iteration of a learner.
///
/// `models[0]` is the input model and `models[k]` is the model after the
/// `k`-th round. `likelihoods[k]` is `P(x)` of the training emissions under
/// `models[k]`.
///
#[derive(Debug, Clone, Default, Serialize)]
pub struct LearningHistory {
    pub models: Vec<HmmModel>,
    pub likelihoods: Vec<f64>,
}

impl LearningHistory {
    pub fn push(&mut self, model: HmmModel, likelihood: f64) {
        self.models.push(model);
        self.likelihoods.push(likelihood);
    }
    /// the number of finished rounds
    pub fn n_rounds(&self) -> usize {
        self.models.len().saturating_sub(1)
    }
}

///
/// Result of an iterative learner: the final estimate and the history.
///
#[derive(Debug, Clone, Serialize)]
pub struct Training {
    pub estimate: Estimate,
    pub history: LearningHistory,
}
