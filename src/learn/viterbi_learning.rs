//!
//! Viterbi learning (hard-EM)
//!
//! Repeat `n_iterations` times:
//!
//! 1. decode the most probable path `π*` of the emissions with the current model
//! 2. re-estimate the model from `(x, π*)` by counting
//!
//! The likelihood is not guaranteed to increase.
//!
use super::count::estimate;
use super::params::LearnParams;
use super::{Estimate, LearningHistory, Training};
use crate::common::Symbol;
use crate::error::Result;
use crate::hmm::HmmModel;
use log::{debug, info};

///
/// Run Viterbi learning from the initial `model`.
///
pub fn viterbi_learning(
    model: &HmmModel,
    emissions: &[Symbol],
    params: &LearnParams,
) -> Result<Training> {
    model.check_emissions(emissions)?;
    info!(
        "viterbi learning: |Q|={} |Σ|={} n={} rounds={}",
        model.n_states(),
        model.n_symbols(),
        emissions.len(),
        params.n_iterations
    );

    let mut history = LearningHistory::default();
    history.push(model.clone(), model.likelihood(emissions)?);

    let learned = (0..params.n_iterations).try_fold(
        Estimate::given(model.clone()),
        |current, iteration| -> Result<Estimate> {
            let path = current.model.viterbi_path(emissions)?;
            let next = estimate(
                emissions,
                &path,
                &current.model.states,
                &current.model.symbols,
            )?;
            let p = next.model.likelihood(emissions)?;
            debug!(
                "#{} path={} p={}",
                iteration,
                current.model.states.decode(&path, ""),
                p
            );
            history.push(next.model.clone(), p);
            Ok(next)
        },
    )?;

    info!(
        "viterbi learning finished: p={}",
        history.likelihoods.last().copied().unwrap_or_default()
    );
    Ok(Training {
        estimate: learned,
        history,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hmm::mocks::{mock_sticky, mock_three_state};
    use crate::hmm::table::NORMALIZED_TOLERANCE;

    #[test]
    fn zero_iterations_returns_input() {
        let m = mock_three_state();
        let xs = m.symbols.encode("xyzzyx").unwrap();
        let t = viterbi_learning(&m, &xs, &LearnParams::new(0).unwrap()).unwrap();
        assert_eq!(t.estimate.model, m);
        assert!(t.estimate.degenerate_rows.is_empty());
        assert_eq!(t.history.n_rounds(), 0);
        assert_eq!(t.history.likelihoods.len(), 1);
    }

    #[test]
    fn one_round_is_decode_then_count() {
        let m = mock_three_state();
        let xs = m.symbols.encode("xxyzzzyxzy").unwrap();
        let t = viterbi_learning(&m, &xs, &LearnParams::new(1).unwrap()).unwrap();
        let path = m.viterbi_path(&xs).unwrap();
        let e = estimate(&xs, &path, &m.states, &m.symbols).unwrap();
        assert_eq!(t.estimate.model, e.model);
        assert_eq!(t.history.n_rounds(), 1);
    }

    #[test]
    fn rounds_produce_stochastic_models() {
        let m = mock_sticky();
        let xs = m.symbols.encode("xxxyyyxxyyyxyx").unwrap();
        let t = viterbi_learning(&m, &xs, &LearnParams::new(5).unwrap()).unwrap();
        assert_eq!(t.history.models.len(), 6);
        assert_eq!(t.history.likelihoods.len(), 6);
        for model in t.history.models.iter() {
            assert!(model.is_stochastic(NORMALIZED_TOLERANCE));
        }
        assert_eq!(&t.estimate.model, t.history.models.last().unwrap());
    }
}
