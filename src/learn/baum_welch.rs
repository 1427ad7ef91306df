//!
//! Baum-Welch learning (soft-EM)
//!
//! ## E-step
//!
//! Run forward/backward and calculate the expected transition counts
//! (edge freqs) and the expected emission counts.
//!
//! ## M-step
//!
//! Normalize the expected counts row by row.
//!
//! The initial distribution is fixed to uniform, so the likelihood of the
//! training emissions never decreases across rounds.
//!
use super::params::LearnParams;
use super::{Estimate, LearningHistory, Training};
use crate::common::{Freq, Symbol};
use crate::error::Result;
use crate::hmm::HmmModel;
use log::{debug, info};
use ndarray::Array2;

///
/// Run Baum-Welch learning from the initial `model`.
///
pub fn baum_welch(
    model: &HmmModel,
    emissions: &[Symbol],
    params: &LearnParams,
) -> Result<Training> {
    model.check_emissions(emissions)?;
    info!(
        "baum-welch: |Q|={} |Σ|={} n={} rounds={}",
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
            let (edge_freqs, emission_freqs) = e_step(&current.model, emissions)?;
            let next = m_step(&current.model, edge_freqs, emission_freqs)?;
            let p = next.model.likelihood(emissions)?;
            debug!("#{} p={}", iteration, p);
            history.push(next.model.clone(), p);
            Ok(next)
        },
    )?;

    info!(
        "baum-welch finished: p={}",
        history.likelihoods.last().copied().unwrap_or_default()
    );
    Ok(Training {
        estimate: learned,
        history,
    })
}

///
/// E-step of Baum-Welch
///
/// returns `(edge_freqs, emission_freqs)` of the emissions under the model.
///
pub fn e_step(model: &HmmModel, emissions: &[Symbol]) -> Result<(Array2<Freq>, Array2<Freq>)> {
    let o = model.run(emissions)?;
    let edge_freqs = o.to_edge_freqs(model, emissions)?;
    let emission_freqs = o.to_emission_freqs(emissions, model.n_symbols())?;
    Ok((edge_freqs, emission_freqs))
}

///
/// M-step of Baum-Welch
///
pub fn m_step(
    model: &HmmModel,
    edge_freqs: Array2<Freq>,
    emission_freqs: Array2<Freq>,
) -> Result<Estimate> {
    Estimate::from_counts(&model.states, &model.symbols, edge_freqs, emission_freqs)
}
