//!
//! Subcommands of the `seqhmm` binary
//!
//! Each function parses one input document, runs the algorithm and renders
//! the result either as text or as JSON.
//!
use crate::common::Labels;
use crate::error::Result;
use crate::hmm::HmmModel;
use crate::io::format::{format_float, format_path, format_posteriors};
use crate::io::input::{
    AlignmentInput, EstimationInput, LearningInput, ObservationInput, PathInput,
    ProfileAlignmentInput,
};
use crate::learn::{self, DegenerateRow, Training};
use crate::profile::{ProfileAlignment, ProfileHmm, ProfileParams};
use log::info;
use ndarray::Array2;
use serde::Serialize;

/// How results are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStyle {
    /// tab separated tables, as the input documents
    Text,
    /// pretty printed JSON
    Json,
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    let mut s = serde_json::to_string_pretty(value)?;
    s.push('\n');
    Ok(s)
}

fn log_degenerate_rows(rows: &[DegenerateRow]) {
    if !rows.is_empty() {
        info!("{} rows were made uniform", rows.len());
    }
}

#[derive(Debug, Clone, Serialize)]
struct DecodedPath {
    path: String,
    prob: f64,
}

#[derive(Debug, Clone, Serialize)]
struct Likelihood {
    likelihood: f64,
}

#[derive(Debug, Clone, Serialize)]
struct Posteriors<'a> {
    states: &'a Labels,
    posteriors: &'a Array2<f64>,
}

///
/// Most probable hidden path of the emissions.
///
pub fn viterbi(text: &str, style: OutputStyle) -> Result<String> {
    let input: ObservationInput = text.parse()?;
    let r = input.model.viterbi(&input.emissions)?;
    let decoded = DecodedPath {
        path: format_path(&input.model.states, &r.traceback()?),
        prob: r.best_prob()?,
    };
    info!("viterbi: p={}", decoded.prob);
    match style {
        OutputStyle::Text => Ok(format!("{}\n", decoded.path)),
        OutputStyle::Json => to_json(&decoded),
    }
}

///
/// Probability of the emissions summed over all hidden paths.
///
pub fn likelihood(text: &str, style: OutputStyle) -> Result<String> {
    let input: ObservationInput = text.parse()?;
    let likelihood = input.model.likelihood(&input.emissions)?;
    match style {
        OutputStyle::Text => Ok(format!("{}\n", format_float(likelihood))),
        OutputStyle::Json => to_json(&Likelihood { likelihood }),
    }
}

///
/// Posterior probability of each state at each position.
///
pub fn soft_decode(text: &str, style: OutputStyle) -> Result<String> {
    let input: ObservationInput = text.parse()?;
    let posteriors = input.model.soft_decode(&input.emissions)?;
    match style {
        OutputStyle::Text => Ok(format_posteriors(&input.model.states, &posteriors)),
        OutputStyle::Json => to_json(&Posteriors {
            states: &input.model.states,
            posteriors: &posteriors,
        }),
    }
}

fn render_model<T: Serialize>(model: &HmmModel, value: &T, style: OutputStyle) -> Result<String> {
    match style {
        OutputStyle::Text => Ok(model.to_string()),
        OutputStyle::Json => to_json(value),
    }
}

///
/// Estimate a model from emissions and their known hidden path.
///
pub fn estimate(text: &str, style: OutputStyle) -> Result<String> {
    let input: EstimationInput = text.parse()?;
    let e = learn::estimate(&input.emissions, &input.path, &input.states, &input.symbols)?;
    log_degenerate_rows(&e.degenerate_rows);
    render_model(&e.model, &e, style)
}

fn render_training(training: &Training, style: OutputStyle) -> Result<String> {
    log_degenerate_rows(&training.estimate.degenerate_rows);
    render_model(&training.estimate.model, training, style)
}

///
/// Viterbi learning from the initial model of the document.
///
pub fn viterbi_learn(text: &str, style: OutputStyle) -> Result<String> {
    let input: LearningInput = text.parse()?;
    let training = learn::viterbi_learning(&input.model, &input.emissions, &input.params)?;
    render_training(&training, style)
}

///
/// Baum-Welch learning from the initial model of the document.
///
pub fn baum_welch(text: &str, style: OutputStyle) -> Result<String> {
    let input: LearningInput = text.parse()?;
    let training = learn::baum_welch(&input.model, &input.emissions, &input.params)?;
    render_training(&training, style)
}

///
/// Probability of a hidden path (initial probability `1/|Q|`).
///
pub fn path_prob(text: &str, style: OutputStyle) -> Result<String> {
    let input: PathInput = text.parse()?;
    let p = input.transition.path_prob(&input.path);
    match style {
        OutputStyle::Text => Ok(format!("{}\n", format_float(p))),
        OutputStyle::Json => to_json(&Likelihood { likelihood: p }),
    }
}

///
/// Build the profile HMM of the alignment.
///
/// `params` replaces `theta` and the pseudocount given in the document.
///
pub fn profile(text: &str, params: Option<ProfileParams>, style: OutputStyle) -> Result<String> {
    let input: AlignmentInput = text.parse()?;
    let params = params.unwrap_or(input.params);
    let p = ProfileHmm::from_alignment(&input.alignment, &input.symbols, &params)?;
    log_degenerate_rows(&p.degenerate_rows);
    render_model(&p.model, &p, style)
}

///
/// Build the profile HMM of the alignment and align the query to it.
///
/// `params` replaces `theta` and the pseudocount given in the document.
///
pub fn align(text: &str, params: Option<ProfileParams>, style: OutputStyle) -> Result<String> {
    let input: ProfileAlignmentInput = text.parse()?;
    let params = params.unwrap_or(input.params);
    let p = ProfileHmm::from_alignment(&input.alignment, &input.symbols, &params)?;
    log_degenerate_rows(&p.degenerate_rows);
    let a: ProfileAlignment = p.align(&input.query)?;
    info!("align: p={}", a.prob);
    match style {
        OutputStyle::Text => Ok(format!("{}\n", a)),
        OutputStyle::Json => to_json(&a),
    }
}
