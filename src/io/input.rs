//!
//! Loaders of whole input documents
//!
//! Each loader parses a document whose sections are separated by dashed
//! lines (see `io::table`), and implements `FromStr`.
//!
//! * `ObservationInput`: `x / Σ / Q / A / B`
//! * `LearningInput`: `iterations / x / Σ / Q / A / B`
//! * `EstimationInput`: `x / Σ / π / Q`
//! * `PathInput`: `π / Q / A`
//! * `AlignmentInput`: `θ [σ] / Σ / alignment`
//! * `ProfileAlignmentInput`: `x / θ σ / Σ / alignment`
//!
use super::table::{
    locate, parse_f64, parse_label_seq, parse_labels, parse_matrix, parse_usize,
    split_n_sections, Line, Section,
};
use crate::common::{Labels, Path, Sequence};
use crate::error::{HmmError, Result};
use crate::hmm::table::{EmissionTable, TransitionTable};
use crate::hmm::HmmModel;
use crate::learn::LearnParams;
use crate::profile::{MultipleAlignment, ProfileParams};

///
/// Parse `A` (`Q x Q`) and `B` (`Q x Σ`) sections into a model.
///
fn parse_model(
    states: Labels,
    symbols: Labels,
    transition: &Section,
    emission: &Section,
) -> Result<HmmModel> {
    let a = parse_matrix(transition, &states, &states)?;
    let a = TransitionTable::new(a).map_err(|e| locate(e, &transition.lines[0]))?;
    let b = parse_matrix(emission, &states, &symbols)?;
    let b = EmissionTable::new(b).map_err(|e| locate(e, &emission.lines[0]))?;
    HmmModel::new(states, symbols, a, b)
}

fn parse_sequence(section: &Section, labels: &Labels, what: &str) -> Result<Vec<usize>> {
    let line = section.single_line(what)?;
    let seq = parse_label_seq(&line, labels)?;
    if seq.is_empty() {
        return Err(line.error(format!("{} is empty", what)));
    }
    Ok(seq)
}

///
/// `θ` or `θ σ` on one line. Values out of `[0, 1]` are reported at the line.
///
fn parse_profile_params(line: &Line, require_pseudocount: bool) -> Result<ProfileParams> {
    let tokens = line.tokens();
    let (theta, pseudocount) = match (tokens.as_slice(), require_pseudocount) {
        ([theta], false) => (parse_f64(theta, line)?, None),
        ([theta, sigma], _) => (parse_f64(theta, line)?, Some(parse_f64(sigma, line)?)),
        _ => {
            return Err(line.error(if require_pseudocount {
                "expected `theta pseudocount`"
            } else {
                "expected `theta` or `theta pseudocount`"
            }))
        }
    };
    ProfileParams::new(theta, pseudocount).map_err(|e| locate(e, line))
}

fn parse_alignment(section: &Section, symbols: &Labels) -> Result<MultipleAlignment> {
    let rows: Vec<&str> = section.lines.iter().map(|l| l.text.trim()).collect();
    MultipleAlignment::from_strs(&rows, symbols).map_err(|e| locate(e, &section.lines[0]))
}

///
/// Input of Viterbi decoding, likelihood and soft decoding
///
#[derive(Debug, Clone)]
pub struct ObservationInput {
    pub emissions: Sequence,
    pub model: HmmModel,
}

impl std::str::FromStr for ObservationInput {
    type Err = HmmError;
    fn from_str(s: &str) -> Result<Self> {
        let sections = split_n_sections(s, 5, "observation")?;
        let symbols = parse_labels(&sections[1], "alphabet")?;
        let states = parse_labels(&sections[2], "states")?;
        let emissions = parse_sequence(&sections[0], &symbols, "emission sequence")?;
        let model = parse_model(states, symbols, &sections[3], &sections[4])?;
        Ok(ObservationInput { emissions, model })
    }
}

///
/// Input of Viterbi learning and Baum-Welch
///
#[derive(Debug, Clone)]
pub struct LearningInput {
    pub params: LearnParams,
    pub emissions: Sequence,
    pub model: HmmModel,
}

impl std::str::FromStr for LearningInput {
    type Err = HmmError;
    fn from_str(s: &str) -> Result<Self> {
        let sections = split_n_sections(s, 6, "learning")?;
        let line = sections[0].single_line("number of iterations")?;
        let n_iterations = parse_usize(line.text.trim(), &line)?;
        let params = LearnParams::new(n_iterations).map_err(|e| locate(e, &line))?;
        let symbols = parse_labels(&sections[2], "alphabet")?;
        let states = parse_labels(&sections[3], "states")?;
        let emissions = parse_sequence(&sections[1], &symbols, "emission sequence")?;
        let model = parse_model(states, symbols, &sections[4], &sections[5])?;
        Ok(LearningInput {
            params,
            emissions,
            model,
        })
    }
}

///
/// Input of supervised estimation
///
#[derive(Debug, Clone)]
pub struct EstimationInput {
    pub emissions: Sequence,
    pub path: Path,
    pub states: Labels,
    pub symbols: Labels,
}

impl std::str::FromStr for EstimationInput {
    type Err = HmmError;
    fn from_str(s: &str) -> Result<Self> {
        let sections = split_n_sections(s, 4, "estimation")?;
        let symbols = parse_labels(&sections[1], "alphabet")?;
        let states = parse_labels(&sections[3], "states")?;
        let emissions = parse_sequence(&sections[0], &symbols, "emission sequence")?;
        let path = parse_sequence(&sections[2], &states, "hidden path")?;
        if emissions.len() != path.len() {
            return Err(sections[2].lines[0].error(format!(
                "hidden path has length {} but the emission sequence has length {}",
                path.len(),
                emissions.len()
            )));
        }
        Ok(EstimationInput {
            emissions,
            path,
            states,
            symbols,
        })
    }
}

///
/// Input of the hidden path probability
///
#[derive(Debug, Clone)]
pub struct PathInput {
    pub path: Path,
    pub states: Labels,
    pub transition: TransitionTable,
}

impl std::str::FromStr for PathInput {
    type Err = HmmError;
    fn from_str(s: &str) -> Result<Self> {
        let sections = split_n_sections(s, 3, "path")?;
        let states = parse_labels(&sections[1], "states")?;
        let path = parse_sequence(&sections[0], &states, "hidden path")?;
        let a = parse_matrix(&sections[2], &states, &states)?;
        let transition = TransitionTable::new(a).map_err(|e| locate(e, &sections[2].lines[0]))?;
        Ok(PathInput {
            path,
            states,
            transition,
        })
    }
}

///
/// Input of the profile HMM builder
///
#[derive(Debug, Clone)]
pub struct AlignmentInput {
    pub params: ProfileParams,
    pub symbols: Labels,
    pub alignment: MultipleAlignment,
}

impl std::str::FromStr for AlignmentInput {
    type Err = HmmError;
    fn from_str(s: &str) -> Result<Self> {
        let sections = split_n_sections(s, 3, "alignment")?;
        let line = sections[0].single_line("theta")?;
        let params = parse_profile_params(&line, false)?;
        let symbols = parse_labels(&sections[1], "alphabet")?;
        let alignment = parse_alignment(&sections[2], &symbols)?;
        Ok(AlignmentInput {
            params,
            symbols,
            alignment,
        })
    }
}

///
/// Input of the profile aligner
///
#[derive(Debug, Clone)]
pub struct ProfileAlignmentInput {
    pub query: Sequence,
    pub params: ProfileParams,
    pub symbols: Labels,
    pub alignment: MultipleAlignment,
}

impl std::str::FromStr for ProfileAlignmentInput {
    type Err = HmmError;
    fn from_str(s: &str) -> Result<Self> {
        let sections = split_n_sections(s, 4, "profile alignment")?;
        let line = sections[1].single_line("theta and pseudocount")?;
        let params = parse_profile_params(&line, true)?;
        let symbols = parse_labels(&sections[2], "alphabet")?;
        let query = parse_sequence(&sections[0], &symbols, "query sequence")?;
        let alignment = parse_alignment(&sections[3], &symbols)?;
        Ok(ProfileAlignmentInput {
            query,
            params,
            symbols,
            alignment,
        })
    }
}
