//!
//! Output formatting of models, posteriors and paths
//!
//! Probabilities in tables are rounded to 3 significant digits and printed
//! in the shortest form:
//!
//! ```text
//! 0        -> 0
//! 1        -> 1.0
//! 1/3      -> 0.333
//! 0.00001234 -> 1.23e-05
//! ```
//!
use crate::common::{Labels, State};
use crate::hmm::table::RowStochastic;
use crate::hmm::HmmModel;
use ndarray::Array2;
use std::fmt::Write;

/// separator line between two tables
pub const SEPARATOR: &str = "--------";

///
/// Shortest representation of a float, switching to scientific notation
/// with a two-digit exponent (`1.5e-07`) below `1e-4`.
///
pub fn format_float(value: f64) -> String {
    if value == 0.0 {
        return "0.0".to_owned();
    }
    let sci = format!("{:e}", value);
    let (mantissa, exponent) = match sci.split_once('e') {
        Some(x) => x,
        None => return sci,
    };
    let exponent: i32 = exponent.parse().unwrap_or_default();
    if exponent < -4 || exponent >= 16 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    } else {
        let s = format!("{}", value);
        if s.contains('.') {
            s
        } else {
            s + ".0"
        }
    }
}

///
/// Round to 3 significant digits
///
pub fn round_significant(value: f64) -> f64 {
    format!("{:.2e}", value).parse().unwrap_or(value)
}

///
/// Probability in a table. `0` is printed as `0`.
///
pub fn format_prob(p: f64) -> String {
    if p == 0.0 {
        "0".to_owned()
    } else {
        format_float(round_significant(p))
    }
}

///
/// Posterior probability with 4 decimals (trailing zeros removed)
///
pub fn format_posterior(p: f64) -> String {
    let s = format!("{:.4}", p);
    let trimmed = s.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{}0", trimmed)
    } else {
        trimmed.to_owned()
    }
}

///
/// Write a matrix with a header of `columns` and each row led by its
/// label in `rows`, tab separated.
///
pub fn write_matrix<W: Write>(
    w: &mut W,
    rows: &Labels,
    columns: &Labels,
    matrix: &Array2<f64>,
) -> std::fmt::Result {
    writeln!(w, "\t{}", columns.names().join("\t"))?;
    for (r, row) in matrix.outer_iter().enumerate() {
        let cells: Vec<String> = row.iter().map(|&p| format_prob(p)).collect();
        writeln!(w, "{}\t{}", rows.name(r), cells.join("\t"))?;
    }
    Ok(())
}

///
/// Write the transition and emission tables separated by a dashed line.
///
pub fn write_model<W: Write>(w: &mut W, model: &HmmModel) -> std::fmt::Result {
    write_matrix(w, &model.states, &model.states, model.transition.probs())?;
    writeln!(w, "{}", SEPARATOR)?;
    write_matrix(w, &model.states, &model.symbols, model.emission.probs())
}

///
/// Posteriors as a table with a header of states and one line per position.
///
pub fn format_posteriors(states: &Labels, posteriors: &Array2<f64>) -> String {
    let mut s = String::new();
    s.push_str(&states.names().join("\t"));
    s.push('\n');
    for row in posteriors.outer_iter() {
        let cells: Vec<String> = row.iter().map(|&p| format_posterior(p)).collect();
        s.push_str(&cells.join("\t"));
        s.push('\n');
    }
    s
}

///
/// Hidden path as concatenated labels (`AABBA`), or space separated if
/// some label is longer than a character.
///
pub fn format_path(states: &Labels, path: &[State]) -> String {
    if states.is_single_char() {
        states.decode(path, "")
    } else {
        states.decode(path, " ")
    }
}
