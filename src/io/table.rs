//!
//! Tabular text input
//!
//! A document is a list of sections separated by a line of dashes:
//!
//! ```text
//! xyxzzxyxyy
//! --------
//! x   y   z
//! --------
//! A   B
//! --------
//!     A   B
//! A   0.641   0.359
//! B   0.729   0.271
//! ```
//!
//! Blank lines are ignored. Cells are separated by tabs or spaces.
//! A line of only dashes (at least `SEPARATOR_MIN_LEN`) is always a
//! separator, so an alignment row cannot consist only of that many gaps.
//!
use crate::common::Labels;
use crate::error::{HmmError, Result};
use ndarray::Array2;

/// minimum number of dashes of a separator line
pub const SEPARATOR_MIN_LEN: usize = 3;

/// A non-blank line with its 1-based line number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub number: usize,
    pub text: &'a str,
}

impl<'a> Line<'a> {
    /// cells separated by whitespace
    pub fn tokens(&self) -> Vec<&'a str> {
        self.text.split_whitespace().collect()
    }
    /// `HmmError::Parse` located at this line
    pub fn error<S: Into<String>>(&self, message: S) -> HmmError {
        HmmError::Parse {
            line: self.number,
            message: message.into(),
        }
    }
}

/// Lines between two separators
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'a> {
    pub lines: Vec<Line<'a>>,
}

impl<'a> Section<'a> {
    ///
    /// The only line of the section.
    ///
    pub fn single_line(&self, what: &str) -> Result<Line<'a>> {
        match self.lines.as_slice() {
            [line] => Ok(*line),
            [_, second, ..] => Err(second.error(format!("{} should be a single line", what))),
            [] => Err(HmmError::Parse {
                line: 0,
                message: format!("{} is empty", what),
            }),
        }
    }
    /// the line number of the first line of the section
    pub fn first_line_number(&self) -> usize {
        self.lines.first().map(|l| l.number).unwrap_or(0)
    }
}

fn is_separator(text: &str) -> bool {
    let t = text.trim();
    t.len() >= SEPARATOR_MIN_LEN && t.chars().all(|c| c == '-')
}

///
/// Split the document into non-empty sections.
///
pub fn split_sections(text: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        if is_separator(raw) {
            if !current.is_empty() {
                sections.push(Section {
                    lines: std::mem::take(&mut current),
                });
            }
        } else if !raw.trim().is_empty() {
            current.push(Line {
                number: i + 1,
                text: raw.trim_end(),
            });
        }
    }
    if !current.is_empty() {
        sections.push(Section { lines: current });
    }
    sections
}

///
/// Split the document into exactly `n` sections.
///
pub fn split_n_sections<'a>(text: &'a str, n: usize, document: &str) -> Result<Vec<Section<'a>>> {
    let sections = split_sections(text);
    if sections.len() != n {
        let line = text.lines().count();
        return Err(HmmError::Parse {
            line,
            message: format!(
                "{} input should have {} sections separated by dashes, but has {}",
                document,
                n,
                sections.len()
            ),
        });
    }
    Ok(sections)
}

/// Replace `InvalidInput` with a `Parse` error at the line.
pub fn locate(error: HmmError, line: &Line) -> HmmError {
    match error {
        HmmError::InvalidInput(message) => line.error(message),
        e => e,
    }
}

///
/// Parse a single line of labels like `A   B   C`
///
pub fn parse_labels(section: &Section, what: &str) -> Result<Labels> {
    let line = section.single_line(what)?;
    Labels::from_strs(&line.tokens()).map_err(|e| locate(e, &line))
}

///
/// Encode a line of labels, either one label per character (`xyxzz`) when
/// every label is a single character and the line has no spaces, or
/// whitespace separated tokens (`x y x z z`).
///
pub fn parse_label_seq(line: &Line, labels: &Labels) -> Result<Vec<usize>> {
    let text = line.text.trim();
    let r = if labels.is_single_char() && !text.contains(char::is_whitespace) {
        labels.encode(text)
    } else {
        labels.encode_tokens(text)
    };
    r.map_err(|e| locate(e, line))
}

pub fn parse_f64(token: &str, line: &Line) -> Result<f64> {
    token
        .parse()
        .map_err(|_| line.error(format!("cannot parse `{}` as a number", token)))
}

pub fn parse_usize(token: &str, line: &Line) -> Result<usize> {
    token
        .parse()
        .map_err(|_| line.error(format!("cannot parse `{}` as a non-negative integer", token)))
}

///
/// Parse a matrix with a header of column labels and one line per row
/// starting with the row label.
///
/// The header should list `columns` in order. Each row label of `rows`
/// should appear exactly once (in any order).
///
pub fn parse_matrix(section: &Section, rows: &Labels, columns: &Labels) -> Result<Array2<f64>> {
    let (header, body) = match section.lines.split_first() {
        Some(x) => x,
        None => {
            return Err(HmmError::Parse {
                line: 0,
                message: "matrix is empty".to_owned(),
            })
        }
    };
    let names = header.tokens();
    if names != columns.names() {
        return Err(header.error(format!(
            "matrix header `{}` does not match the labels `{}`",
            names.join(" "),
            columns.names().join(" ")
        )));
    }

    let mut matrix = Array2::zeros((rows.len(), columns.len()));
    let mut filled = vec![false; rows.len()];
    for line in body.iter() {
        let tokens = line.tokens();
        let (label, values) = match tokens.split_first() {
            Some(x) => x,
            None => continue,
        };
        let r = rows
            .index_of(label)
            .ok_or_else(|| line.error(format!("unknown row label `{}`", label)))?;
        if filled[r] {
            return Err(line.error(format!("duplicated row label `{}`", label)));
        }
        if values.len() != columns.len() {
            return Err(line.error(format!(
                "ragged row: {} values, expected {}",
                values.len(),
                columns.len()
            )));
        }
        for (c, token) in values.iter().enumerate() {
            matrix[[r, c]] = parse_f64(token, line)?;
        }
        filled[r] = true;
    }
    if let Some(r) = filled.iter().position(|&f| !f) {
        return Err(header.error(format!("row `{}` is missing", rows.name(r))));
    }
    Ok(matrix)
}
