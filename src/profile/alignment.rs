//!
//! Multiple sequence alignment used to build a profile HMM
//!
use crate::common::{Labels, Symbol};
use crate::error::{invalid, Result};
use serde::Serialize;

/// the character of a gap in alignment rows
pub const GAP: char = '-';

///
/// Rectangular matrix of aligned symbols. `None` is a gap.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MultipleAlignment {
    rows: Vec<Vec<Option<Symbol>>>,
}

impl MultipleAlignment {
    ///
    /// Constructor. There should be at least one row, and all rows should
    /// have the same non-zero length.
    ///
    pub fn new(rows: Vec<Vec<Option<Symbol>>>) -> Result<MultipleAlignment> {
        let n_columns = match rows.first() {
            Some(row) => row.len(),
            None => return Err(invalid("alignment has no rows")),
        };
        if n_columns == 0 {
            return Err(invalid("alignment rows are empty"));
        }
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != n_columns) {
            return Err(invalid(format!(
                "alignment row {} has {} columns, expected {}",
                i,
                row.len(),
                n_columns
            )));
        }
        Ok(MultipleAlignment { rows })
    }
    ///
    /// Constructor from strings like `A-CG`, one character per column.
    ///
    pub fn from_strs<S: AsRef<str>>(rows: &[S], symbols: &Labels) -> Result<MultipleAlignment> {
        let rows = rows
            .iter()
            .map(|row| {
                row.as_ref()
                    .chars()
                    .map(|c| {
                        if c == GAP {
                            Ok(None)
                        } else {
                            let mut buf = [0u8; 4];
                            symbols
                                .index_of(c.encode_utf8(&mut buf))
                                .map(Some)
                                .ok_or_else(|| {
                                    invalid(format!("unknown symbol `{}` in alignment", c))
                                })
                        }
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        MultipleAlignment::new(rows)
    }
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }
    pub fn n_columns(&self) -> usize {
        self.rows[0].len()
    }
    pub fn rows(&self) -> &[Vec<Option<Symbol>>] {
        &self.rows
    }
    /// `rows[row][column]`
    pub fn get(&self, row: usize, column: usize) -> Option<Symbol> {
        self.rows[row][column]
    }
    ///
    /// Fraction of gaps in the column
    ///
    pub fn gap_fraction(&self, column: usize) -> f64 {
        let n_gaps = self.rows.iter().filter(|row| row[column].is_none()).count();
        n_gaps as f64 / self.n_rows() as f64
    }
    ///
    /// `is_insert[j]` is true iff the gap fraction of column `j` is `>= theta`.
    ///
    pub fn insert_columns(&self, theta: f64) -> Vec<bool> {
        (0..self.n_columns())
            .map(|j| self.gap_fraction(j) >= theta)
            .collect()
    }
}
