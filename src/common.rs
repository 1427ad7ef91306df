//!
//! Common types: index aliases for states/symbols and the ordered label set
//! that maps them to their names.
//!
use crate::error::{invalid, Result};
use serde::Serialize;
use std::collections::HashMap;

/// index of a hidden state in the model's state `Labels`
pub type State = usize;

/// index of an observable symbol in the model's symbol `Labels`
pub type Symbol = usize;

/// observed sequence, as symbol indices
pub type Sequence = Vec<Symbol>;

/// hidden state path, one state per emitted symbol
pub type Path = Vec<State>;

/// expected (or counted) frequency
pub type Freq = f64;

///
/// Ordered set of names (states or alphabet symbols).
///
/// The declaration order is the canonical total order of the set: indices are
/// assigned in that order and every argmax tie is broken in favor of the
/// smaller index.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Labels {
    names: Vec<String>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl Labels {
    ///
    /// Constructor. Names must be non-empty and unique.
    ///
    pub fn new(names: Vec<String>) -> Result<Labels> {
        if names.is_empty() {
            return Err(invalid("label set is empty"));
        }
        let mut index = HashMap::new();
        for (i, name) in names.iter().enumerate() {
            if name.is_empty() {
                return Err(invalid(format!("label #{} is empty", i)));
            }
            if index.insert(name.clone(), i).is_some() {
                return Err(invalid(format!("duplicated label `{}`", name)));
            }
        }
        Ok(Labels { names, index })
    }
    ///
    /// Constructor from string slices
    ///
    pub fn from_strs<S: AsRef<str>>(names: &[S]) -> Result<Labels> {
        Labels::new(names.iter().map(|s| s.as_ref().to_owned()).collect())
    }
    /// the number of labels
    pub fn len(&self) -> usize {
        self.names.len()
    }
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
    /// name of the `i`-th label
    pub fn name(&self, i: usize) -> &str {
        &self.names[i]
    }
    pub fn names(&self) -> &[String] {
        &self.names
    }
    /// index of the label `name`, if any
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }
    /// iterator of `(index, name)`
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.names.iter().enumerate().map(|(i, s)| (i, s.as_str()))
    }
    /// true if every label is a single character
    pub fn is_single_char(&self) -> bool {
        self.names.iter().all(|s| s.chars().count() == 1)
    }
    ///
    /// Convert a string into label indices, one label per character.
    ///
    /// Used for observed sequences like `xyxzz` and hidden paths like `ABBA`.
    ///
    pub fn encode(&self, text: &str) -> Result<Vec<usize>> {
        text.chars()
            .enumerate()
            .map(|(i, c)| {
                let mut buf = [0u8; 4];
                self.index_of(c.encode_utf8(&mut buf)).ok_or_else(|| {
                    invalid(format!("unknown label `{}` at position {}", c, i))
                })
            })
            .collect()
    }
    ///
    /// Convert whitespace separated tokens into label indices.
    ///
    pub fn encode_tokens(&self, text: &str) -> Result<Vec<usize>> {
        text.split_whitespace()
            .map(|token| {
                self.index_of(token)
                    .ok_or_else(|| invalid(format!("unknown label `{}`", token)))
            })
            .collect()
    }
    ///
    /// Convert label indices back to a string, joined with `sep`
    ///
    pub fn decode(&self, indices: &[usize], sep: &str) -> String {
        indices
            .iter()
            .map(|&i| self.name(i))
            .collect::<Vec<_>>()
            .join(sep)
    }
}

impl std::fmt::Display for Labels {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.names.join("\t"))
    }
}

///
/// Index and value of the first maximum of `values`.
///
/// Scanning is in index order and a later value replaces the current best
/// only if strictly greater, so ties go to the smaller index.
/// Returns `None` for an empty iterator.
///
pub fn first_argmax<I>(values: I) -> Option<(usize, f64)>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .enumerate()
        .fold(None, |best, (i, v)| match best {
            Some((_, b)) if v <= b => best,
            _ => Some((i, v)),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_encode_decode() {
        let labels = Labels::from_strs(&["x", "y", "z"]).unwrap();
        assert_eq!(labels.len(), 3);
        assert_eq!(labels.index_of("y"), Some(1));
        assert_eq!(labels.index_of("w"), None);
        let xs = labels.encode("xzzy").unwrap();
        assert_eq!(xs, vec![0, 2, 2, 1]);
        assert_eq!(labels.decode(&xs, ""), "xzzy");
        assert_eq!(labels.decode(&xs, " "), "x z z y");
        assert!(labels.encode("xaz").is_err());
        assert_eq!(labels.encode_tokens("z x").unwrap(), vec![2, 0]);
        assert_eq!(labels.to_string(), "x\ty\tz");
    }

    #[test]
    fn labels_reject_duplicates_and_empty() {
        assert!(Labels::from_strs(&["A", "B", "A"]).is_err());
        assert!(Labels::from_strs::<&str>(&[]).is_err());
        assert!(Labels::from_strs(&["A", ""]).is_err());
    }

    #[test]
    fn first_argmax_prefers_smaller_index() {
        assert_eq!(first_argmax(vec![0.1, 0.5, 0.5, 0.2]), Some((1, 0.5)));
        assert_eq!(first_argmax(vec![0.0, 0.0]), Some((0, 0.0)));
        assert_eq!(first_argmax(Vec::new()), None);
    }
}
