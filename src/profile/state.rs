//!
//! States of a profile HMM and their fixed ordering
//!
//! With `L` match columns, the states are
//!
//! ```text
//! S, I0, M1, D1, I1, M2, D2, I2, ..., ML, DL, IL, E
//! ```
//!
//! and the index of each state in this order is
//!
//! ```text
//! S = 0, I0 = 1, Mk = 3k-1, Dk = 3k, Ik = 3k+1, E = 3L+2
//! ```
//!
use crate::common::Labels;
use crate::error::{invalid, HmmError, Result};
use serde::{Serialize, Serializer};

/// Type of an emitting/silent state at a level `k >= 1` (or `I0`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StateKind {
    Match,
    Ins,
    Del,
}

impl StateKind {
    /// Order of candidates in the aligner; ties go to the earlier kind.
    pub const ALIGNMENT_ORDER: [StateKind; 3] =
        [StateKind::Del, StateKind::Match, StateKind::Ins];
}

///
/// A state of the profile HMM
///
/// `Match(k)` and `Del(k)` have `k >= 1`, `Ins(k)` has `k >= 0`.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileState {
    Start,
    Match(usize),
    Ins(usize),
    Del(usize),
    End,
}

impl ProfileState {
    /// constructor from kind and level
    pub fn new(kind: StateKind, k: usize) -> ProfileState {
        match kind {
            StateKind::Match => ProfileState::Match(k),
            StateKind::Ins => ProfileState::Ins(k),
            StateKind::Del => ProfileState::Del(k),
        }
    }
    /// kind of the state, `None` for `Start`/`End`
    pub fn kind(&self) -> Option<StateKind> {
        match self {
            ProfileState::Match(_) => Some(StateKind::Match),
            ProfileState::Ins(_) => Some(StateKind::Ins),
            ProfileState::Del(_) => Some(StateKind::Del),
            _ => None,
        }
    }
    ///
    /// The number of match columns completed when in this state.
    /// `Start` is at level 0 (same as `I0`). `End` has no level.
    ///
    pub fn level(&self) -> Option<usize> {
        match *self {
            ProfileState::Start => Some(0),
            ProfileState::Match(k) | ProfileState::Ins(k) | ProfileState::Del(k) => Some(k),
            ProfileState::End => None,
        }
    }
    /// true if the state emits a symbol
    pub fn is_emitting(&self) -> bool {
        matches!(self, ProfileState::Match(_) | ProfileState::Ins(_))
    }
}

impl std::fmt::Display for ProfileState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ProfileState::Start => write!(f, "S"),
            ProfileState::Match(k) => write!(f, "M{}", k),
            ProfileState::Ins(k) => write!(f, "I{}", k),
            ProfileState::Del(k) => write!(f, "D{}", k),
            ProfileState::End => write!(f, "E"),
        }
    }
}

impl std::str::FromStr for ProfileState {
    type Err = HmmError;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "S" => return Ok(ProfileState::Start),
            "E" => return Ok(ProfileState::End),
            _ => {}
        }
        let mut chars = s.chars();
        let head = chars.next();
        let k: usize = chars
            .as_str()
            .parse()
            .map_err(|_| invalid(format!("unknown profile state `{}`", s)))?;
        match head {
            Some('M') if k >= 1 => Ok(ProfileState::Match(k)),
            Some('D') if k >= 1 => Ok(ProfileState::Del(k)),
            Some('I') => Ok(ProfileState::Ins(k)),
            _ => Err(invalid(format!("unknown profile state `{}`", s))),
        }
    }
}

impl Serialize for ProfileState {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

///
/// The state layout of a profile HMM with `n_match` (= L) match columns.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProfileTopology {
    n_match: usize,
}

impl ProfileTopology {
    ///
    /// Constructor. A profile without any match column is rejected.
    ///
    pub fn new(n_match: usize) -> Result<ProfileTopology> {
        if n_match == 0 {
            return Err(HmmError::Configuration(
                "profile has no match column (every column is an insert column)".to_owned(),
            ));
        }
        Ok(ProfileTopology { n_match })
    }
    /// `L`
    pub fn n_match(&self) -> usize {
        self.n_match
    }
    /// `3L+3`
    pub fn n_states(&self) -> usize {
        3 * self.n_match + 3
    }
    /// true if the state exists in this profile
    pub fn contains(&self, state: ProfileState) -> bool {
        match state {
            ProfileState::Start | ProfileState::End => true,
            ProfileState::Match(k) | ProfileState::Del(k) => 1 <= k && k <= self.n_match,
            ProfileState::Ins(k) => k <= self.n_match,
        }
    }
    ///
    /// Index of the state in the fixed order, `None` if the state does not
    /// exist in this profile.
    ///
    pub fn index(&self, state: ProfileState) -> Option<usize> {
        if !self.contains(state) {
            return None;
        }
        Some(match state {
            ProfileState::Start => 0,
            ProfileState::Match(k) => 3 * k - 1,
            ProfileState::Del(k) => 3 * k,
            ProfileState::Ins(k) => 3 * k + 1,
            ProfileState::End => 3 * self.n_match + 2,
        })
    }
    ///
    /// The state of the index, `None` if out of the profile. Inverse of `index`.
    ///
    pub fn state(&self, index: usize) -> Option<ProfileState> {
        if index >= self.n_states() {
            return None;
        }
        Some(if index == 0 {
            ProfileState::Start
        } else if index == self.n_states() - 1 {
            ProfileState::End
        } else {
            match index % 3 {
                1 => ProfileState::Ins((index - 1) / 3),
                2 => ProfileState::Match((index + 1) / 3),
                _ => ProfileState::Del(index / 3),
            }
        })
    }
    /// all states in the fixed order
    pub fn states(&self) -> impl Iterator<Item = ProfileState> + '_ {
        (0..self.n_states()).filter_map(move |i| self.state(i))
    }
    /// state names as `Labels`
    pub fn labels(&self) -> Result<Labels> {
        Labels::new(self.states().map(|s| s.to_string()).collect())
    }
    ///
    /// States that can follow `state`, in index order.
    ///
    /// * `S -> {I0, M1, D1}`
    /// * `Xk -> {Ik, Mk+1, Dk+1}` for `k < L`
    /// * `XL -> {IL, E}`
    /// * `E -> {}`
    ///
    pub fn legal_successors(&self, state: ProfileState) -> Vec<ProfileState> {
        match state.level() {
            None => vec![],
            Some(k) if k < self.n_match => vec![
                ProfileState::Ins(k),
                ProfileState::Match(k + 1),
                ProfileState::Del(k + 1),
            ],
            Some(k) => vec![ProfileState::Ins(k), ProfileState::End],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_index_roundtrip() {
        let t = ProfileTopology::new(2).unwrap();
        let names: Vec<String> = t.states().map(|s| s.to_string()).collect();
        assert_eq!(
            names,
            vec!["S", "I0", "M1", "D1", "I1", "M2", "D2", "I2", "E"]
        );
        for (i, s) in t.states().enumerate() {
            assert_eq!(t.index(s), Some(i));
            assert_eq!(t.state(i), Some(s));
        }
        assert_eq!(t.state(9), None);
        assert_eq!(t.index(ProfileState::Match(0)), None);
        assert_eq!(t.index(ProfileState::Del(3)), None);
        assert_eq!(t.labels().unwrap().index_of("M2"), Some(5));
    }

    #[test]
    fn parse_states() {
        assert_eq!("M12".parse::<ProfileState>().unwrap(), ProfileState::Match(12));
        assert_eq!("I0".parse::<ProfileState>().unwrap(), ProfileState::Ins(0));
        assert_eq!("S".parse::<ProfileState>().unwrap(), ProfileState::Start);
        assert!("D0".parse::<ProfileState>().is_err());
        assert!("X1".parse::<ProfileState>().is_err());
        assert!("M".parse::<ProfileState>().is_err());
    }

    #[test]
    fn successors() {
        let t = ProfileTopology::new(2).unwrap();
        use ProfileState::*;
        assert_eq!(t.legal_successors(Start), vec![Ins(0), Match(1), Del(1)]);
        assert_eq!(t.legal_successors(Ins(0)), vec![Ins(0), Match(1), Del(1)]);
        assert_eq!(t.legal_successors(Del(1)), vec![Ins(1), Match(2), Del(2)]);
        assert_eq!(t.legal_successors(Match(2)), vec![Ins(2), End]);
        assert_eq!(t.legal_successors(End), vec![]);
        // successors are in index order
        for s in t.states() {
            let indices: Vec<usize> = t
                .legal_successors(s)
                .into_iter()
                .map(|n| t.index(n).unwrap())
                .collect();
            assert!(indices.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn empty_profile_is_configuration_error() {
        assert!(matches!(
            ProfileTopology::new(0),
            Err(HmmError::Configuration(_))
        ));
    }

    #[test]
    fn serialize_as_name() {
        let s = serde_json::to_string(&vec![ProfileState::Match(1), ProfileState::Ins(0)]).unwrap();
        assert_eq!(s, r#"["M1","I0"]"#);
    }
}
