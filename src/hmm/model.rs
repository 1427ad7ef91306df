//!
//! Definition of the discrete HMM
//!
use super::table::{EmissionTable, RowStochastic, TransitionTable};
use crate::common::{Labels, State, Symbol};
use crate::error::{invalid, Result};
use ndarray::Array2;
use serde::Serialize;

///
/// Discrete hidden Markov model
///
/// * `states`: ordered hidden states Q
/// * `symbols`: ordered alphabet Σ
/// * `transition`: `|Q| x |Q|` table
/// * `emission`: `|Q| x |Σ|` table
///
/// The initial distribution is uniform `1/|Q|`. The model is a value: the
/// algorithms only borrow it and learners return a new one.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HmmModel {
    pub states: Labels,
    pub symbols: Labels,
    pub transition: TransitionTable,
    pub emission: EmissionTable,
}

impl HmmModel {
    ///
    /// Constructor. Checks that the table dimensions agree with the labels.
    ///
    pub fn new(
        states: Labels,
        symbols: Labels,
        transition: TransitionTable,
        emission: EmissionTable,
    ) -> Result<HmmModel> {
        if transition.n_states() != states.len() {
            return Err(invalid(format!(
                "transition table has {} rows but there are {} states",
                transition.n_states(),
                states.len()
            )));
        }
        if emission.n_states() != states.len() {
            return Err(invalid(format!(
                "emission table has {} rows but there are {} states",
                emission.n_states(),
                states.len()
            )));
        }
        if emission.n_symbols() != symbols.len() {
            return Err(invalid(format!(
                "emission table has {} columns but there are {} symbols",
                emission.n_symbols(),
                symbols.len()
            )));
        }
        Ok(HmmModel {
            states,
            symbols,
            transition,
            emission,
        })
    }
    ///
    /// Constructor from raw matrices
    ///
    pub fn from_arrays(
        states: Labels,
        symbols: Labels,
        transition: Array2<f64>,
        emission: Array2<f64>,
    ) -> Result<HmmModel> {
        HmmModel::new(
            states,
            symbols,
            TransitionTable::new(transition)?,
            EmissionTable::new(emission)?,
        )
    }
    /// the number of hidden states `|Q|`
    pub fn n_states(&self) -> usize {
        self.states.len()
    }
    /// the size of the alphabet `|Σ|`
    pub fn n_symbols(&self) -> usize {
        self.symbols.len()
    }
    /// initial probability of every state, `1/|Q|`
    pub fn init_prob(&self) -> f64 {
        1.0 / self.n_states() as f64
    }
    /// transition probability `A[from][to]`
    #[inline]
    pub fn p_trans(&self, from: State, to: State) -> f64 {
        self.transition.p(from, to)
    }
    /// emission probability `B[state][symbol]`
    #[inline]
    pub fn p_emit(&self, state: State, symbol: Symbol) -> f64 {
        self.emission.p(state, symbol)
    }
    /// both tables are stochastic within `epsilon`
    pub fn is_stochastic(&self, epsilon: f64) -> bool {
        self.transition.is_stochastic(epsilon) && self.emission.is_stochastic(epsilon)
    }
    ///
    /// Check the emissions is non-empty and every symbol is in the alphabet.
    ///
    pub fn check_emissions(&self, emissions: &[Symbol]) -> Result<()> {
        if emissions.is_empty() {
            return Err(invalid("emission sequence is empty"));
        }
        if let Some((i, &x)) = emissions
            .iter()
            .enumerate()
            .find(|(_, &x)| x >= self.n_symbols())
        {
            return Err(invalid(format!(
                "symbol index {} at position {} is out of the alphabet (size {})",
                x,
                i,
                self.n_symbols()
            )));
        }
        Ok(())
    }
    ///
    /// Check the path is non-empty and every state is in the model.
    ///
    pub fn check_path(&self, path: &[State]) -> Result<()> {
        if path.is_empty() {
            return Err(invalid("state path is empty"));
        }
        if let Some((i, &q)) = path
            .iter()
            .enumerate()
            .find(|(_, &q)| q >= self.n_states())
        {
            return Err(invalid(format!(
                "state index {} at position {} is out of the model (size {})",
                q,
                i,
                self.n_states()
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for HmmModel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        crate::io::format::write_model(f, self)
    }
}
