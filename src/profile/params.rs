//!
//! ProfileParams for profile HMM construction
//!
use crate::error::{invalid, HmmError, Result};
use serde::{Deserialize, Serialize};

///
/// Parameters of the profile HMM builder
///
/// * `theta`: a column whose gap fraction is `>= theta` is an insert column
/// * `pseudocount`: `σ` added to every legal transition and every emission
///   of match/insert states. `None` means raw frequencies.
///
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileParams {
    pub theta: f64,
    #[serde(default)]
    pub pseudocount: Option<f64>,
}

impl ProfileParams {
    pub fn new(theta: f64, pseudocount: Option<f64>) -> Result<ProfileParams> {
        let params = ProfileParams { theta, pseudocount };
        params.validate()?;
        Ok(params)
    }
    ///
    /// Check `theta` and `pseudocount` are in `[0, 1]`.
    ///
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.theta) {
            return Err(invalid(format!("theta {} is out of [0, 1]", self.theta)));
        }
        if let Some(sigma) = self.pseudocount {
            if !(0.0..=1.0).contains(&sigma) {
                return Err(invalid(format!("pseudocount {} is out of [0, 1]", sigma)));
            }
        }
        Ok(())
    }
    ///
    /// Check the pseudocount leaves a non-negative mass for the counts,
    /// i.e. `|Σ| σ <= 1` for emissions and `3 σ <= 1` for transitions.
    ///
    pub fn check_pseudocount(&self, n_symbols: usize) -> Result<()> {
        if let Some(sigma) = self.pseudocount {
            if n_symbols as f64 * sigma > 1.0 {
                return Err(HmmError::Configuration(format!(
                    "pseudocount {} is too large for an alphabet of {} symbols",
                    sigma, n_symbols
                )));
            }
            if 3.0 * sigma > 1.0 {
                return Err(HmmError::Configuration(format!(
                    "pseudocount {} is too large for 3 successors",
                    sigma
                )));
            }
        }
        Ok(())
    }
}

impl std::default::Default for ProfileParams {
    fn default() -> Self {
        ProfileParams {
            theta: 0.35,
            pseudocount: Some(0.01),
        }
    }
}

impl std::fmt::Display for ProfileParams {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "theta: {}", self.theta)?;
        match self.pseudocount {
            Some(sigma) => writeln!(f, "pseudocount: {}", sigma),
            None => writeln!(f, "pseudocount: none"),
        }
    }
}
