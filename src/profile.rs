//!
//! Profile HMM
//!
//! * `alignment`: multiple alignment and match/insert column classification
//! * `state`: profile states `S, I0, M1, D1, I1, ..., E` and their order
//! * `params`: `theta` and pseudocount
//! * `builder`: construct `ProfileHmm` from an alignment
//! * `aligner`: align a new sequence to the profile
//!
pub mod aligner;
pub mod alignment;
pub mod builder;
pub mod params;
pub mod state;

pub use aligner::ProfileAlignment;
pub use alignment::MultipleAlignment;
pub use builder::ProfileHmm;
pub use params::ProfileParams;
pub use state::{ProfileState, ProfileTopology, StateKind};
