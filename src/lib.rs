//!
//! Discrete hidden Markov models over labelled alphabets
//!
//! * `hmm`: the model, Viterbi/forward/backward and posterior decoding
//! * `learn`: supervised estimation, Viterbi learning and Baum-Welch
//! * `profile`: profile HMM construction from an alignment and alignment to it
//! * `io`: tabular text documents and output formatting
//! * `cli`: subcommands of the `seqhmm` binary
//!
pub mod cli;
pub mod common;
pub mod error;
pub mod hmm;
pub mod io;
pub mod learn;
pub mod profile;

#[cfg(test)]
#[macro_use]
extern crate approx;
