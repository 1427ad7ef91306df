//!
//! test of profile HMM construction and alignment
//!
#[macro_use]
extern crate approx;

use seqhmm::common::Labels;
use seqhmm::profile::{MultipleAlignment, ProfileHmm, ProfileParams, ProfileState, StateKind};
use test_case::test_case;

fn dna() -> Labels {
    Labels::from_strs(&["A", "C", "G", "T"]).unwrap()
}

fn build(rows: &[&str], theta: f64, sigma: Option<f64>) -> ProfileHmm {
    let alignment = MultipleAlignment::from_strs(rows, &dna()).unwrap();
    let params = ProfileParams::new(theta, sigma).unwrap();
    ProfileHmm::from_alignment(&alignment, &dna(), &params).unwrap()
}

#[test_case(None ; "without pseudocount")]
#[test_case(Some(0.01) ; "with pseudocount")]
#[test_case(Some(0.1) ; "with large pseudocount")]
fn rows_are_stochastic(sigma: Option<f64>) {
    let p = build(&["ACAC", "ACGC", "A-AC", "AC-C"], 0.5, sigma);
    assert!(p.model.is_stochastic(1e-9));
    assert_eq!(p.model.n_states(), 3 * p.n_match() + 3);
}

#[test]
fn hand_computed_profile() {
    // all columns are match columns at theta 0.5
    let p = build(&["ACAC", "ACGC", "A-AC"], 0.5, None);
    assert_eq!(p.n_match(), 4);
    let (m, d) = (StateKind::Match, StateKind::Del);
    let st = ProfileState::new;
    assert_abs_diff_eq!(p.trans(ProfileState::Start, st(m, 1)), 1.0);
    assert_abs_diff_eq!(p.trans(st(m, 1), st(m, 2)), 2.0 / 3.0, epsilon = 1e-12);
    assert_abs_diff_eq!(p.trans(st(m, 1), st(d, 2)), 1.0 / 3.0, epsilon = 1e-12);
    assert_abs_diff_eq!(p.trans(st(d, 2), st(m, 3)), 1.0);
    assert_abs_diff_eq!(p.trans(st(m, 4), ProfileState::End), 1.0);
    let a = 0;
    let g = 2;
    assert_abs_diff_eq!(p.emit(st(m, 3), a), 2.0 / 3.0, epsilon = 1e-12);
    assert_abs_diff_eq!(p.emit(st(m, 3), g), 1.0 / 3.0, epsilon = 1e-12);
}

#[test_case(None ; "raw frequencies")]
#[test_case(Some(0.01) ; "pseudocount")]
fn align_query_through_insert_columns(sigma: Option<f64>) {
    let p = build(&["A--C", "AGGC", "A--C", "A-TC"], 0.5, sigma);
    assert_eq!(p.n_match(), 2);
    let a = p.align(&dna().encode("AGGGC").unwrap()).unwrap();
    assert_eq!(a.to_string(), "M1 I1 I1 I1 M2");
}

#[test_case("ACAC", "M1 M2 M3 M4" ; "training row")]
#[test_case("ACGC", "M1 M2 M3 M4" ; "another training row")]
#[test_case("AAC", "M1 D2 M3 M4" ; "deletion")]
fn align_query(query: &str, expected: &str) {
    let p = build(&["ACAC", "ACGC", "A-AC"], 0.5, Some(0.01));
    let a = p.align(&dna().encode(query).unwrap()).unwrap();
    assert_eq!(a.to_string(), expected);
    assert!(a.prob > 0.0 && a.prob <= 1.0);
}
