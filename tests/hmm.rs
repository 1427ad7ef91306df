//!
//! test of hmm decoders and learners against brute-force enumeration
//!
#[macro_use]
extern crate approx;

use seqhmm::hmm::mocks::{
    brute_force_best_path, brute_force_likelihood, mock_sticky, mock_switching, mock_three_state,
};
use seqhmm::hmm::HmmModel;
use seqhmm::learn::{baum_welch, viterbi_learning, LearnParams};
use test_case::test_case;

fn encode(model: &HmmModel, text: &str) -> Vec<usize> {
    model.symbols.encode(text).unwrap()
}

#[test_case(mock_sticky(), "x" ; "sticky single")]
#[test_case(mock_sticky(), "xyxy" ; "sticky xyxy")]
#[test_case(mock_switching(), "yyxy" ; "switching yyxy")]
#[test_case(mock_three_state(), "xzy" ; "three state xzy")]
#[test_case(mock_three_state(), "zzxy" ; "three state zzxy")]
fn forward_matches_brute_force(model: HmmModel, text: &str) {
    let x = encode(&model, text);
    let p = model.likelihood(&x).unwrap();
    assert_relative_eq!(p, brute_force_likelihood(&model, &x), max_relative = 1e-12);
    let o = model.run(&x).unwrap();
    assert_relative_eq!(o.full_prob_backward(), p, max_relative = 1e-12);
}

#[test_case(mock_sticky(), "xyyx" ; "sticky xyyx")]
#[test_case(mock_switching(), "xyxy" ; "switching xyxy")]
#[test_case(mock_three_state(), "yzzx" ; "three state yzzx")]
fn viterbi_is_optimal(model: HmmModel, text: &str) {
    let x = encode(&model, text);
    let path = model.viterbi_path(&x).unwrap();
    assert_eq!(path.len(), x.len());
    let (_, best) = brute_force_best_path(&model, &x);
    assert_relative_eq!(model.joint_prob(&x, &path).unwrap(), best, max_relative = 1e-12);
}

#[test]
fn switching_fixture_decodes_alternating() {
    let m = mock_switching();
    let path = m.viterbi_path(&encode(&m, "xyxy")).unwrap();
    assert_eq!(m.states.decode(&path, ""), "ABAB");
}

#[test_case(mock_sticky(), "xxyyx" ; "sticky")]
#[test_case(mock_three_state(), "zyxxzy" ; "three state")]
fn posterior_rows_sum_to_one(model: HmmModel, text: &str) {
    let x = encode(&model, text);
    let posteriors = model.soft_decode(&x).unwrap();
    assert_eq!(posteriors.dim(), (x.len(), model.n_states()));
    for row in posteriors.outer_iter() {
        assert_abs_diff_eq!(row.sum(), 1.0, epsilon = 1e-9);
    }
}

#[test]
fn baum_welch_improves_likelihood() {
    let m = mock_three_state();
    let x = encode(&m, "xzyyzzxzyxxyzyxzzyxy");
    let training = baum_welch(&m, &x, &LearnParams::new(5).unwrap()).unwrap();
    let ps = &training.history.likelihoods;
    assert_eq!(ps.len(), 6);
    for w in ps.windows(2) {
        assert!(w[1] >= w[0] * (1.0 - 1e-12), "{} < {}", w[1], w[0]);
    }
    assert!(training.estimate.model.is_stochastic(1e-9));
}

#[test]
fn viterbi_learning_keeps_tables_stochastic() {
    let m = mock_sticky();
    let x = encode(&m, "xxxyyyxxyyxyxx");
    let training = viterbi_learning(&m, &x, &LearnParams::new(10).unwrap()).unwrap();
    assert_eq!(training.history.n_rounds(), 10);
    for model in training.history.models.iter() {
        assert!(model.is_stochastic(1e-9));
    }
}
