//!
//! end-to-end test of subcommands on input documents
//!
#[macro_use]
extern crate approx;

use seqhmm::cli::{self, OutputStyle};
use seqhmm::io::{read_string, write_string};

const ESTIMATION: &str = "yzzzyxzxxx
--------
x   y   z
--------
BBABABABAB
--------
A   B   C
";

#[test]
fn estimate_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("estimation.txt");
    let path = path.to_str().unwrap();
    write_string(path, ESTIMATION).unwrap();
    let text = read_string(path).unwrap();
    let output = cli::estimate(&text, OutputStyle::Text).unwrap();
    assert_eq!(
        output,
        "\tA\tB\tC
A\t0\t1.0\t0
B\t0.8\t0.2\t0
C\t0.333\t0.333\t0.333
--------
\tx\ty\tz
A\t0.25\t0.25\t0.5
B\t0.5\t0.167\t0.333
C\t0.333\t0.333\t0.333
"
    );
}

#[test]
fn estimate_json_reports_degenerate_rows() {
    let output = cli::estimate(ESTIMATION, OutputStyle::Json).unwrap();
    let v: serde_json::Value = serde_json::from_str(&output).unwrap();
    let rows = v["degenerate_rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["table"], "Transition");
    assert_eq!(rows[0]["state"], "C");
    assert_eq!(rows[1]["table"], "Emission");
}

#[test]
fn path_prob_of_document() {
    let text = "AABB
--------
A   B
--------
    A   B
A   0.9 0.1
B   0.1 0.9
";
    let output = cli::path_prob(text, OutputStyle::Text).unwrap();
    let p: f64 = output.trim().parse().unwrap();
    assert_abs_diff_eq!(p, 0.5 * 0.9 * 0.1 * 0.9, epsilon = 1e-15);
}

#[test]
fn align_document() {
    let text = "ACAC
--------
0.5 0.01
--------
A   C   G   T
--------
ACAC
ACGC
A-AC
";
    assert_eq!(cli::align(text, None, OutputStyle::Text).unwrap(), "M1 M2 M3 M4\n");
}

#[test]
fn learning_documents() {
    let text = "3
--------
xyxxyyxyyx
--------
x   y
--------
A   B
--------
    A   B
A   0.9 0.1
B   0.1 0.9
--------
    x   y
A   0.8 0.2
B   0.2 0.8
";
    for output in [
        cli::viterbi_learn(text, OutputStyle::Text).unwrap(),
        cli::baum_welch(text, OutputStyle::Text).unwrap(),
    ] {
        let sections: Vec<&str> = output.split("--------\n").collect();
        assert_eq!(sections.len(), 2);
        assert!(sections[0].starts_with("\tA\tB\n"));
        assert!(sections[1].starts_with("\tx\ty\n"));
    }
}
