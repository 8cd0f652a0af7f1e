//! Example: exact edit-distance alignment with every strategy.
//!
//! Run with:
//! `cargo run --example align`

use quicked::{align, Algorithm, AlignmentConfigBuilder, Cigar, EditOp};

fn main() {
    let s = b"GATTACAGATTACA";
    let t = b"GCATGCUGATTTACA";

    for algorithm in Algorithm::ALL {
        let config = match AlignmentConfigBuilder::new()
            .with_algorithm(algorithm)
            .build()
        {
            Ok(config) => config,
            Err(err) => {
                eprintln!("{algorithm}: {err}");
                continue;
            }
        };
        match align(s, t, &config) {
            Ok(result) => {
                println!("{algorithm}: score {}", result.score());
                if let Some(cigar) = result.cigar() {
                    println!("  CIGAR: {cigar}");
                    let (aln_s, marks, aln_t) = materialize_alignment(s, t, cigar);
                    println!("  S': {aln_s}");
                    println!("      {marks}");
                    println!("  T': {aln_t}");
                }
            }
            Err(err) => println!("{algorithm}: {err}"),
        }
    }
}

/// Gapped rows for display: pattern, match markers, text.
fn materialize_alignment(s: &[u8], t: &[u8], cigar: &Cigar) -> (String, String, String) {
    let (mut out_s, mut marks, mut out_t) = (String::new(), String::new(), String::new());
    let (mut i, mut j) = (0usize, 0usize);
    for op in cigar.ops() {
        match op {
            EditOp::Match | EditOp::Mismatch => {
                out_s.push(s[i] as char);
                out_t.push(t[j] as char);
                marks.push(if op == EditOp::Match { '|' } else { '.' });
                i += 1;
                j += 1;
            }
            EditOp::Deletion => {
                out_s.push(s[i] as char);
                out_t.push('-');
                marks.push(' ');
                i += 1;
            }
            EditOp::Insertion => {
                out_s.push('-');
                out_t.push(t[j] as char);
                marks.push(' ');
                j += 1;
            }
        }
    }
    (out_s, marks, out_t)
}
