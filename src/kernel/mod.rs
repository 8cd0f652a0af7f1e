//! Banded edit-distance kernel.
//!
//! [`align_band`] runs one banded DP (see [`Band`]) with the sweep chosen by
//! [`Execution`], optionally records per-cell choices and rebuilds the
//! alignment from them. Every aligner in [`crate::aligners`] goes through
//! here.

pub mod band;
mod lanes;
mod scalar;

pub use band::{Band, BandBuffer, ChoiceMatrix};
pub use lanes::LaneSweep;
pub use scalar::ScalarSweep;

use crate::cigar::Cigar;
use crate::error::{QuickedError, Result};
use crate::scoring::{compare, EditOp};
use crate::traits::Sweep;

/// Stand-in for an unreachable cell. Small enough that `INF + 1` cannot
/// overflow, large enough that no real edit distance reaches it.
pub(crate) const INF: i32 = i32::MAX / 4;

/// Winning term of a cell, as stored in the choice buffer. `0` marks a cell
/// without a predecessor (the origin, or a cell never visited).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Step {
    /// From `(i-1, j-1)`: match or mismatch.
    Diagonal = 1,
    /// From `(i-1, j)`: deletion.
    Up = 2,
    /// From `(i, j-1)`: insertion.
    Left = 3,
}

impl Step {
    #[inline(always)]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Step::Diagonal),
            2 => Some(Step::Up),
            3 => Some(Step::Left),
            _ => None,
        }
    }
}

/// Minimum of the three recurrence terms with the fixed tie-break order
/// diagonal, up, left. Values are clamped to [`INF`].
#[inline(always)]
pub(crate) fn select(diag: i32, up: i32, left: i32) -> (i32, Step) {
    let (value, step) = if diag <= up && diag <= left {
        (diag, Step::Diagonal)
    } else if up <= left {
        (up, Step::Up)
    } else {
        (left, Step::Left)
    };
    (value.min(INF), step)
}

/// Which sweep implementation fills the band.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Execution {
    Scalar,
    Lanes,
}

impl Execution {
    pub fn from_force_scalar(force_scalar: bool) -> Self {
        if force_scalar {
            Execution::Scalar
        } else {
            Execution::Lanes
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Execution::Scalar => ScalarSweep::NAME,
            Execution::Lanes => LaneSweep::NAME,
        }
    }
}

/// Result of one banded DP.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BandOutcome {
    /// Best score inside the band. Always an upper bound on the edit
    /// distance; equal to it when `certified`.
    pub score: u32,
    /// Whether the band provably contains an optimal path.
    pub certified: bool,
    /// Alignment realising `score`, when traceback was requested.
    pub cigar: Option<Cigar>,
}

impl BandOutcome {
    /// Convert an uncertified outcome into [`QuickedError::BandTooNarrow`].
    pub fn into_certified(self, bandwidth: usize) -> Result<Self> {
        if self.certified {
            Ok(self)
        } else {
            Err(QuickedError::BandTooNarrow {
                bandwidth,
                upper_bound: self.score,
            })
        }
    }
}

/// Run one banded DP over `band`.
///
/// With `traceback`, choices go into `buffer` (resized as needed, its
/// allocation reused across calls) and the outcome carries the alignment.
/// A problem with an empty side has a single path and skips the sweep.
pub fn align_band(
    pattern: &[u8],
    text: &[u8],
    band: &Band,
    execution: Execution,
    traceback: bool,
    buffer: &mut BandBuffer,
) -> Result<BandOutcome> {
    debug_assert_eq!(band.rows(), pattern.len());
    debug_assert_eq!(band.cols(), text.len());
    if pattern.is_empty() || text.is_empty() {
        return Ok(gaps_only(pattern.len(), text.len(), band, traceback));
    }
    match execution {
        Execution::Scalar => run::<ScalarSweep>(pattern, text, band, traceback, buffer),
        Execution::Lanes => run::<LaneSweep>(pattern, text, band, traceback, buffer),
    }
}

fn run<S: Sweep>(
    pattern: &[u8],
    text: &[u8],
    band: &Band,
    traceback: bool,
    buffer: &mut BandBuffer,
) -> Result<BandOutcome> {
    let (score, cigar) = if traceback {
        let mut choices = buffer.prepare(band)?;
        let score = S::fill(band, pattern, text, Some(&mut choices));
        let cigar = trace_back(&choices, pattern, text)?;
        (score, Some(cigar))
    } else {
        (S::fill(band, pattern, text, None), None)
    };
    Ok(BandOutcome {
        score,
        certified: band.certifies(score),
        cigar,
    })
}

/// Outcome of a problem where one side is empty: `n` deletions or `m`
/// insertions.
fn gaps_only(n: usize, m: usize, band: &Band, traceback: bool) -> BandOutcome {
    let score = (n + m) as u32;
    let cigar = traceback.then(|| {
        let mut cigar = Cigar::new();
        if n > 0 {
            cigar.push_run(EditOp::Deletion, n as u32);
        }
        if m > 0 {
            cigar.push_run(EditOp::Insertion, m as u32);
        }
        cigar
    });
    BandOutcome {
        score,
        certified: band.certifies(score),
        cigar,
    }
}

/// Walk the recorded choices from `(n, m)` back to the origin.
pub(crate) fn trace_back(choices: &ChoiceMatrix<'_>, pattern: &[u8], text: &[u8]) -> Result<Cigar> {
    let band = choices.band();
    let (mut i, mut j) = (band.rows(), band.cols());
    let mut ops = Vec::with_capacity(i + j);
    while i > 0 || j > 0 {
        match choices.get(i, j) {
            Some(Step::Diagonal) => {
                ops.push(compare(pattern[i - 1], text[j - 1]));
                i -= 1;
                j -= 1;
            }
            Some(Step::Up) => {
                ops.push(EditOp::Deletion);
                i -= 1;
            }
            Some(Step::Left) => {
                ops.push(EditOp::Insertion);
                j -= 1;
            }
            None => {
                return Err(QuickedError::InvalidCigar(format!(
                    "traceback reached unvisited cell ({i}, {j})"
                )))
            }
        }
    }
    Ok(Cigar::from_ops(ops.into_iter().rev()))
}

/// Unrestricted score-only pass: edit distances from `pattern` to every
/// prefix of `text`, i.e. the last row of the full DP matrix.
pub fn score_profile(pattern: &[u8], text: &[u8]) -> Vec<u32> {
    let mut row: Vec<u32> = (0..=text.len() as u32).collect();
    for (i, &a) in pattern.iter().enumerate() {
        let mut diag = row[0];
        row[0] = i as u32 + 1;
        for (j, &b) in text.iter().enumerate() {
            let up = row[j + 1];
            let sub = diag + crate::scoring::substitution_cost(a, b);
            row[j + 1] = sub.min(up + 1).min(row[j] + 1);
            diag = up;
        }
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_both(s: &[u8], t: &[u8], w: usize) -> (BandOutcome, BandOutcome) {
        let band = Band::new(s.len(), t.len(), w);
        let mut buffer = BandBuffer::new();
        let a = align_band(s, t, &band, Execution::Scalar, true, &mut buffer).unwrap();
        let b = align_band(s, t, &band, Execution::Lanes, true, &mut buffer).unwrap();
        (a, b)
    }

    #[test]
    fn single_mismatch() {
        let (a, b) = run_both(b"ACGT", b"ACTT", 1);
        assert_eq!(a, b);
        assert_eq!(a.score, 1);
        assert!(a.certified);
        assert_eq!(a.cigar.unwrap().to_string(), "2M1X1M");
    }

    #[test]
    fn tie_break_prefers_diagonal_then_deletion() {
        // "A" vs "C": mismatch (1) beats deletion + insertion (2).
        let (a, _) = run_both(b"A", b"C", 1);
        assert_eq!(a.cigar.unwrap().to_string(), "1X");
        // "AA" vs "A": the last diagonal wins the tie at (2, 1), the first
        // pattern symbol is then deleted.
        let (a, _) = run_both(b"AA", b"A", 1);
        assert_eq!(a.cigar.unwrap().to_string(), "1D1M");
    }

    #[test]
    fn empty_sides() {
        let (a, _) = run_both(b"", b"ACGTA", 0);
        assert_eq!(a.score, 5);
        assert_eq!(a.cigar.unwrap().to_string(), "5I");
        let (a, _) = run_both(b"ACG", b"", 0);
        assert_eq!(a.score, 3);
        assert_eq!(a.cigar.unwrap().to_string(), "3D");
        let (a, _) = run_both(b"", b"", 0);
        assert_eq!(a.score, 0);
        assert!(a.cigar.unwrap().is_empty());
    }

    #[test]
    fn long_side_against_empty_skips_the_sweep() {
        let s = vec![b'A'; 100_000];
        let band = Band::new(s.len(), 0, 15);
        let mut buffer = BandBuffer::new();
        for execution in [Execution::Scalar, Execution::Lanes] {
            let outcome = align_band(&s, b"", &band, execution, true, &mut buffer).unwrap();
            assert_eq!(outcome.score, 100_000);
            assert!(outcome.certified);
            assert_eq!(outcome.cigar.unwrap().to_string(), "100000D");
        }
        assert_eq!(buffer.capacity(), 0);

        let band = Band::new(0, s.len(), 15);
        let outcome = align_band(b"", &s, &band, Execution::Lanes, true, &mut buffer).unwrap();
        assert_eq!(outcome.cigar.unwrap().to_string(), "100000I");
    }

    #[test]
    fn lopsided_lengths_trace_within_clipped_rows() {
        let s = vec![b'A'; 5_000];
        let t = vec![b'A'; 50];
        let (a, b) = run_both(&s, &t, 15);
        assert_eq!(a, b);
        assert_eq!(a.score, 4_950);
        assert!(a.certified);
        assert_eq!(a.cigar.unwrap().verify(&s, &t), Ok(4_950));
    }

    #[test]
    fn uncertified_band_is_reported() {
        let s = b"AAAAAAAAAA";
        let t = b"CCCCCAAAAA";
        let band = Band::new(s.len(), t.len(), 1);
        let outcome =
            align_band(s, t, &band, Execution::Lanes, false, &mut BandBuffer::new()).unwrap();
        assert_eq!(outcome.score, 5);
        assert!(!outcome.certified);
        assert_eq!(
            outcome.into_certified(1),
            Err(QuickedError::BandTooNarrow {
                bandwidth: 1,
                upper_bound: 5
            })
        );
    }

    #[test]
    fn traced_cigar_replays() {
        let s = b"GATTACAGATTACA";
        let t = b"GCATGCUGATTTACA";
        let (a, _) = run_both(s, t, 20);
        let cigar = a.cigar.unwrap();
        assert_eq!(cigar.verify(s, t), Ok(a.score));
    }

    #[test]
    fn profile_last_entry_is_distance() {
        assert_eq!(score_profile(b"ACGT", b"ACTT"), vec![4, 3, 2, 1, 1]);
        assert_eq!(score_profile(b"", b"AC"), vec![0, 1, 2]);
        assert_eq!(score_profile(b"AC", b""), vec![2]);
    }
}
