//! Bound-and-align.
//!
//! The controller guesses a band half-width, aligns inside it and widens the
//! band only when the kernel cannot certify the result. On failure the bound
//! doubles, capped by the half-width that is certain to certify the banded
//! score just found. Work therefore stays within a constant factor of a
//! single pass at the final bound, and the final bound is at most about
//! twice what the true edit distance requires.
//!
//! One [`BandBuffer`] is reused across retries.

use crate::config::{Algorithm, AlignmentConfig};
use crate::engine::{AlignmentResult, AlignmentStats};
use crate::error::{QuickedError, Result};
use crate::kernel::{align_band, Band, BandBuffer, BandOutcome, Execution};
use crate::traits::Aligner;

#[derive(Clone, Debug)]
pub struct Quicked {
    /// Half-width of the first probe.
    pub seed_bandwidth: usize,
    pub execution: Execution,
    pub traceback: bool,
}

#[derive(Debug)]
enum BoundState {
    Probing { bound: usize },
    Found { bound: usize, outcome: BandOutcome },
    Exhausted { bound: usize },
}

/// Half-width of the probe following a failed probe at `bound`.
///
/// `certain` is the half-width guaranteed to certify the banded score of
/// the failed probe.
#[inline]
fn next_bound(bound: usize, certain: usize) -> usize {
    bound.saturating_mul(2).min(certain).max(bound + 1)
}

impl Quicked {
    pub fn new(seed_bandwidth: usize, execution: Execution, traceback: bool) -> Self {
        Self {
            seed_bandwidth,
            execution,
            traceback,
        }
    }

    pub fn from_config(config: &AlignmentConfig) -> Self {
        Self::new(
            config.bandwidth(),
            Execution::from_force_scalar(config.force_scalar()),
            !config.only_score(),
        )
    }
}

impl Aligner for Quicked {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Quicked
    }

    fn align(&self, pattern: &[u8], text: &[u8]) -> Result<AlignmentResult> {
        let (n, m) = (pattern.len(), text.len());
        let mut buffer = BandBuffer::new();
        let mut probes = 0usize;
        let mut state = BoundState::Probing {
            bound: self.seed_bandwidth.max(1),
        };

        loop {
            state = match state {
                BoundState::Probing { bound } => {
                    let band = Band::new(n, m, bound);
                    let outcome =
                        align_band(pattern, text, &band, self.execution, self.traceback, &mut buffer)?;
                    probes += 1;
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        bound,
                        score = outcome.score,
                        certified = outcome.certified,
                        sweep = self.execution.name(),
                        "bound probe"
                    );
                    if outcome.certified {
                        BoundState::Found { bound, outcome }
                    } else if band.covers_matrix() {
                        BoundState::Exhausted { bound }
                    } else {
                        let certain = Band::half_width_for(n, m, outcome.score);
                        BoundState::Probing {
                            bound: next_bound(bound, certain),
                        }
                    }
                }
                BoundState::Found { bound, outcome } => {
                    let stats = AlignmentStats {
                        final_bandwidth: Some(bound),
                        probes,
                        ..AlignmentStats::default()
                    };
                    return Ok(AlignmentResult::new(
                        self.algorithm(),
                        outcome.score,
                        outcome.cigar,
                        stats,
                    ));
                }
                BoundState::Exhausted { bound } => {
                    return Err(QuickedError::Exhausted { bound });
                }
            };
        }
    }
}
