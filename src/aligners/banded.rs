//! Fixed-bandwidth alignment.
//!
//! One kernel call at the configured bandwidth. When the band cannot
//! certify its score the call fails with
//! [`BandTooNarrow`](crate::error::QuickedError::BandTooNarrow) instead of
//! returning a possibly sub-optimal alignment. Use it when a safe bandwidth
//! is known up front.

use crate::config::{Algorithm, AlignmentConfig};
use crate::engine::{AlignmentResult, AlignmentStats};
use crate::error::Result;
use crate::kernel::{align_band, Band, BandBuffer, Execution};
use crate::traits::Aligner;

#[derive(Clone, Debug)]
pub struct Banded {
    pub bandwidth: usize,
    pub execution: Execution,
    pub traceback: bool,
}

impl Banded {
    pub fn new(bandwidth: usize, execution: Execution, traceback: bool) -> Self {
        Self {
            bandwidth,
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

impl Aligner for Banded {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Banded
    }

    fn align(&self, pattern: &[u8], text: &[u8]) -> Result<AlignmentResult> {
        let band = Band::new(pattern.len(), text.len(), self.bandwidth);
        let outcome = align_band(
            pattern,
            text,
            &band,
            self.execution,
            self.traceback,
            &mut BandBuffer::new(),
        )?
        .into_certified(self.bandwidth)?;
        let stats = AlignmentStats {
            final_bandwidth: Some(self.bandwidth),
            probes: 1,
            ..AlignmentStats::default()
        };
        Ok(AlignmentResult::new(
            self.algorithm(),
            outcome.score,
            outcome.cigar,
            stats,
        ))
    }
}
