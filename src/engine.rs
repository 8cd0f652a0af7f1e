//! Alignment entry points.
//!
//! [`align`] validates the configuration, builds the aligner it names and
//! runs it on one sequence pair. [`align_batch`] does the same for many
//! pairs; with the `parallel` feature the pairs are spread over the rayon
//! pool, each worker owning its own DP storage.
//!
//! ```
//! use quicked::{align, AlignmentConfig};
//!
//! let result = align(b"ACGT", b"ACTT", &AlignmentConfig::default()).unwrap();
//! assert_eq!(result.score(), 1);
//! assert_eq!(result.cigar_string().as_deref(), Some("2M1X1M"));
//! ```

use crate::aligners::{Banded, Hirschberg, Quicked, Windowed};
use crate::cigar::Cigar;
use crate::config::{Algorithm, AlignmentConfig};
use crate::error::Result;
use crate::traits::Aligner;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Bookkeeping about how a result was obtained.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AlignmentStats {
    /// Band half-width of the last kernel call (QUICKED, BANDED).
    pub final_bandwidth: Option<usize>,
    /// Number of kernel calls made by the bound-and-align loop.
    pub probes: usize,
    /// Number of windows aligned (WINDOWED).
    pub windows: usize,
    /// Windows whose banded score crossed the HEW threshold (WINDOWED).
    pub hew_windows: usize,
}

/// Outcome of one alignment call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlignmentResult {
    algorithm: Algorithm,
    score: u32,
    cigar: Option<Cigar>,
    stats: AlignmentStats,
}

impl AlignmentResult {
    pub(crate) fn new(
        algorithm: Algorithm,
        score: u32,
        cigar: Option<Cigar>,
        stats: AlignmentStats,
    ) -> Self {
        debug_assert!(cigar.as_ref().map_or(true, |c| c.edit_cost() == score));
        Self {
            algorithm,
            score,
            cigar,
            stats,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Edit distance (exact for every algorithm but WINDOWED).
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Alignment trace; `None` in score-only mode.
    pub fn cigar(&self) -> Option<&Cigar> {
        self.cigar.as_ref()
    }

    /// Alignment trace serialised as count + letter pairs.
    pub fn cigar_string(&self) -> Option<String> {
        self.cigar.as_ref().map(Cigar::to_string)
    }

    pub fn stats(&self) -> &AlignmentStats {
        &self.stats
    }

    pub fn into_cigar(self) -> Option<Cigar> {
        self.cigar
    }
}

/// Align `pattern` against `text` with the algorithm selected by `config`.
pub fn align(pattern: &[u8], text: &[u8], config: &AlignmentConfig) -> Result<AlignmentResult> {
    #[cfg(feature = "tracing")]
    let span = tracing::info_span!(
        "align",
        algorithm = %config.algorithm(),
        pattern_len = pattern.len(),
        text_len = text.len()
    );
    #[cfg(feature = "tracing")]
    let _enter = span.enter();

    config.validate()?;
    let result = match config.algorithm() {
        Algorithm::Quicked => Quicked::from_config(config).align(pattern, text),
        Algorithm::Windowed => Windowed::from_config(config).align(pattern, text),
        Algorithm::Banded => Banded::from_config(config).align(pattern, text),
        Algorithm::Hirschberg => Hirschberg::from_config(config).align(pattern, text),
    };

    #[cfg(feature = "tracing")]
    log_outcome(&result);
    result
}

#[cfg(feature = "tracing")]
fn log_outcome(result: &Result<AlignmentResult>) {
    match result {
        Ok(r) => tracing::debug!(algorithm = %r.algorithm(), score = r.score(), "alignment finished"),
        Err(err) => tracing::debug!(%err, "alignment failed"),
    }
}

/// Align every `(pattern, text)` pair, returning results in input order.
#[cfg(feature = "parallel")]
pub fn align_batch<P, T>(pairs: &[(P, T)], config: &AlignmentConfig) -> Vec<Result<AlignmentResult>>
where
    P: AsRef<[u8]> + Sync,
    T: AsRef<[u8]> + Sync,
{
    pairs
        .par_iter()
        .map(|(p, t)| align(p.as_ref(), t.as_ref(), config))
        .collect()
}

/// Align every `(pattern, text)` pair, returning results in input order.
#[cfg(not(feature = "parallel"))]
pub fn align_batch<P, T>(pairs: &[(P, T)], config: &AlignmentConfig) -> Vec<Result<AlignmentResult>>
where
    P: AsRef<[u8]>,
    T: AsRef<[u8]>,
{
    pairs
        .iter()
        .map(|(p, t)| align(p.as_ref(), t.as_ref(), config))
        .collect()
}
