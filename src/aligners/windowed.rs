//! Windowed alignment with high-error-window (HEW) fallback.
//!
//! The matrix is covered by square windows of `window_size` symbols per
//! sequence. Each window is aligned inside a narrow band; only the first
//! `window_size - overlap_size` symbols of its trace are committed and the
//! next window starts where the committed part ends. The tail that is not
//! committed was computed against the window's artificial end corner and is
//! recomputed by the next window. The last window (reaching both sequence
//! ends) is committed whole.
//!
//! A window whose banded score exceeds the HEW threshold is likely to hide
//! an indel outside the band. It is counted in
//! [`AlignmentStats::hew_windows`] and, when fallback is enabled,
//! re-aligned over the full window.
//!
//! The result is a valid alignment of the whole pair, so its score is an
//! upper bound on the edit distance. It is not guaranteed to be optimal.

use crate::cigar::Cigar;
use crate::config::{Algorithm, AlignmentConfig, HewThreshold};
use crate::engine::{AlignmentResult, AlignmentStats};
use crate::error::{QuickedError, Result};
use crate::kernel::{align_band, Band, BandBuffer, BandOutcome, Execution};
use crate::traits::Aligner;

#[derive(Clone, Debug)]
pub struct Windowed {
    pub window_size: usize,
    pub overlap_size: usize,
    pub bandwidth: usize,
    pub execution: Execution,
    pub hew_threshold: HewThreshold,
    /// Re-align HEW windows without a band.
    pub hew_fallback: bool,
    pub traceback: bool,
}

/// Pattern and text offsets of the window being aligned.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
struct Anchor {
    pattern: usize,
    text: usize,
}

impl Windowed {
    pub fn from_config(config: &AlignmentConfig) -> Self {
        Self {
            window_size: config.window_size(),
            overlap_size: config.overlap_size(),
            bandwidth: config.bandwidth(),
            execution: Execution::from_force_scalar(config.force_scalar()),
            hew_threshold: config.hew_threshold(),
            hew_fallback: config.hew_fallback(),
            traceback: !config.only_score(),
        }
    }

    /// Symbols of either sequence a non-final window commits.
    fn step(&self) -> usize {
        self.window_size.saturating_sub(self.overlap_size).max(1)
    }

    fn align_window(
        &self,
        pattern: &[u8],
        text: &[u8],
        buffer: &mut BandBuffer,
        stats: &mut AlignmentStats,
    ) -> Result<Cigar> {
        let band = Band::new(pattern.len(), text.len(), self.bandwidth);
        let mut outcome = align_band(pattern, text, &band, self.execution, true, buffer)?;

        let threshold = self
            .hew_threshold
            .resolve(pattern.len().max(text.len()));
        if outcome.score > threshold {
            stats.hew_windows += 1;
            #[cfg(feature = "tracing")]
            tracing::debug!(score = outcome.score, threshold, "high-error window");
            if self.hew_fallback && !band.covers_matrix() {
                let full = Band::full(pattern.len(), text.len());
                outcome = align_band(pattern, text, &full, self.execution, true, buffer)?;
            }
        }

        let BandOutcome { cigar, .. } = outcome;
        cigar.ok_or_else(|| QuickedError::InvalidCigar("window aligned without a trace".into()))
    }
}

/// Copy the leading operations of `window` into `out` until `step` symbols
/// of either sequence are consumed. Returns the consumed `(pattern, text)`
/// lengths.
fn commit_prefix(window: &Cigar, step: usize, out: &mut Cigar) -> (usize, usize) {
    let (mut p, mut t) = (0usize, 0usize);
    for op in window.ops() {
        if p >= step || t >= step {
            break;
        }
        out.push(op);
        p += usize::from(op.consumes_pattern());
        t += usize::from(op.consumes_text());
    }
    (p, t)
}

impl Aligner for Windowed {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Windowed
    }

    fn align(&self, pattern: &[u8], text: &[u8]) -> Result<AlignmentResult> {
        let (n, m) = (pattern.len(), text.len());
        let step = self.step();
        let mut buffer = BandBuffer::new();
        let mut stats = AlignmentStats::default();
        let mut cigar = Cigar::new();
        let mut at = Anchor::default();

        loop {
            let pattern_end = (at.pattern + self.window_size).min(n);
            let text_end = (at.text + self.window_size).min(m);
            let last = pattern_end == n && text_end == m;

            #[cfg(feature = "tracing")]
            let span = tracing::trace_span!(
                "window",
                index = stats.windows,
                pattern_at = at.pattern,
                text_at = at.text
            );
            #[cfg(feature = "tracing")]
            let _enter = span.enter();

            stats.windows += 1;
            let window = self.align_window(
                &pattern[at.pattern..pattern_end],
                &text[at.text..text_end],
                &mut buffer,
                &mut stats,
            )?;

            if last {
                cigar.append(&window);
                break;
            }
            let (p, t) = commit_prefix(&window, step, &mut cigar);
            at.pattern += p;
            at.text += t;
        }

        let score = cigar.edit_cost();
        let cigar = self.traceback.then_some(cigar);
        Ok(AlignmentResult::new(self.algorithm(), score, cigar, stats))
    }
}
