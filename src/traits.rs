//! Trait seams of the crate: the DP sweep and the alignment strategy.
//!
//! A [`Sweep`] fills one banded edit-distance matrix. Two implementations
//! exist, [`ScalarSweep`](crate::kernel::ScalarSweep) (row by row) and
//! [`LaneSweep`](crate::kernel::LaneSweep) (anti-diagonal by anti-diagonal,
//! eight diagonals per vector step). The kernel picks one per call and
//! monomorphises over it, so tests can run both on the same inputs.
//!
//! Contract every implementation must honour:
//! - cells outside `band` or outside the `(n+1) x (m+1)` matrix are infinite;
//! - `cell(0,0) = 0` and every other in-band cell takes the minimum of
//!   `diag + cost`, `up + 1`, `left + 1`;
//! - when `trace` is given, the winning term of each in-band cell except
//!   `(0,0)` is recorded in `trace` at that cell using
//!   [`Step`](crate::kernel::Step) codes, ties broken diagonal first, then
//!   up (deletion), then left (insertion);
//! - the return value is `cell(n, m)`.
//!
//! Two conforming implementations therefore produce byte-identical traces.

use crate::config::Algorithm;
use crate::engine::AlignmentResult;
use crate::error::Result;
use crate::kernel::{Band, ChoiceMatrix};

pub trait Sweep {
    /// Short label used in logs.
    const NAME: &'static str;

    fn fill(
        band: &Band,
        pattern: &[u8],
        text: &[u8],
        trace: Option<&mut ChoiceMatrix<'_>>,
    ) -> u32;
}

/// One alignment strategy, configured once and applied to sequence pairs.
///
/// Implementations live in [`crate::aligners`]; [`crate::engine::align`]
/// picks one from [`AlignmentConfig::algorithm`](crate::config::AlignmentConfig::algorithm).
pub trait Aligner {
    fn algorithm(&self) -> Algorithm;

    /// Align `pattern` against `text`.
    ///
    /// Must return the edit cost of the produced trace as the score, and a
    /// trace (unless configured score-only) that replays exactly against
    /// both sequences.
    fn align(&self, pattern: &[u8], text: &[u8]) -> Result<AlignmentResult>;
}
