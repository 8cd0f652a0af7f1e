//! Linear-space alignment by divide and conquer.
//!
//! A task `(pattern[a..b], text[p..q])` is split at the middle pattern row
//! `mid`. The forward profile holds the distances from the task's top-left
//! corner to every cell of row `mid`; the backward profile, computed on the
//! reversed lower half, holds the distances from those cells to the
//! bottom-right corner. Some optimal path crosses row `mid` at the column
//! minimising their sum, so the two quadrants can be solved independently.
//!
//! Tasks are kept on an explicit stack, left quadrant on top, so traces are
//! produced in order and at most one pending task exists per recursion
//! level. Small tasks are solved directly by the kernel with traceback;
//! tasks with an empty side become a single gap run.

use std::ops::Range;

use crate::cigar::Cigar;
use crate::config::{Algorithm, AlignmentConfig};
use crate::engine::{AlignmentResult, AlignmentStats};
use crate::error::Result;
use crate::kernel::{align_band, score_profile, Band, BandBuffer, Execution};
use crate::scoring::EditOp;
use crate::traits::Aligner;
use crate::utils::reversed;

/// Tasks spanning at most this many DP cells are aligned directly.
pub const DIRECT_CELLS: usize = 4096;

#[derive(Clone, Debug)]
pub struct Hirschberg {
    pub execution: Execution,
    pub traceback: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Task {
    pattern: Range<usize>,
    text: Range<usize>,
}

impl Task {
    fn is_direct(&self) -> bool {
        let rows = self.pattern.len();
        let cols = self.text.len();
        rows <= 1 || cols == 0 || rows.saturating_mul(cols) <= DIRECT_CELLS
    }
}

/// Column of `text` at which an optimal path crosses from `upper` into
/// `lower`, and the cost of that path.
pub fn split_column(upper: &[u8], lower: &[u8], text: &[u8]) -> (usize, u32) {
    let forward = score_profile(upper, text);
    let backward = score_profile(&reversed(lower), &reversed(text));
    let len = text.len();
    let mut best = (0usize, u32::MAX);
    for (j, &f) in forward.iter().enumerate() {
        let total = f + backward[len - j];
        if total < best.1 {
            best = (j, total);
        }
    }
    best
}

impl Hirschberg {
    pub fn new(execution: Execution, traceback: bool) -> Self {
        Self {
            execution,
            traceback,
        }
    }

    pub fn from_config(config: &AlignmentConfig) -> Self {
        Self::new(
            Execution::from_force_scalar(config.force_scalar()),
            !config.only_score(),
        )
    }

    fn trace(&self, pattern: &[u8], text: &[u8]) -> Result<Cigar> {
        let mut cigar = Cigar::new();
        let mut buffer = BandBuffer::new();
        let mut stack = vec![Task {
            pattern: 0..pattern.len(),
            text: 0..text.len(),
        }];

        while let Some(task) = stack.pop() {
            let sub_pattern = &pattern[task.pattern.clone()];
            let sub_text = &text[task.text.clone()];

            if sub_pattern.is_empty() || sub_text.is_empty() {
                if !sub_pattern.is_empty() {
                    cigar.push_run(EditOp::Deletion, sub_pattern.len() as u32);
                }
                if !sub_text.is_empty() {
                    cigar.push_run(EditOp::Insertion, sub_text.len() as u32);
                }
                continue;
            }
            if task.is_direct() {
                let band = Band::full(sub_pattern.len(), sub_text.len());
                let outcome =
                    align_band(sub_pattern, sub_text, &band, self.execution, true, &mut buffer)?;
                if let Some(part) = outcome.cigar {
                    cigar.append(&part);
                }
                continue;
            }

            let mid = task.pattern.start + task.pattern.len() / 2;
            let (offset, _cost) = split_column(
                &pattern[task.pattern.start..mid],
                &pattern[mid..task.pattern.end],
                sub_text,
            );
            let cross = task.text.start + offset;

            #[cfg(feature = "tracing")]
            tracing::trace!(
                rows = ?task.pattern,
                cols = ?task.text,
                mid,
                cross,
                "split task"
            );

            stack.push(Task {
                pattern: mid..task.pattern.end,
                text: cross..task.text.end,
            });
            stack.push(Task {
                pattern: task.pattern.start..mid,
                text: task.text.start..cross,
            });
        }

        Ok(cigar)
    }
}

impl Aligner for Hirschberg {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Hirschberg
    }

    fn align(&self, pattern: &[u8], text: &[u8]) -> Result<AlignmentResult> {
        if !self.traceback {
            let score = score_profile(pattern, text)[text.len()];
            return Ok(AlignmentResult::new(
                self.algorithm(),
                score,
                None,
                AlignmentStats::default(),
            ));
        }
        let cigar = self.trace(pattern, text)?;
        Ok(AlignmentResult::new(
            self.algorithm(),
            cigar.edit_cost(),
            Some(cigar),
            AlignmentStats::default(),
        ))
    }
}
