//! Row-by-row banded sweep.

use crate::kernel::{select, Band, ChoiceMatrix, INF};
use crate::scoring::substitution_cost;
use crate::traits::Sweep;

/// Reference sweep: one row of the band at a time, one cell per step.
pub struct ScalarSweep;

impl Sweep for ScalarSweep {
    const NAME: &'static str = "scalar";

    fn fill(
        band: &Band,
        pattern: &[u8],
        text: &[u8],
        mut trace: Option<&mut ChoiceMatrix<'_>>,
    ) -> u32 {
        // Row cells are indexed by column: column j of a row starting at
        // column j0 lives at j - j0 + 1. Both ends are padding.
        let span = band.max_row_len() + 2;
        let mut prev = vec![INF; span];
        let mut curr = vec![INF; span];
        let mut prev_first = 0usize;

        for i in 0..=band.rows() {
            let (j0, j1) = band.row_cols(i);
            curr[0] = INF;
            curr[j1 - j0 + 2] = INF;
            for j in j0..=j1 {
                if i == 0 && j == 0 {
                    curr[1] = 0;
                    continue;
                }
                let diag = if i > 0 && j > 0 {
                    prev[j - prev_first] + substitution_cost(pattern[i - 1], text[j - 1]) as i32
                } else {
                    INF
                };
                let up = prev[j - prev_first + 1] + 1;
                let left = curr[j - j0] + 1;
                let (value, step) = select(diag, up, left);
                curr[j - j0 + 1] = value;
                if let Some(trace) = trace.as_deref_mut() {
                    trace.set(i, j, step);
                }
            }
            std::mem::swap(&mut prev, &mut curr);
            prev_first = j0;
        }

        prev[band.cols() - prev_first + 1] as u32
    }
}
