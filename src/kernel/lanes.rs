//! Anti-diagonal banded sweep on eight `i32` lanes.
//!
//! Cells on one anti-diagonal `s = i + j` depend only on anti-diagonals
//! `s - 1` and `s - 2`, so a whole anti-diagonal of the band can be computed
//! in lock-step. Each anti-diagonal is stored by row: for consecutive rows
//! `i`, the predecessors `(i-1, j-1)`, `(i-1, j)` and `(i, j-1)` sit at
//! consecutive slots of the two previous anti-diagonals, and the symbol
//! pairs `pattern[i-1]`, `text[j-1]` are consecutive in the pattern and in
//! the reversed text. Scores, substitution costs and choice codes are all
//! computed eight cells at a time.

use wide::{i32x8, CmpEq, CmpGt};

use crate::kernel::{select, Band, ChoiceMatrix, Step, INF};
use crate::traits::Sweep;

const LANES: usize = 8;

/// Vector-lane sweep. Produces the same scores and traces as
/// [`ScalarSweep`](crate::kernel::ScalarSweep).
pub struct LaneSweep;

/// Cells of one anti-diagonal. Row `r` lives at slot `r - first + 1`;
/// slots `0` and `len + 1` are infinite.
struct AntiDiagonal {
    first: usize,
    cells: Vec<i32>,
}

impl AntiDiagonal {
    fn new(capacity: usize) -> Self {
        Self {
            first: 0,
            cells: vec![INF; capacity + 2],
        }
    }

    #[inline]
    fn reset(&mut self, first: usize, len: usize) {
        self.first = first;
        self.cells[0] = INF;
        self.cells[len + 1] = INF;
    }

    /// Slot of row `i - 1`; slot of row `i` is one further.
    #[inline(always)]
    fn slot_before(&self, i: usize) -> usize {
        i - self.first
    }
}

#[inline(always)]
fn load(values: &[i32]) -> i32x8 {
    let mut lanes = [0i32; LANES];
    lanes.copy_from_slice(&values[..LANES]);
    i32x8::new(lanes)
}

impl Sweep for LaneSweep {
    const NAME: &'static str = "lanes";

    fn fill(
        band: &Band,
        pattern: &[u8],
        text: &[u8],
        mut trace: Option<&mut ChoiceMatrix<'_>>,
    ) -> u32 {
        let (n, m) = (band.rows(), band.cols());
        // pat[i] = pattern[i - 1], rev[m - j] = text[j - 1]; the sentinels
        // at row 0 / column 0 never match and only meet infinite diagonals.
        let pat: Vec<i32> = std::iter::once(-1)
            .chain(pattern.iter().map(|&b| i32::from(b)))
            .collect();
        let rev: Vec<i32> = text
            .iter()
            .rev()
            .map(|&b| i32::from(b))
            .chain(std::iter::once(-2))
            .collect();

        let capacity = band.max_antidiagonal_len();
        let mut back2 = AntiDiagonal::new(capacity);
        let mut back1 = AntiDiagonal::new(capacity);
        let mut curr = AntiDiagonal::new(capacity);

        let zero = i32x8::splat(0);
        let one = i32x8::splat(1);
        let inf = i32x8::splat(INF);
        let diag_code = i32x8::splat(Step::Diagonal as i32);
        let up_code = i32x8::splat(Step::Up as i32);
        let left_code = i32x8::splat(Step::Left as i32);

        for s in 0..=n + m {
            let (i0, i1) = band.antidiagonal_rows(s);
            curr.reset(i0, i1 + 1 - i0);

            if s == 0 {
                curr.cells[1] = 0;
            } else {
                let mut i = i0;
                while i + LANES <= i1 + 1 {
                    let cost = load(&pat[i..])
                        .cmp_eq(load(&rev[m - (s - i)..]))
                        .blend(zero, one);
                    let diag = load(&back2.cells[back2.slot_before(i)..]) + cost;
                    let up = load(&back1.cells[back1.slot_before(i)..]) + one;
                    let left = load(&back1.cells[back1.slot_before(i) + 1..]) + one;
                    let value = diag.min(up).min(left).min(inf);
                    let slot = i - i0 + 1;
                    curr.cells[slot..slot + LANES].copy_from_slice(&value.to_array());

                    if let Some(trace) = trace.as_deref_mut() {
                        let diag_wins = !(diag.cmp_gt(up) | diag.cmp_gt(left));
                        let up_wins = !up.cmp_gt(left);
                        let codes = diag_wins
                            .blend(diag_code, up_wins.blend(up_code, left_code))
                            .to_array();
                        for (lane, &code) in codes.iter().enumerate() {
                            let row = i + lane;
                            trace.set_code(row, s - row, code as u8);
                        }
                    }
                    i += LANES;
                }
                while i <= i1 {
                    let cost = i32::from(pat[i] != rev[m - (s - i)]);
                    let diag = back2.cells[back2.slot_before(i)] + cost;
                    let up = back1.cells[back1.slot_before(i)] + 1;
                    let left = back1.cells[back1.slot_before(i) + 1] + 1;
                    let (value, step) = select(diag, up, left);
                    curr.cells[i - i0 + 1] = value;
                    if let Some(trace) = trace.as_deref_mut() {
                        trace.set(i, s - i, step);
                    }
                    i += 1;
                }
            }

            // back2 <- back1 <- curr, recycling the oldest buffer.
            std::mem::swap(&mut back2, &mut back1);
            std::mem::swap(&mut back1, &mut curr);
        }

        back1.cells[back1.slot_before(n) + 1] as u32
    }
}
