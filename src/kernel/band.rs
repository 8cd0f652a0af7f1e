//! Band geometry and choice storage.
//!
//! A band is a contiguous range of diagonals `d = j - i` in `[lo, hi]`,
//! where `i` indexes the pattern and `j` the text. Choices are stored one
//! byte per in-band cell, row-major, each row clipped to the matrix. A row
//! therefore never holds more than `m + 1` bytes, however far apart `n`
//! and `m` are.

use crate::error::{QuickedError, Result};
use crate::kernel::Step;

/// Diagonal range of a banded DP over an `n x m` problem.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Band {
    n: usize,
    m: usize,
    half_width: usize,
    lo: isize,
    hi: isize,
}

impl Band {
    /// Band of half-width `half_width` around the diagonals joining the
    /// start corner (diagonal 0) and the end corner (diagonal `m - n`).
    pub fn new(n: usize, m: usize, half_width: usize) -> Self {
        let half_width = half_width.min(n + m);
        let delta = m as isize - n as isize;
        let w = half_width as isize;
        let lo = (delta.min(0) - w).max(-(n as isize));
        let hi = (delta.max(0) + w).min(m as isize);
        Self {
            n,
            m,
            half_width,
            lo,
            hi,
        }
    }

    /// Band spanning every cell of the matrix.
    pub fn full(n: usize, m: usize) -> Self {
        Self::new(n, m, n + m)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.m
    }

    #[inline]
    pub fn half_width(&self) -> usize {
        self.half_width
    }

    #[inline]
    pub fn lo(&self) -> isize {
        self.lo
    }

    #[inline]
    pub fn hi(&self) -> isize {
        self.hi
    }

    /// Number of diagonals in the band.
    #[inline]
    pub fn width(&self) -> usize {
        (self.hi - self.lo + 1) as usize
    }

    /// `|m - n|`: the number of gaps any alignment must contain.
    #[inline]
    pub fn length_gap(&self) -> usize {
        self.n.abs_diff(self.m)
    }

    pub fn covers_matrix(&self) -> bool {
        self.lo == -(self.n as isize) && self.hi == self.m as isize
    }

    /// Number of choice bytes needed for a traceback over this band: the
    /// in-matrix cells of every row, `None` on overflow.
    pub fn cells(&self) -> Option<usize> {
        (0..=self.n).try_fold(0usize, |acc, i| acc.checked_add(self.row_len(i)))
    }

    /// Whether a banded score is guaranteed to be the unrestricted optimum.
    ///
    /// A path that leaves the band must visit a diagonal `half_width + 1`
    /// beyond one of the two corner diagonals, and so carries at least
    /// `|m - n| + 2 * (half_width + 1)` gaps.
    pub fn certifies(&self, score: u32) -> bool {
        if self.covers_matrix() {
            return true;
        }
        let escape_cost = self.length_gap() as u64 + 2 * (self.half_width as u64 + 1);
        (score as u64) < escape_cost
    }

    /// Smallest half-width whose band is certain to certify a problem whose
    /// edit distance is at most `upper_bound`.
    pub fn half_width_for(n: usize, m: usize, upper_bound: u32) -> usize {
        let excess = (upper_bound as usize).saturating_sub(n.abs_diff(m));
        excess.div_ceil(2)
    }

    /// Inclusive column range `(j0, j1)` of the in-band cells of row `i`.
    ///
    /// Never empty: the band holds a monotone path from `(0, 0)` to
    /// `(n, m)`, which meets every row.
    #[inline]
    pub(crate) fn row_cols(&self, i: usize) -> (usize, usize) {
        let i = i as isize;
        let first = (i + self.lo).max(0);
        let last = (i + self.hi).min(self.m as isize);
        (first as usize, last as usize)
    }

    #[inline]
    pub(crate) fn row_len(&self, i: usize) -> usize {
        let (j0, j1) = self.row_cols(i);
        j1 - j0 + 1
    }

    /// Upper bound on [`row_len`](Self::row_len) over all rows.
    #[inline]
    pub(crate) fn max_row_len(&self) -> usize {
        self.width().min(self.m + 1)
    }

    /// Inclusive row range `(i0, i1)` of the in-band cells of anti-diagonal
    /// `s = i + j`. Empty (`i0 == i1 + 1`) only when the band is a single
    /// diagonal and `s` is odd.
    #[inline]
    pub(crate) fn antidiagonal_rows(&self, s: usize) -> (usize, usize) {
        let s = s as isize;
        let (n, m) = (self.n as isize, self.m as isize);
        let first = 0.max(s - m).max((s - self.hi + 1).div_euclid(2));
        let last = n.min(s).min((s - self.lo).div_euclid(2));
        (first as usize, last as usize)
    }

    /// Upper bound on the number of in-band cells of one anti-diagonal.
    #[inline]
    pub(crate) fn max_antidiagonal_len(&self) -> usize {
        (self.width() / 2 + 1).min(self.n + 1).min(self.m + 1)
    }
}

/// Per-cell winning terms of one banded sweep.
///
/// Row `i` stores only its in-band columns `row_cols(i)`, one byte each,
/// starting at `starts[i]`. A zero byte is a cell without a predecessor.
pub struct ChoiceMatrix<'a> {
    band: Band,
    starts: &'a [usize],
    codes: &'a mut [u8],
}

impl ChoiceMatrix<'_> {
    #[inline(always)]
    fn index(&self, i: usize, j: usize) -> usize {
        let (j0, _) = self.band.row_cols(i);
        self.starts[i] + (j - j0)
    }

    #[inline(always)]
    pub(crate) fn set(&mut self, i: usize, j: usize, step: Step) {
        self.set_code(i, j, step as u8);
    }

    #[inline(always)]
    pub(crate) fn set_code(&mut self, i: usize, j: usize, code: u8) {
        let idx = self.index(i, j);
        self.codes[idx] = code;
    }

    /// Winning term recorded for cell `(i, j)`, which must lie in the band.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Option<Step> {
        Step::from_code(self.codes[self.index(i, j)])
    }

    pub fn band(&self) -> &Band {
        &self.band
    }

    /// Raw codes in storage order.
    pub fn codes(&self) -> &[u8] {
        self.codes
    }
}

/// Reusable choice storage for traceback-enabled sweeps.
#[derive(Debug, Default)]
pub struct BandBuffer {
    codes: Vec<u8>,
    starts: Vec<usize>,
}

impl BandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cleared storage for `band`, reusing the previous allocation when it
    /// is large enough.
    pub fn prepare(&mut self, band: &Band) -> Result<ChoiceMatrix<'_>> {
        let rows = band.rows() + 1;
        self.starts.clear();
        self.starts
            .try_reserve_exact(rows)
            .map_err(|_| QuickedError::AllocationFailure { cells: rows })?;
        let mut cells = 0usize;
        for i in 0..rows {
            self.starts.push(cells);
            cells = cells
                .checked_add(band.row_len(i))
                .ok_or(QuickedError::AllocationFailure { cells: usize::MAX })?;
        }

        self.codes.clear();
        self.codes
            .try_reserve_exact(cells)
            .map_err(|_| QuickedError::AllocationFailure { cells })?;
        self.codes.resize(cells, 0);
        Ok(ChoiceMatrix {
            band: *band,
            starts: &self.starts,
            codes: &mut self.codes,
        })
    }

    pub fn capacity(&self) -> usize {
        self.codes.capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_contains_both_corner_diagonals() {
        let band = Band::new(10, 14, 2);
        assert_eq!(band.lo(), -2);
        assert_eq!(band.hi(), 6);
        assert_eq!(band.width(), 9);
        assert!(!band.covers_matrix());

        let band = Band::new(14, 10, 2);
        assert_eq!(band.lo(), -6);
        assert_eq!(band.hi(), 2);
    }

    #[test]
    fn band_is_clamped_to_matrix() {
        let band = Band::new(3, 4, 100);
        assert_eq!(band.lo(), -3);
        assert_eq!(band.hi(), 4);
        assert!(band.covers_matrix());
        assert_eq!(band, Band::full(3, 4));
    }

    #[test]
    fn empty_problem_band() {
        let band = Band::new(0, 0, 5);
        assert_eq!(band.width(), 1);
        assert!(band.covers_matrix());
        assert_eq!(band.cells(), Some(1));
    }

    #[test]
    fn certification_threshold() {
        let band = Band::new(100, 100, 3);
        assert!(band.certifies(7));
        assert!(!band.certifies(8));
        let band = Band::new(100, 104, 3);
        assert!(band.certifies(11));
        assert!(!band.certifies(12));
    }

    #[test]
    fn half_width_for_upper_bound_certifies() {
        for (n, m, ub) in [(100, 100, 9u32), (50, 60, 10), (60, 50, 31), (10, 10, 0)] {
            let w = Band::half_width_for(n, m, ub);
            assert!(Band::new(n, m, w).certifies(ub), "n={n} m={m} ub={ub} w={w}");
        }
    }

    #[test]
    fn row_cols_stay_in_matrix_and_band() {
        let band = Band::new(6, 4, 1);
        for i in 0..=6 {
            let (j0, j1) = band.row_cols(i);
            assert!(j0 <= j1 && j1 <= 4, "row {i}: {j0}..={j1}");
            assert!(j0 as isize - i as isize >= band.lo());
            assert!(j1 as isize - i as isize <= band.hi());
            assert!(band.row_len(i) <= band.max_row_len());
        }
    }

    #[test]
    fn antidiagonal_rows_match_row_cols() {
        let shapes = [(5usize, 7usize, 1usize), (7, 5, 0), (9, 9, 2), (12, 3, 1), (0, 4, 3), (6, 6, 0)];
        for (n, m, w) in shapes {
            let band = Band::new(n, m, w);
            for s in 0..=n + m {
                let (i0, i1) = band.antidiagonal_rows(s);
                assert!(i0 <= i1 + 1, "n={n} m={m} w={w} s={s}");
                assert!(i1 + 1 - i0 <= band.max_antidiagonal_len());
                for i in 0..=n {
                    let (j0, j1) = band.row_cols(i);
                    let inside = s >= i && (j0..=j1).contains(&(s - i));
                    assert_eq!(inside, (i0..=i1).contains(&i), "n={n} m={m} w={w} s={s} i={i}");
                }
            }
        }
    }

    #[test]
    fn storage_is_clipped_to_the_matrix() {
        assert_eq!(Band::new(100_000, 0, 15).cells(), Some(100_001));
        assert_eq!(Band::new(0, 100_000, 15).cells(), Some(100_001));
        let band = Band::new(100_000, 1_000, 15);
        assert_eq!(band.max_row_len(), 1_001);
        assert!(band.cells().unwrap() <= 100_001 * 1_001);
        // a narrow square band keeps O(n * w) cells
        assert!(Band::new(10_000, 10_000, 4).cells().unwrap() <= 10_001 * 9);
    }

    #[test]
    fn buffer_reuses_allocation() {
        let mut buffer = BandBuffer::new();
        let big = Band::new(64, 64, 8);
        let len = buffer.prepare(&big).unwrap().codes().len();
        assert_eq!(len, big.cells().unwrap());
        let cap = buffer.capacity();
        let small = Band::new(16, 16, 2);
        let choices = buffer.prepare(&small).unwrap();
        assert_eq!(choices.codes().len(), small.cells().unwrap());
        assert!(choices.codes().iter().all(|&c| c == 0));
        assert_eq!(choices.get(16, 16), None);
        assert_eq!(buffer.capacity(), cap);
    }
}
