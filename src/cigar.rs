//! Run-length alignment traces.
//!
//! A [`Cigar`] stores consecutive identical [`EditOp`]s as a single
//! `(op, count)` run and serialises as count + letter pairs, e.g. `2M1X1M`.
//! Runs are always maximal: two adjacent runs never carry the same op.

use std::fmt;
use std::str::FromStr;

use crate::error::{QuickedError, Result};
use crate::scoring::{compare, EditOp};

/// Compacted alignment trace.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cigar {
    runs: Vec<(EditOp, u32)>,
}

impl Cigar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compact a sequence of single-column operations.
    pub fn from_ops<I>(ops: I) -> Self
    where
        I: IntoIterator<Item = EditOp>,
    {
        let mut cigar = Self::new();
        for op in ops {
            cigar.push(op);
        }
        cigar
    }

    /// Append one column, extending the last run when it carries the same op.
    #[inline]
    pub fn push(&mut self, op: EditOp) {
        self.push_run(op, 1);
    }

    /// Append `count` columns of `op`.
    pub fn push_run(&mut self, op: EditOp, count: u32) {
        if count == 0 {
            return;
        }
        match self.runs.last_mut() {
            Some((last, n)) if *last == op => *n += count,
            _ => self.runs.push((op, count)),
        }
    }

    /// Concatenate another trace, merging the runs at the join.
    pub fn append(&mut self, other: &Cigar) {
        for &(op, count) in &other.runs {
            self.push_run(op, count);
        }
    }

    pub fn runs(&self) -> &[(EditOp, u32)] {
        &self.runs
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Expand the runs back into single columns.
    pub fn ops(&self) -> impl Iterator<Item = EditOp> + '_ {
        self.runs
            .iter()
            .flat_map(|&(op, count)| std::iter::repeat(op).take(count as usize))
    }

    /// Total edit cost of the trace.
    pub fn edit_cost(&self) -> u32 {
        self.runs.iter().map(|&(op, count)| op.cost() * count).sum()
    }

    /// Number of pattern symbols the trace consumes.
    pub fn pattern_len(&self) -> usize {
        self.runs
            .iter()
            .filter(|(op, _)| op.consumes_pattern())
            .map(|&(_, count)| count as usize)
            .sum()
    }

    /// Number of text symbols the trace consumes.
    pub fn text_len(&self) -> usize {
        self.runs
            .iter()
            .filter(|(op, _)| op.consumes_text())
            .map(|&(_, count)| count as usize)
            .sum()
    }

    /// Replay the trace against `pattern` and `text`.
    ///
    /// Checks that every M/X column agrees with the symbols it covers and
    /// that both sequences are consumed exactly. Returns the edit cost.
    pub fn verify(&self, pattern: &[u8], text: &[u8]) -> Result<u32> {
        let (mut i, mut j) = (0usize, 0usize);
        for op in self.ops() {
            match op {
                EditOp::Match | EditOp::Mismatch => {
                    let (Some(&a), Some(&b)) = (pattern.get(i), text.get(j)) else {
                        return Err(QuickedError::InvalidCigar(format!(
                            "{op} at ({i}, {j}) runs past the sequences"
                        )));
                    };
                    if compare(a, b) != op {
                        return Err(QuickedError::InvalidCigar(format!(
                            "{op} at ({i}, {j}) but symbols are {} and {}",
                            a as char, b as char
                        )));
                    }
                    i += 1;
                    j += 1;
                }
                EditOp::Deletion => {
                    if i >= pattern.len() {
                        return Err(QuickedError::InvalidCigar(format!(
                            "deletion at pattern offset {i} runs past the pattern"
                        )));
                    }
                    i += 1;
                }
                EditOp::Insertion => {
                    if j >= text.len() {
                        return Err(QuickedError::InvalidCigar(format!(
                            "insertion at text offset {j} runs past the text"
                        )));
                    }
                    j += 1;
                }
            }
        }
        if i != pattern.len() || j != text.len() {
            return Err(QuickedError::InvalidCigar(format!(
                "trace consumes ({i}, {j}) of ({}, {})",
                pattern.len(),
                text.len()
            )));
        }
        Ok(self.edit_cost())
    }
}

impl fmt::Display for Cigar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &(op, count) in &self.runs {
            write!(f, "{count}{}", op.letter())?;
        }
        Ok(())
    }
}

impl FromStr for Cigar {
    type Err = QuickedError;

    fn from_str(s: &str) -> Result<Self> {
        let mut cigar = Cigar::new();
        let mut count: Option<u32> = None;
        for ch in s.chars() {
            if let Some(digit) = ch.to_digit(10) {
                let next = count
                    .unwrap_or(0)
                    .checked_mul(10)
                    .and_then(|c| c.checked_add(digit))
                    .ok_or_else(|| QuickedError::InvalidCigar(format!("run length overflow in {s:?}")))?;
                count = Some(next);
            } else {
                let op = EditOp::from_letter(ch).ok_or_else(|| {
                    QuickedError::InvalidCigar(format!("unknown operation {ch:?} in {s:?}"))
                })?;
                let n = count.take().ok_or_else(|| {
                    QuickedError::InvalidCigar(format!("operation {ch:?} without a count in {s:?}"))
                })?;
                cigar.push_run(op, n);
            }
        }
        if count.is_some() {
            return Err(QuickedError::InvalidCigar(format!(
                "trailing count without an operation in {s:?}"
            )));
        }
        Ok(cigar)
    }
}
