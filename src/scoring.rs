//! Unit-cost edit model shared by every aligner.
//!
//! Pure Levenshtein distance: a match costs 0, a mismatch, an insertion
//! (symbol present only in the text) and a deletion (symbol present only in
//! the pattern) cost 1 each.

use std::fmt;

/// One column of an alignment.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EditOp {
    Match,
    Mismatch,
    /// Text symbol aligned to a gap in the pattern.
    Insertion,
    /// Pattern symbol aligned to a gap in the text.
    Deletion,
}

impl EditOp {
    /// Cost of this operation under unit-cost edit distance.
    #[inline(always)]
    pub const fn cost(self) -> u32 {
        match self {
            EditOp::Match => 0,
            EditOp::Mismatch | EditOp::Insertion | EditOp::Deletion => 1,
        }
    }

    /// CIGAR letter for this operation.
    #[inline(always)]
    pub const fn letter(self) -> char {
        match self {
            EditOp::Match => 'M',
            EditOp::Mismatch => 'X',
            EditOp::Insertion => 'I',
            EditOp::Deletion => 'D',
        }
    }

    /// Parse a CIGAR letter. `=` is accepted as an alias for `M`.
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'M' | '=' => Some(EditOp::Match),
            'X' => Some(EditOp::Mismatch),
            'I' => Some(EditOp::Insertion),
            'D' => Some(EditOp::Deletion),
            _ => None,
        }
    }

    /// Whether the operation consumes a pattern symbol.
    #[inline(always)]
    pub const fn consumes_pattern(self) -> bool {
        matches!(self, EditOp::Match | EditOp::Mismatch | EditOp::Deletion)
    }

    /// Whether the operation consumes a text symbol.
    #[inline(always)]
    pub const fn consumes_text(self) -> bool {
        matches!(self, EditOp::Match | EditOp::Mismatch | EditOp::Insertion)
    }
}

impl fmt::Display for EditOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Cost of opening or extending any gap.
pub const GAP_COST: u32 = 1;

/// Compare a pattern symbol against a text symbol.
#[inline(always)]
pub fn compare(pattern_symbol: u8, text_symbol: u8) -> EditOp {
    if pattern_symbol == text_symbol {
        EditOp::Match
    } else {
        EditOp::Mismatch
    }
}

/// Substitution cost of aligning two symbols.
#[inline(always)]
pub fn substitution_cost(pattern_symbol: u8, text_symbol: u8) -> u32 {
    compare(pattern_symbol, text_symbol).cost()
}
