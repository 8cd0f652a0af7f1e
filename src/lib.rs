//! QuickEd: exact edit-distance alignment.
//!
//! This crate computes the edit distance between two byte sequences (unit
//! costs for mismatch, insertion and deletion) together with an optimal
//! alignment in CIGAR form.
//!
//! ## Core idea
//! 1. Guess a band half-width and fill only the DP cells inside that band.
//! 2. If the banded score is small enough relative to the band, it is
//!    provably the true distance; otherwise widen the band and retry.
//! 3. Rebuild the alignment from per-cell choices stored inside the band.
//!
//! Memory and time grow with the band, not with the full matrix, so similar
//! sequences align in close to linear time.
//!
//! ## Quick start
//! ```
//! use quicked::{align, Algorithm, AlignmentConfigBuilder};
//!
//! let config = AlignmentConfigBuilder::new()
//!     .with_algorithm(Algorithm::Quicked)
//!     .build()
//!     .unwrap();
//! let result = align(b"GATTACA", b"GCATGCU", &config).unwrap();
//! assert_eq!(result.score(), 4);
//! assert!(result.cigar().is_some());
//! ```
//!
//! ## Algorithms
//! The [`aligners`] module holds the strategies selectable through
//! [`Algorithm`]:
//! - QuickEd bound-and-align (default, exact)
//! - a single fixed band (exact or an error)
//! - overlapping windows with high-error-window fallback (approximate)
//! - Hirschberg divide and conquer (exact, linear space)

pub mod aligners;
pub mod builder;
pub mod cigar;
pub mod config;
pub mod engine;
pub mod error;
pub mod kernel;
pub mod scoring;
pub mod traits;
pub mod utils;

pub use crate::builder::AlignmentConfigBuilder;
pub use crate::cigar::Cigar;
pub use crate::config::{Algorithm, AlignmentConfig, HewThreshold};
pub use crate::engine::{align, align_batch, AlignmentResult, AlignmentStats};
pub use crate::error::{QuickedError, Result};
pub use crate::scoring::EditOp;
pub use crate::traits::{Aligner, Sweep};
