//! Alignment strategies.
//!
//! Each module implements [`Aligner`](crate::traits::Aligner) on top of the
//! banded kernel:
//! - [`quicked`]    : bound-and-align, widening the band until it certifies.
//! - [`banded`]     : one fixed band, failing when it cannot certify.
//! - [`windowed`]   : overlapping windows with HEW fallback (near-exact).
//! - [`hirschberg`] : linear-space divide and conquer.

pub mod banded;
pub mod hirschberg;
pub mod quicked;
pub mod windowed;

pub use banded::Banded;
pub use hirschberg::Hirschberg;
pub use quicked::Quicked;
pub use windowed::Windowed;
