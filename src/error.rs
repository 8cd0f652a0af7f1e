//! Error type shared by every aligner.

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, QuickedError>;

/// Errors returned by the alignment engine.
///
/// An alignment call is atomic: it either yields a complete
/// [`AlignmentResult`](crate::engine::AlignmentResult) or one of these.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QuickedError {
    /// A configuration value is outside its domain, or two values conflict
    /// (e.g. `overlap_size >= window_size`).
    #[error("invalid configuration: {parameter}: {reason}")]
    InvalidConfiguration {
        parameter: &'static str,
        reason: String,
    },
    /// The fixed band of the BANDED algorithm cannot certify an optimal path.
    ///
    /// `upper_bound` is the best score found inside the band; the true edit
    /// distance is at most this value but may be lower.
    #[error("band too narrow: bandwidth {bandwidth} cannot certify an optimal alignment (banded score {upper_bound})")]
    BandTooNarrow { bandwidth: usize, upper_bound: u32 },
    /// Band or profile storage could not be reserved.
    #[error("failed to allocate DP storage for {cells} cells")]
    AllocationFailure { cells: usize },
    /// A CIGAR string could not be parsed or does not replay against the
    /// sequences it claims to align.
    #[error("invalid CIGAR: {0}")]
    InvalidCigar(String),
    /// The bound-and-align loop ran past a full-matrix band without a
    /// certified result. Unreachable for a correct kernel.
    #[error("bound search exhausted at bound {bound}")]
    Exhausted { bound: usize },
}

impl QuickedError {
    pub(crate) fn invalid(parameter: &'static str, reason: impl Into<String>) -> Self {
        QuickedError::InvalidConfiguration {
            parameter,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::QuickedError;

    #[test]
    fn messages_name_the_parameter() {
        let err = QuickedError::invalid("overlap_size", "must be smaller than window_size");
        assert_eq!(
            err.to_string(),
            "invalid configuration: overlap_size: must be smaller than window_size"
        );
    }

    #[test]
    fn band_too_narrow_reports_bound() {
        let err = QuickedError::BandTooNarrow {
            bandwidth: 1,
            upper_bound: 5,
        };
        assert!(err.to_string().contains("bandwidth 1"));
        assert!(err.to_string().contains("banded score 5"));
    }
}
