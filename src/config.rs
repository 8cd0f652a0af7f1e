//! Alignment configuration.
//!
//! [`AlignmentConfig`] is a plain value: callers build one (directly through
//! the validated `set_*` methods or through
//! [`AlignmentConfigBuilder`](crate::builder::AlignmentConfigBuilder)) and lend
//! it to [`align`](crate::engine::align). It is `Send + Sync`, so one
//! configuration can serve many threads as long as nobody mutates it while an
//! alignment borrows it.

use std::fmt;
use std::str::FromStr;

use crate::error::{QuickedError, Result};
use crate::utils::nominal_prop;

/// Alignment strategy. All of them except [`Algorithm::Windowed`] return the
/// exact edit distance.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Bound-and-align: banded DP with an adaptively widened band.
    #[default]
    Quicked,
    /// Overlapping windows stitched together, with HEW fallback.
    Windowed,
    /// A single banded DP at a fixed bandwidth.
    Banded,
    /// Linear-space divide and conquer.
    Hirschberg,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Quicked,
        Algorithm::Windowed,
        Algorithm::Banded,
        Algorithm::Hirschberg,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Algorithm::Quicked => "quicked",
            Algorithm::Windowed => "windowed",
            Algorithm::Banded => "banded",
            Algorithm::Hirschberg => "hirschberg",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = QuickedError;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "quicked" => Ok(Algorithm::Quicked),
            "windowed" => Ok(Algorithm::Windowed),
            "banded" => Ok(Algorithm::Banded),
            "hirschberg" => Ok(Algorithm::Hirschberg),
            other => Err(QuickedError::invalid(
                "algorithm",
                format!("unknown algorithm '{other}'"),
            )),
        }
    }
}

/// How the HEW threshold of a window is derived.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum HewThreshold {
    /// Fixed score threshold.
    Absolute(u32),
    /// Fraction of the window length when in `[0, 1]`, absolute count above.
    Percentage(f64),
}

impl HewThreshold {
    /// Threshold for a window spanning `window_len` symbols.
    pub fn resolve(self, window_len: usize) -> u32 {
        match self {
            HewThreshold::Absolute(t) => t,
            HewThreshold::Percentage(p) => {
                u32::try_from(nominal_prop(window_len, p)).unwrap_or(u32::MAX)
            }
        }
    }
}

pub const DEFAULT_BANDWIDTH: usize = 15;
pub const DEFAULT_WINDOW_SIZE: usize = 128;
pub const DEFAULT_OVERLAP_SIZE: usize = 32;
pub const DEFAULT_HEW_PERCENTAGE: f64 = 0.25;

/// Parameters of one alignment call.
#[derive(Clone, Debug, PartialEq)]
pub struct AlignmentConfig {
    algorithm: Algorithm,
    only_score: bool,
    bandwidth: usize,
    window_size: usize,
    overlap_size: usize,
    force_scalar: bool,
    hew_threshold: HewThreshold,
    hew_fallback: bool,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Quicked,
            only_score: false,
            bandwidth: DEFAULT_BANDWIDTH,
            window_size: DEFAULT_WINDOW_SIZE,
            overlap_size: DEFAULT_OVERLAP_SIZE,
            force_scalar: false,
            hew_threshold: HewThreshold::Percentage(DEFAULT_HEW_PERCENTAGE),
            hew_fallback: true,
        }
    }
}

impl AlignmentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn only_score(&self) -> bool {
        self.only_score
    }

    pub fn bandwidth(&self) -> usize {
        self.bandwidth
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn overlap_size(&self) -> usize {
        self.overlap_size
    }

    pub fn force_scalar(&self) -> bool {
        self.force_scalar
    }

    pub fn hew_threshold(&self) -> HewThreshold {
        self.hew_threshold
    }

    pub fn hew_fallback(&self) -> bool {
        self.hew_fallback
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) -> Result<&mut Self> {
        self.algorithm = algorithm;
        Ok(self)
    }

    /// Skip traceback; results carry a score but no CIGAR.
    pub fn set_only_score(&mut self, only_score: bool) -> Result<&mut Self> {
        self.only_score = only_score;
        Ok(self)
    }

    pub fn set_bandwidth(&mut self, bandwidth: usize) -> Result<&mut Self> {
        if bandwidth == 0 {
            return Err(QuickedError::invalid("bandwidth", "must be positive"));
        }
        self.bandwidth = bandwidth;
        Ok(self)
    }

    pub fn set_window_size(&mut self, window_size: usize) -> Result<&mut Self> {
        if window_size == 0 {
            return Err(QuickedError::invalid("window_size", "must be positive"));
        }
        self.window_size = window_size;
        Ok(self)
    }

    pub fn set_overlap_size(&mut self, overlap_size: usize) -> Result<&mut Self> {
        if overlap_size == 0 {
            return Err(QuickedError::invalid("overlap_size", "must be positive"));
        }
        self.overlap_size = overlap_size;
        Ok(self)
    }

    /// Disable the vector-lane sweep.
    pub fn set_force_scalar(&mut self, force_scalar: bool) -> Result<&mut Self> {
        self.force_scalar = force_scalar;
        Ok(self)
    }

    /// Use a fixed HEW score threshold for every window.
    pub fn set_hew_threshold(&mut self, threshold: u32) -> Result<&mut Self> {
        self.hew_threshold = HewThreshold::Absolute(threshold);
        Ok(self)
    }

    /// Derive the HEW threshold from the window length.
    ///
    /// `percentage` in `[0.0, 1.0]` is a fraction of the window length, larger
    /// values are an absolute count.
    pub fn set_hew_percentage(&mut self, percentage: f64) -> Result<&mut Self> {
        if !percentage.is_finite() || percentage < 0.0 {
            return Err(QuickedError::invalid(
                "hew_percentage",
                format!("must be a finite non-negative number, got {percentage}"),
            ));
        }
        self.hew_threshold = HewThreshold::Percentage(percentage);
        Ok(self)
    }

    /// Enable or disable full-width re-alignment of HEW windows.
    pub fn set_hew_fallback(&mut self, enabled: bool) -> Result<&mut Self> {
        self.hew_fallback = enabled;
        Ok(self)
    }

    /// Check cross-parameter constraints.
    pub fn validate(&self) -> Result<()> {
        if self.bandwidth == 0 {
            return Err(QuickedError::invalid("bandwidth", "must be positive"));
        }
        if self.window_size == 0 {
            return Err(QuickedError::invalid("window_size", "must be positive"));
        }
        if self.overlap_size == 0 {
            return Err(QuickedError::invalid("overlap_size", "must be positive"));
        }
        if self.overlap_size >= self.window_size {
            return Err(QuickedError::invalid(
                "overlap_size",
                format!(
                    "must be smaller than window_size ({} >= {})",
                    self.overlap_size, self.window_size
                ),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AlignmentConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.algorithm(), Algorithm::Quicked);
        assert!(!config.only_score());
        assert!(config.hew_fallback());
    }

    #[test]
    fn setters_reject_zero() {
        let mut config = AlignmentConfig::new();
        assert!(config.set_bandwidth(0).is_err());
        assert!(config.set_window_size(0).is_err());
        assert!(config.set_overlap_size(0).is_err());
        assert_eq!(config, AlignmentConfig::default());
    }

    #[test]
    fn setters_chain() {
        let mut config = AlignmentConfig::new();
        config
            .set_algorithm(Algorithm::Windowed)
            .and_then(|c| c.set_window_size(64))
            .and_then(|c| c.set_overlap_size(16))
            .unwrap();
        assert_eq!(config.window_size(), 64);
        assert_eq!(config.overlap_size(), 16);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn overlap_must_be_smaller_than_window() {
        let mut config = AlignmentConfig::new();
        config.set_window_size(16).unwrap();
        config.set_overlap_size(16).unwrap();
        assert!(matches!(
            config.validate(),
            Err(QuickedError::InvalidConfiguration {
                parameter: "overlap_size",
                ..
            })
        ));
    }

    #[test]
    fn hew_percentage_domain() {
        let mut config = AlignmentConfig::new();
        assert!(config.set_hew_percentage(-0.1).is_err());
        assert!(config.set_hew_percentage(f64::NAN).is_err());
        assert!(config.set_hew_percentage(f64::INFINITY).is_err());
        assert!(config.set_hew_percentage(0.0).is_ok());
        assert!(config.set_hew_percentage(1.0).is_ok());
        assert!(config.set_hew_percentage(12.0).is_ok());
    }

    #[test]
    fn hew_threshold_boundaries() {
        assert_eq!(HewThreshold::Percentage(0.0).resolve(128), 0);
        assert_eq!(HewThreshold::Percentage(1.0).resolve(128), 128);
        assert_eq!(HewThreshold::Percentage(0.5).resolve(128), 64);
        assert_eq!(HewThreshold::Percentage(1.5).resolve(128), 1);
        assert_eq!(HewThreshold::Absolute(7).resolve(128), 7);
    }

    #[test]
    fn last_hew_setter_wins() {
        let mut config = AlignmentConfig::new();
        config.set_hew_percentage(0.5).unwrap();
        config.set_hew_threshold(9).unwrap();
        assert_eq!(config.hew_threshold(), HewThreshold::Absolute(9));
        config.set_hew_percentage(0.1).unwrap();
        assert_eq!(config.hew_threshold(), HewThreshold::Percentage(0.1));
    }

    #[test]
    fn algorithm_names_round_trip() {
        for algo in Algorithm::ALL {
            assert_eq!(algo.to_string().parse::<Algorithm>().unwrap(), algo);
        }
        assert_eq!("BANDED".parse::<Algorithm>().unwrap(), Algorithm::Banded);
        assert!("smith-waterman".parse::<Algorithm>().is_err());
    }
}
