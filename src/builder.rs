use crate::config::{AlignmentConfig, Algorithm};
use crate::error::Result;

/// Fluent construction of an [`AlignmentConfig`].
///
/// Values are recorded as given and checked once in [`build`](Self::build),
/// which runs every setter's domain check plus the cross-field validation.
#[derive(Default)]
pub struct AlignmentConfigBuilder {
    algorithm: Option<Algorithm>,
    only_score: Option<bool>,
    bandwidth: Option<usize>,
    window_size: Option<usize>,
    overlap_size: Option<usize>,
    force_scalar: Option<bool>,
    hew_threshold: Option<u32>,
    hew_percentage: Option<f64>,
    hew_fallback: Option<bool>,
}

impl AlignmentConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }
    pub fn with_only_score(mut self, only_score: bool) -> Self {
        self.only_score = Some(only_score);
        self
    }
    pub fn with_bandwidth(mut self, bandwidth: usize) -> Self {
        self.bandwidth = Some(bandwidth);
        self
    }
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = Some(window_size);
        self
    }
    pub fn with_overlap_size(mut self, overlap_size: usize) -> Self {
        self.overlap_size = Some(overlap_size);
        self
    }
    pub fn with_force_scalar(mut self, force_scalar: bool) -> Self {
        self.force_scalar = Some(force_scalar);
        self
    }
    /// Fixed HEW threshold. Takes precedence over [`with_hew_percentage`](Self::with_hew_percentage).
    pub fn with_hew_threshold(mut self, threshold: u32) -> Self {
        self.hew_threshold = Some(threshold);
        self
    }
    pub fn with_hew_percentage(mut self, percentage: f64) -> Self {
        self.hew_percentage = Some(percentage);
        self
    }
    pub fn with_hew_fallback(mut self, enabled: bool) -> Self {
        self.hew_fallback = Some(enabled);
        self
    }
    pub fn build(self) -> Result<AlignmentConfig> {
        let mut config = AlignmentConfig::default();
        if let Some(a) = self.algorithm {
            config.set_algorithm(a)?;
        }
        if let Some(s) = self.only_score {
            config.set_only_score(s)?;
        }
        if let Some(w) = self.bandwidth {
            config.set_bandwidth(w)?;
        }
        if let Some(w) = self.window_size {
            config.set_window_size(w)?;
        }
        if let Some(o) = self.overlap_size {
            config.set_overlap_size(o)?;
        }
        if let Some(f) = self.force_scalar {
            config.set_force_scalar(f)?;
        }
        if let Some(p) = self.hew_percentage {
            config.set_hew_percentage(p)?;
        }
        if let Some(t) = self.hew_threshold {
            config.set_hew_threshold(t)?;
        }
        if let Some(h) = self.hew_fallback {
            config.set_hew_fallback(h)?;
        }
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HewThreshold;
    use crate::error::QuickedError;

    #[test]
    fn empty_builder_yields_defaults() {
        assert_eq!(
            AlignmentConfigBuilder::new().build().unwrap(),
            AlignmentConfig::default()
        );
    }

    #[test]
    fn build_validates_cross_fields() {
        let err = AlignmentConfigBuilder::new()
            .with_window_size(8)
            .with_overlap_size(9)
            .build()
            .unwrap_err();
        assert!(matches!(err, QuickedError::InvalidConfiguration { .. }));
    }

    #[test]
    fn threshold_beats_percentage() {
        let config = AlignmentConfigBuilder::new()
            .with_hew_percentage(0.5)
            .with_hew_threshold(3)
            .build()
            .unwrap();
        assert_eq!(config.hew_threshold(), HewThreshold::Absolute(3));
    }

    #[test]
    fn zero_bandwidth_rejected() {
        assert!(AlignmentConfigBuilder::new().with_bandwidth(0).build().is_err());
    }
}
