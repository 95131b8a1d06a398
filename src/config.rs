//! Pipeline configuration.
//!
//! [`CleanConfig`] holds every tunable parameter for a cleaning run. All
//! fields have defaults matching the reference parameterisation; validation
//! happens eagerly in [`crate::clean`] before any computation starts.
use crate::error::{Result, WicaError};

/// Configuration for a single [`crate::clean`] invocation.
///
/// Construct one with struct-update syntax:
///
/// ```
/// use wica::CleanConfig;
///
/// let cfg = CleanConfig {
///     sensitivity: 1,     // widest analysis window, coarsest localisation
///     ..CleanConfig::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct CleanConfig {
    /// Detection sensitivity, one of `{1, 2, 3}`.
    ///
    /// Maps to the wavelet filter-bank time-bandwidth `{20, 10, 5}`: higher
    /// sensitivity means a narrower analysis window, which localises brief
    /// spikes more sharply at the cost of noise robustness.
    ///
    /// Default: `3`.
    pub sensitivity: u8,

    /// Render a per-channel before/after comparison through the `log`
    /// facade once cleaning finishes.
    ///
    /// The comparison grid hosts at most [`crate::vis::GRID_CAPACITY`]
    /// channels; larger inputs fail with [`WicaError::LayoutCapacity`]
    /// before any computation starts.
    ///
    /// Default: `false`.
    pub visualize: bool,

    /// Treat separator under-convergence as a hard error.
    ///
    /// When `false` (the source behaviour) the pipeline proceeds with
    /// however many components the last attempt produced and records the
    /// shortfall in [`crate::CleaningResult::converged`].
    ///
    /// Default: `false`.
    pub strict_convergence: bool,

    /// Seed for the separator's random initialisation.
    ///
    /// `None` draws from entropy; fix a value for reproducible
    /// decompositions (component order and sign still vary between seeds).
    ///
    /// Default: `None`.
    pub seed: Option<u64>,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            sensitivity: 3,
            visualize: false,
            strict_convergence: false,
            seed: None,
        }
    }
}

impl CleanConfig {
    /// Shorthand for a default config with a given sensitivity.
    pub fn with_sensitivity(sensitivity: u8) -> Self {
        Self {
            sensitivity,
            ..Self::default()
        }
    }

    /// Check every field against its accepted domain.
    pub fn validate(&self) -> Result<()> {
        match self.sensitivity {
            1..=3 => Ok(()),
            s => Err(WicaError::InvalidParameter(format!(
                "sensitivity must be 1, 2 or 3 (got {s})"
            ))),
        }
    }

    /// Wavelet filter-bank time-bandwidth for this sensitivity.
    ///
    /// `1 → 20`, `2 → 10`, `3 → 5`. Call [`Self::validate`] first; values
    /// outside `{1, 2, 3}` map to the default here only to keep this
    /// function total.
    pub fn time_bandwidth(&self) -> f64 {
        match self.sensitivity {
            1 => 20.0,
            2 => 10.0,
            _ => 5.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = CleanConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.sensitivity, 3);
        assert!(!cfg.visualize);
    }

    #[test]
    fn sensitivity_out_of_range_rejected() {
        for s in [0u8, 4, 200] {
            let cfg = CleanConfig::with_sensitivity(s);
            assert!(matches!(
                cfg.validate(),
                Err(WicaError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn time_bandwidth_mapping() {
        assert_eq!(CleanConfig::with_sensitivity(1).time_bandwidth(), 20.0);
        assert_eq!(CleanConfig::with_sensitivity(2).time_bandwidth(), 10.0);
        assert_eq!(CleanConfig::with_sensitivity(3).time_bandwidth(), 5.0);
    }
}
