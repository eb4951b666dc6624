//! Simulator configuration

use crate::error::{Result, SimulatorError};
use qtensor_state::MAX_QUBITS;

/// Configuration for the simulator
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorConfig {
    /// Random number generator seed for reproducibility
    ///
    /// If None, the generator is seeded from OS entropy.
    ///
    /// Default: None
    pub seed: Option<u64>,

    /// Largest register the simulator will allocate
    ///
    /// Default: 30
    pub max_qubits: usize,

    /// Allowed deviation of the norm from 1
    ///
    /// Default: 1e-9
    pub normalization_tolerance: f64,

    /// Verify the norm after every circuit run
    ///
    /// Default: false
    pub check_normalization: bool,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_qubits: MAX_QUBITS,
            normalization_tolerance: 1e-9,
            check_normalization: false,
        }
    }
}

impl SimulatorConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration for debugging
    ///
    /// - Deterministic seed
    /// - Norm checked after every run
    pub fn debug() -> Self {
        Self {
            seed: Some(42),
            check_normalization: true,
            ..Default::default()
        }
    }

    /// Set the random seed for deterministic execution
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the register size limit
    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// Set the normalization tolerance
    pub fn with_normalization_tolerance(mut self, tolerance: f64) -> Self {
        self.normalization_tolerance = tolerance;
        self
    }

    /// Enable or disable the post-run norm check
    pub fn with_normalization_check(mut self, enabled: bool) -> Self {
        self.check_normalization = enabled;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_qubits == 0 || self.max_qubits > MAX_QUBITS {
            return Err(SimulatorError::InvalidConfig(format!(
                "max_qubits must be in 1..={}, got {}",
                MAX_QUBITS, self.max_qubits
            )));
        }

        if !(self.normalization_tolerance > 0.0 && self.normalization_tolerance.is_finite()) {
            return Err(SimulatorError::InvalidConfig(format!(
                "normalization_tolerance must be positive, got {}",
                self.normalization_tolerance
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimulatorConfig::default();
        assert_eq!(config.seed, None);
        assert_eq!(config.max_qubits, 30);
        assert_eq!(config.normalization_tolerance, 1e-9);
        assert!(!config.check_normalization);
    }

    #[test]
    fn test_debug_config() {
        let config = SimulatorConfig::debug();
        assert_eq!(config.seed, Some(42));
        assert!(config.check_normalization);
    }

    #[test]
    fn test_builder_pattern() {
        let config = SimulatorConfig::new()
            .with_seed(7)
            .with_max_qubits(12)
            .with_normalization_tolerance(1e-6)
            .with_normalization_check(true);

        assert_eq!(config.seed, Some(7));
        assert_eq!(config.max_qubits, 12);
        assert_eq!(config.normalization_tolerance, 1e-6);
        assert!(config.check_normalization);
    }

    #[test]
    fn test_validate() {
        assert!(SimulatorConfig::default().validate().is_ok());

        let invalid = SimulatorConfig {
            max_qubits: 31,
            ..Default::default()
        };
        assert!(invalid.validate().is_err());

        let invalid = SimulatorConfig {
            normalization_tolerance: 0.0,
            ..Default::default()
        };
        assert!(invalid.validate().is_err());
    }
}
