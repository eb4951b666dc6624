//! Simulator facade owning the configuration and the random source

use crate::circuit::MeasuredCircuit;
use crate::config::SimulatorConfig;
use crate::error::{Result, SimulatorError};
use qtensor_gates::Operator;
use qtensor_state::{measurement, BasisState, MeasurementOutcome, SamplingResult, StateTensor};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// State-vector simulator
///
/// Owns a [`StdRng`] seeded from [`SimulatorConfig::seed`], so every
/// measurement it performs is reproducible when a seed is configured. The
/// registers themselves stay with the caller.
///
/// # Example
///
/// ```
/// use qtensor_sim::{bell_state, Simulator, SimulatorConfig};
///
/// let mut simulator = Simulator::new(SimulatorConfig::debug()).unwrap();
/// let mut state = simulator.zero_state(2).unwrap();
/// simulator.run(&bell_state(0, 1), &mut state).unwrap();
///
/// let counts = simulator.sample_counts(&state, 100).unwrap();
/// assert_eq!(counts.shots, 100);
/// ```
pub struct Simulator {
    config: SimulatorConfig,
    rng: StdRng,
}

impl Simulator {
    /// Create a new simulator with the given configuration
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the configuration fails validation
    pub fn new(config: SimulatorConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self { config, rng })
    }

    /// Get the simulator configuration
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Random source used for sampling
    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    fn check_size(&self, num_qubits: usize) -> Result<()> {
        if num_qubits > self.config.max_qubits {
            return Err(SimulatorError::TooManyQubits {
                num_qubits,
                max_qubits: self.config.max_qubits,
            });
        }
        Ok(())
    }

    /// Register initialized to |0...0⟩
    pub fn zero_state(&self, num_qubits: usize) -> Result<StateTensor> {
        self.check_size(num_qubits)?;
        Ok(StateTensor::zero(num_qubits)?)
    }

    /// Register in a computational basis state
    pub fn basis_state(&self, basis: &BasisState) -> Result<StateTensor> {
        self.check_size(basis.num_qubits())?;
        Ok(StateTensor::basis(basis)?)
    }

    /// Normalized register with Gaussian random amplitudes
    pub fn random_state(&mut self, num_qubits: usize) -> Result<StateTensor> {
        self.check_size(num_qubits)?;
        Ok(StateTensor::random(num_qubits, &mut self.rng)?)
    }

    /// Apply an operator (gate or circuit) to a register in place
    ///
    /// # Errors
    /// - `TooManyQubits` if the register exceeds the configured limit
    /// - `State` for invalid targets or gate shapes
    /// - `NormalizationDrift` if checks are enabled and the norm drifted
    pub fn run(&mut self, operator: &dyn Operator, state: &mut StateTensor) -> Result<()> {
        self.check_size(state.num_qubits())?;
        operator.apply_to(state)?;
        if self.config.check_normalization {
            self.verify_normalization(state)?;
        }
        Ok(())
    }

    /// Run a measured circuit and return its classical outcome
    pub fn run_measured(
        &mut self,
        circuit: &MeasuredCircuit,
        state: &mut StateTensor,
    ) -> Result<MeasurementOutcome> {
        self.run(circuit.circuit(), state)?;
        let outcome = circuit.measurement().perform(state, &mut self.rng)?;
        tracing::debug!(%outcome, "measured circuit");
        Ok(outcome)
    }

    /// Measure one axis, collapsing the register
    pub fn measure(&mut self, state: &mut StateTensor, axis: usize) -> Result<u8> {
        Ok(measurement::measure(state, axis, &mut self.rng)?)
    }

    /// Measure every axis, collapsing the register if requested
    pub fn measure_all(&mut self, state: &mut StateTensor, collapse: bool) -> Result<BasisState> {
        Ok(measurement::measure_all(state, collapse, &mut self.rng)?)
    }

    /// Sample a basis state without modifying the register
    pub fn sample(&mut self, state: &StateTensor) -> Result<BasisState> {
        Ok(measurement::sample(state, &mut self.rng)?)
    }

    /// Draw `shots` non-destructive full measurements
    pub fn sample_counts(&mut self, state: &StateTensor, shots: usize) -> Result<SamplingResult> {
        Ok(measurement::sample_counts(state, shots, &mut self.rng)?)
    }

    fn verify_normalization(&self, state: &StateTensor) -> Result<()> {
        let norm = state.norm();
        let tolerance = self.config.normalization_tolerance;
        if (norm - 1.0).abs() > tolerance {
            tracing::warn!(norm, tolerance, "normalization drift detected");
            return Err(SimulatorError::NormalizationDrift { norm, tolerance });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{bell_state, Circuit};
    use qtensor_gates::standard::{h, x};
    use qtensor_gates::{Gate, GateOp};
    use qtensor_state::{Measurement, StateError};
    use std::sync::Arc;

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let outcomes = |seed: u64| -> Vec<BasisState> {
            let mut simulator = Simulator::new(SimulatorConfig::new().with_seed(seed)).unwrap();
            let mut state = simulator.random_state(4).unwrap();
            simulator.run(&Circuit::from_gates([h(0), h(3)]), &mut state).unwrap();
            (0..20).map(|_| simulator.sample(&state).unwrap()).collect()
        };
        assert_eq!(outcomes(5), outcomes(5));
    }

    #[test]
    fn test_too_many_qubits() {
        let simulator = Simulator::new(SimulatorConfig::new().with_max_qubits(4)).unwrap();
        assert!(matches!(
            simulator.zero_state(5),
            Err(SimulatorError::TooManyQubits {
                num_qubits: 5,
                max_qubits: 4
            })
        ));
        assert!(simulator.zero_state(4).is_ok());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SimulatorConfig::new().with_max_qubits(0);
        assert!(matches!(
            Simulator::new(config),
            Err(SimulatorError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_state_errors_are_wrapped() {
        let mut simulator = Simulator::new(SimulatorConfig::debug()).unwrap();
        let mut state = simulator.zero_state(2).unwrap();
        let result = simulator.run(&x(2), &mut state);
        assert!(matches!(
            result,
            Err(SimulatorError::State(StateError::InvalidTargetIndex { index: 2, .. }))
        ));
    }

    #[test]
    fn test_normalization_drift_detected() {
        let one = num_complex::Complex64::new(1.0, 0.0);
        let zero = num_complex::Complex64::new(0.0, 0.0);
        let doubling = GateOp::new(
            Arc::new(Gate::from_matrix2("2I", &[[one * 2.0, zero], [zero, one * 2.0]])),
            &[0],
        );

        let mut simulator = Simulator::new(SimulatorConfig::debug()).unwrap();
        let mut state = simulator.zero_state(1).unwrap();
        assert!(matches!(
            simulator.run(&doubling, &mut state),
            Err(SimulatorError::NormalizationDrift { .. })
        ));

        let mut lenient = Simulator::new(SimulatorConfig::default()).unwrap();
        let mut state = lenient.zero_state(1).unwrap();
        assert!(lenient.run(&doubling, &mut state).is_ok());
    }

    #[test]
    fn test_run_measured() {
        let mut simulator = Simulator::new(SimulatorConfig::debug()).unwrap();
        let circuit = bell_state(0, 1).measure(Measurement::All { collapse: true });
        for _ in 0..20 {
            let mut state = simulator.zero_state(2).unwrap();
            let outcome = simulator.run_measured(&circuit, &mut state).unwrap();
            let bits = outcome.basis().unwrap().bits().to_vec();
            assert_eq!(bits[0], bits[1]);
        }
    }
}
