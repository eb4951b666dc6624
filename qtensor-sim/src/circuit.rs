//! Circuit composition

use qtensor_gates::standard::{cnot, h};
use qtensor_gates::{GateOp, Operator};
use qtensor_state::{Measurement, MeasurementOutcome, Result, StateTensor};
use rand::Rng;
use std::fmt;
use std::sync::Arc;

/// An ordered sequence of operators
///
/// A circuit holds no quantum state. Applying it folds the register through
/// each operator left to right, and since a circuit is itself an
/// [`Operator`], circuits nest.
///
/// # Example
/// ```
/// use qtensor_gates::standard::{cnot, h};
/// use qtensor_gates::Operator;
/// use qtensor_sim::Circuit;
/// use qtensor_state::StateTensor;
///
/// let bell = Circuit::from_gates([h(0), cnot(0, 1)]);
/// assert_eq!(bell.len(), 2);
///
/// let state = bell.apply(&StateTensor::zero(2).unwrap()).unwrap();
/// assert!((state.amplitudes()[3].re - 0.5f64.sqrt()).abs() < 1e-12);
/// ```
#[derive(Clone, Default)]
pub struct Circuit {
    operations: Vec<Arc<dyn Operator>>,
}

impl Circuit {
    /// Create a circuit from operators in application order
    pub fn new(operations: Vec<Arc<dyn Operator>>) -> Self {
        Self { operations }
    }

    /// Create a circuit from bound gates in application order
    pub fn from_gates(gates: impl IntoIterator<Item = GateOp>) -> Self {
        gates.into_iter().collect()
    }

    /// Create an empty circuit with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            operations: Vec::with_capacity(capacity),
        }
    }

    /// Append an operator
    pub fn push(&mut self, operator: impl Operator + 'static) -> &mut Self {
        self.operations.push(Arc::new(operator));
        self
    }

    /// Append an operator, builder style
    pub fn then(mut self, operator: impl Operator + 'static) -> Self {
        self.push(operator);
        self
    }

    /// Get the number of operators (nested circuits count once)
    #[inline]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Get an iterator over the operators
    pub fn operations(&self) -> impl Iterator<Item = &Arc<dyn Operator>> {
        self.operations.iter()
    }

    /// Terminate the circuit with a measurement stage
    pub fn measure(self, measurement: Measurement) -> MeasuredCircuit {
        MeasuredCircuit {
            circuit: self,
            measurement,
        }
    }
}

impl Operator for Circuit {
    fn name(&self) -> &str {
        "circuit"
    }

    fn apply_to(&self, state: &mut StateTensor) -> Result<()> {
        tracing::debug!(
            operations = self.operations.len(),
            num_qubits = state.num_qubits(),
            "running circuit"
        );
        for operator in &self.operations {
            operator.apply_to(state)?;
        }
        Ok(())
    }
}

impl FromIterator<GateOp> for Circuit {
    fn from_iter<I: IntoIterator<Item = GateOp>>(iter: I) -> Self {
        Self {
            operations: iter
                .into_iter()
                .map(|op| Arc::new(op) as Arc<dyn Operator>)
                .collect(),
        }
    }
}

impl From<Vec<Arc<dyn Operator>>> for Circuit {
    fn from(operations: Vec<Arc<dyn Operator>>) -> Self {
        Self::new(operations)
    }
}

impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.operations.iter()).finish()
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, operator) in self.operations.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}", operator)?;
        }
        write!(f, "]")
    }
}

/// A circuit terminated by exactly one measurement
#[derive(Clone, Debug)]
pub struct MeasuredCircuit {
    circuit: Circuit,
    measurement: Measurement,
}

impl MeasuredCircuit {
    /// Unitary part of the circuit
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Terminal measurement
    pub fn measurement(&self) -> Measurement {
        self.measurement
    }

    /// Run the circuit on `state` and measure it
    ///
    /// The register is left in its post-measurement state; with
    /// `Measurement::All { collapse: false }` that is the pre-measurement
    /// state.
    pub fn run<R: Rng + ?Sized>(
        &self,
        state: &mut StateTensor,
        rng: &mut R,
    ) -> Result<MeasurementOutcome> {
        self.circuit.apply_to(state)?;
        let outcome = self.measurement.perform(state, rng)?;
        tracing::debug!(%outcome, "measured circuit");
        Ok(outcome)
    }
}

/// Bell pair preparation: H on `i`, then CNOT from `i` to `j`
pub fn bell_state(i: usize, j: usize) -> Circuit {
    Circuit::from_gates([h(i), cnot(i, j)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use qtensor_gates::standard::{x, z};
    use qtensor_state::{BasisState, StateError};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_empty_circuit_is_identity() {
        let mut rng = StdRng::seed_from_u64(1);
        let state = StateTensor::random(3, &mut rng).unwrap();
        assert_eq!(Circuit::default().apply(&state).unwrap(), state);
    }

    #[test]
    fn test_applies_in_order() {
        // X then Z on |0⟩ gives -|1⟩; Z then X gives |1⟩
        let xz = Circuit::from_gates([x(0), z(0)]);
        let zx = Circuit::from_gates([z(0), x(0)]);
        let zero = StateTensor::zero(1).unwrap();
        assert_eq!(xz.apply(&zero).unwrap().amplitudes()[1].re, -1.0);
        assert_eq!(zx.apply(&zero).unwrap().amplitudes()[1].re, 1.0);
    }

    #[test]
    fn test_circuits_nest() {
        let inner = bell_state(0, 1);
        let mut outer = Circuit::with_capacity(2);
        outer.push(inner.clone()).push(x(2));
        assert_eq!(outer.len(), 2);

        let flat = Circuit::from_gates([h(0), cnot(0, 1), x(2)]);
        let zero = StateTensor::zero(3).unwrap();
        assert!(outer
            .apply(&zero)
            .unwrap()
            .approx_eq(&flat.apply(&zero).unwrap(), 1e-12));
    }

    #[test]
    fn test_error_propagates() {
        let circuit = Circuit::default().then(h(0)).then(cnot(0, 5));
        let mut state = StateTensor::zero(2).unwrap();
        assert_eq!(
            circuit.apply_to(&mut state),
            Err(StateError::invalid_target(5, 2))
        );
    }

    #[test]
    fn test_measured_circuit() {
        let mut rng = StdRng::seed_from_u64(9);
        let circuit = Circuit::from_gates([x(1)]).measure(Measurement::All { collapse: true });
        let mut state = StateTensor::zero(2).unwrap();
        let outcome = circuit.run(&mut state, &mut rng).unwrap();
        assert_eq!(outcome, MeasurementOutcome::Basis(BasisState::from([0, 1])));
        assert_eq!(circuit.measurement(), Measurement::All { collapse: true });
    }

    #[test]
    fn test_measured_bell_qubits_agree() {
        let mut rng = StdRng::seed_from_u64(10);
        let first = bell_state(0, 1).measure(Measurement::Qubit(0));
        for _ in 0..50 {
            let mut state = StateTensor::zero(2).unwrap();
            let bit = first.run(&mut state, &mut rng).unwrap().bit().unwrap();
            let partner = Measurement::Qubit(1).perform(&mut state, &mut rng).unwrap();
            assert_eq!(partner, MeasurementOutcome::Bit(bit));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(bell_state(0, 1).to_string(), "[H(0), CNOT(0, 1)]");
    }
}
