//! Operators: anything that maps a register to a register

use crate::gate::Gate;
use qtensor_state::{apply_gate_tensor, Result, StateTensor};
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// A transformation of a state tensor
///
/// Implemented by bound gates and by whole circuits, so both compose
/// uniformly as `Arc<dyn Operator>`.
pub trait Operator: Send + Sync + fmt::Debug {
    /// Short display name
    fn name(&self) -> &str;

    /// Transform the register in place
    ///
    /// On error the register is left as it was before the failing step.
    fn apply_to(&self, state: &mut StateTensor) -> Result<()>;

    /// Return the transformed register, leaving the input untouched
    fn apply(&self, state: &StateTensor) -> Result<StateTensor> {
        let mut output = state.clone();
        self.apply_to(&mut output)?;
        Ok(output)
    }
}

/// A gate bound to an ordered tuple of target axes
///
/// The r-th target is contracted against the r-th input axis of the gate.
/// Target count, range and distinctness are checked when the operator is
/// applied, since only then is the register size known.
///
/// # Example
/// ```
/// use qtensor_gates::{Gate, GateOp, Operator};
/// use qtensor_state::StateTensor;
/// use std::sync::Arc;
///
/// let op = GateOp::new(Arc::new(Gate::pauli_x()), &[1]);
/// let state = op.apply(&StateTensor::zero(2).unwrap()).unwrap();
/// assert_eq!(state.amplitudes()[1].re, 1.0);
/// ```
#[derive(Clone)]
pub struct GateOp {
    gate: Arc<Gate>,
    targets: SmallVec<[usize; 3]>,
}

impl GateOp {
    pub fn new(gate: Arc<Gate>, targets: &[usize]) -> Self {
        Self {
            gate,
            targets: SmallVec::from_slice(targets),
        }
    }

    #[inline]
    pub fn gate(&self) -> &Arc<Gate> {
        &self.gate
    }

    /// Target axes in contraction order
    #[inline]
    pub fn targets(&self) -> &[usize] {
        &self.targets
    }
}

impl Operator for GateOp {
    fn name(&self) -> &str {
        self.gate.name()
    }

    fn apply_to(&self, state: &mut StateTensor) -> Result<()> {
        tracing::trace!(
            gate = self.gate.name(),
            targets = ?self.targets.as_slice(),
            num_qubits = state.num_qubits(),
            "applying gate"
        );
        apply_gate_tensor(state, self.gate.view(), &self.targets)
    }
}

impl fmt::Debug for GateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.gate.name())?;
        for (i, target) in self.targets.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", target)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for GateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
