//! Human-readable inspection of a register

use crate::basis::BasisState;
use crate::state_tensor::StateTensor;
use std::fmt;

/// Basis state with the largest squared amplitude
///
/// Ties resolve to the first maximal index in row-major order.
pub fn dominant_state(state: &StateTensor) -> BasisState {
    let mut best_index = 0;
    let mut best_weight = f64::NEG_INFINITY;
    for (index, amp) in state.amplitudes().iter().enumerate() {
        let weight = amp.norm_sqr();
        if weight > best_weight {
            best_index = index;
            best_weight = weight;
        }
    }
    BasisState::from_index(best_index, state.num_qubits())
}

/// Ket listing of every amplitude
///
/// One line per basis state in lexicographic multi-index order:
///
/// ```text
/// |00⟩	0.70711 + 0.00000 i
/// |01⟩	0.00000 + 0.00000 i
/// ```
pub struct KetTable<'a> {
    state: &'a StateTensor,
}

impl<'a> KetTable<'a> {
    pub fn new(state: &'a StateTensor) -> Self {
        Self { state }
    }
}

impl fmt::Display for KetTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let num_qubits = self.state.num_qubits();
        for (index, amp) in self.state.amplitudes().iter().enumerate() {
            writeln!(
                f,
                "{}\t{:.5} + {:.5} i",
                BasisState::from_index(index, num_qubits),
                amp.re,
                amp.im
            )?;
        }
        Ok(())
    }
}

impl StateTensor {
    /// Displayable ket listing of this register
    pub fn ket_table(&self) -> KetTable<'_> {
        KetTable::new(self)
    }

    /// Basis state with the largest squared amplitude
    pub fn dominant_state(&self) -> BasisState {
        dominant_state(self)
    }
}
