//! Bragi Local Statevector Simulator
//!
//! Executes parsed QASM2 circuits shot by shot: every shot starts from
//! |0…0⟩, applies the program in order, and returns the classical
//! register contents as one bitstring. Mid-circuit measurement collapses
//! the state, so conditionals (`if (c == n) …`) see real outcomes.
//!
//! Statevector simulation is exact but exponential in qubit count:
//!
//! | Qubits | Memory |
//! |--------|--------|
//! | 10 | ~16 KB |
//! | 15 | ~512 KB |
//! | 20 | ~16 MB |
//!
//! Circuits above [`MAX_QUBITS`] are rejected.
//!
//! # Example
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let circuit = bragi_qasm::parse(
//!     "OPENQASM 2.0; qreg q[1]; creg c[1]; x q[0]; measure q[0] -> c[0];",
//! )
//! .unwrap();
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let shots = bragi_sim::run_shots(&circuit, 3, &mut rng).unwrap();
//! assert_eq!(shots, vec!["1", "1", "1"]);
//! ```

mod statevector;

pub use statevector::Statevector;

use bragi_hal::{ExecError, ExecResult};
use bragi_qasm::{Circuit, Op};
use rand::Rng;
use tracing::debug;

/// Largest circuit the simulator accepts.
pub const MAX_QUBITS: usize = 20;

/// Run `shots` independent single-shot executions of a circuit.
///
/// Returns one bitstring per shot, classical register rendered
/// most-significant bit first.
pub fn run_shots<R: Rng>(circuit: &Circuit, shots: u32, rng: &mut R) -> ExecResult<Vec<String>> {
    if circuit.num_qubits() > MAX_QUBITS {
        return Err(ExecError::CircuitTooLarge(format!(
            "circuit has {} qubits but the simulator supports at most {MAX_QUBITS}",
            circuit.num_qubits()
        )));
    }

    debug!(
        qubits = circuit.num_qubits(),
        clbits = circuit.num_clbits(),
        ops = circuit.num_ops(),
        shots,
        "starting simulation"
    );

    Ok((0..shots).map(|_| run_single_shot(circuit, rng)).collect())
}

/// Execute one shot. The circuit size must already be validated.
fn run_single_shot<R: Rng>(circuit: &Circuit, rng: &mut R) -> String {
    let mut sv = Statevector::new(circuit.num_qubits());
    let mut clbits = vec![false; circuit.num_clbits()];

    for op in circuit.ops() {
        exec_op(&mut sv, &mut clbits, op, rng);
    }

    render_bits(&clbits)
}

fn exec_op<R: Rng>(sv: &mut Statevector, clbits: &mut [bool], op: &Op, rng: &mut R) {
    match op {
        Op::Gate { gate, qubits } => sv.apply(gate, qubits),
        Op::Measure { qubit, clbit } => clbits[*clbit] = sv.measure(*qubit, rng),
        Op::Reset { qubit } => sv.reset(*qubit, rng),
        Op::Barrier => {}
        Op::Conditional {
            creg_start,
            creg_size,
            value,
            op,
        } => {
            let register: u64 = (0..*creg_size)
                .filter(|i| clbits[creg_start + i])
                .fold(0, |acc, i| acc | (1 << i));
            if register == *value {
                exec_op(sv, clbits, op, rng);
            }
        }
    }
}

/// Render classical bits with bit 0 rightmost.
fn render_bits(clbits: &[bool]) -> String {
    clbits
        .iter()
        .rev()
        .map(|&b| if b { '1' } else { '0' })
        .collect()
}
