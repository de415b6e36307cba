//! Statevector simulation engine.
//!
//! Qubit `k` maps to bit `k` of the amplitude index (bit 0 is least
//! significant), matching the flattened register layout the parser emits.

use std::f64::consts::{FRAC_1_SQRT_2, PI};

use num_complex::Complex64;
use rand::Rng;

use bragi_qasm::Gate;

/// A statevector representing a quantum state.
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

type Matrix2 = [[Complex64; 2]; 2];

fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

/// General single-qubit unitary U(θ, φ, λ).
fn u_matrix(theta: f64, phi: f64, lambda: f64) -> Matrix2 {
    let (sin, cos) = (theta / 2.0).sin_cos();
    [
        [c(cos, 0.0), -Complex64::from_polar(sin, lambda)],
        [
            Complex64::from_polar(sin, phi),
            Complex64::from_polar(cos, phi + lambda),
        ],
    ]
}

fn x_matrix() -> Matrix2 {
    [[c(0.0, 0.0), c(1.0, 0.0)], [c(1.0, 0.0), c(0.0, 0.0)]]
}

fn y_matrix() -> Matrix2 {
    [[c(0.0, 0.0), c(0.0, -1.0)], [c(0.0, 1.0), c(0.0, 0.0)]]
}

fn z_matrix() -> Matrix2 {
    [[c(1.0, 0.0), c(0.0, 0.0)], [c(0.0, 0.0), c(-1.0, 0.0)]]
}

fn h_matrix() -> Matrix2 {
    let s = FRAC_1_SQRT_2;
    [[c(s, 0.0), c(s, 0.0)], [c(s, 0.0), c(-s, 0.0)]]
}

fn phase_matrix(theta: f64) -> Matrix2 {
    [
        [c(1.0, 0.0), c(0.0, 0.0)],
        [c(0.0, 0.0), Complex64::from_polar(1.0, theta)],
    ]
}

fn sx_matrix() -> Matrix2 {
    [
        [c(0.5, 0.5), c(0.5, -0.5)],
        [c(0.5, -0.5), c(0.5, 0.5)],
    ]
}

fn sxdg_matrix() -> Matrix2 {
    [
        [c(0.5, -0.5), c(0.5, 0.5)],
        [c(0.5, 0.5), c(0.5, -0.5)],
    ]
}

fn rx_matrix(theta: f64) -> Matrix2 {
    let (sin, cos) = (theta / 2.0).sin_cos();
    [[c(cos, 0.0), c(0.0, -sin)], [c(0.0, -sin), c(cos, 0.0)]]
}

fn ry_matrix(theta: f64) -> Matrix2 {
    let (sin, cos) = (theta / 2.0).sin_cos();
    [[c(cos, 0.0), c(-sin, 0.0)], [c(sin, 0.0), c(cos, 0.0)]]
}

fn rz_matrix(theta: f64) -> Matrix2 {
    [
        [Complex64::from_polar(1.0, -theta / 2.0), c(0.0, 0.0)],
        [c(0.0, 0.0), Complex64::from_polar(1.0, theta / 2.0)],
    ]
}

impl Statevector {
    /// Create a new statevector initialized to |0…0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1usize << num_qubits;
        let mut amplitudes = vec![c(0.0, 0.0); size];
        amplitudes[0] = c(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Apply a gate to the given qubits.
    pub fn apply(&mut self, gate: &Gate, qubits: &[usize]) {
        match gate {
            Gate::I => {}
            Gate::X => self.apply_single(x_matrix(), qubits[0]),
            Gate::Y => self.apply_single(y_matrix(), qubits[0]),
            Gate::Z => self.apply_single(z_matrix(), qubits[0]),
            Gate::H => self.apply_single(h_matrix(), qubits[0]),
            Gate::S => self.apply_single(phase_matrix(PI / 2.0), qubits[0]),
            Gate::Sdg => self.apply_single(phase_matrix(-PI / 2.0), qubits[0]),
            Gate::T => self.apply_single(phase_matrix(PI / 4.0), qubits[0]),
            Gate::Tdg => self.apply_single(phase_matrix(-PI / 4.0), qubits[0]),
            Gate::Sx => self.apply_single(sx_matrix(), qubits[0]),
            Gate::Sxdg => self.apply_single(sxdg_matrix(), qubits[0]),
            Gate::Rx(theta) => self.apply_single(rx_matrix(*theta), qubits[0]),
            Gate::Ry(theta) => self.apply_single(ry_matrix(*theta), qubits[0]),
            Gate::Rz(theta) => self.apply_single(rz_matrix(*theta), qubits[0]),
            Gate::Phase(theta) => self.apply_single(phase_matrix(*theta), qubits[0]),
            Gate::U(theta, phi, lambda) => {
                self.apply_single(u_matrix(*theta, *phi, *lambda), qubits[0]);
            }
            Gate::Cx => self.apply_controlled(x_matrix(), qubits[0], qubits[1]),
            Gate::Cy => self.apply_controlled(y_matrix(), qubits[0], qubits[1]),
            Gate::Cz => self.apply_controlled(z_matrix(), qubits[0], qubits[1]),
            Gate::Ch => self.apply_controlled(h_matrix(), qubits[0], qubits[1]),
            Gate::Swap => self.apply_swap(qubits[0], qubits[1]),
            Gate::Ccx => self.apply_ccx(qubits[0], qubits[1], qubits[2]),
        }
    }

    /// Apply a 2x2 unitary to one qubit.
    fn apply_single(&mut self, m: Matrix2, qubit: usize) {
        let mask = 1usize << qubit;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = m[0][0] * a + m[0][1] * b;
                self.amplitudes[j] = m[1][0] * a + m[1][1] * b;
            }
        }
    }

    /// Apply a 2x2 unitary to `target`, conditioned on `control` being |1⟩.
    fn apply_controlled(&mut self, m: Matrix2, control: usize, target: usize) {
        let cmask = 1usize << control;
        let tmask = 1usize << target;
        for i in 0..self.amplitudes.len() {
            if i & cmask != 0 && i & tmask == 0 {
                let j = i | tmask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = m[0][0] * a + m[0][1] * b;
                self.amplitudes[j] = m[1][0] * a + m[1][1] * b;
            }
        }
    }

    fn apply_swap(&mut self, a: usize, b: usize) {
        let amask = 1usize << a;
        let bmask = 1usize << b;
        for i in 0..self.amplitudes.len() {
            if i & amask != 0 && i & bmask == 0 {
                let j = (i ^ amask) | bmask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    fn apply_ccx(&mut self, c1: usize, c2: usize, target: usize) {
        let cmask = (1usize << c1) | (1usize << c2);
        let tmask = 1usize << target;
        for i in 0..self.amplitudes.len() {
            if i & cmask == cmask && i & tmask == 0 {
                let j = i | tmask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    /// Probability of measuring |1⟩ on a qubit.
    pub fn prob_one(&self, qubit: usize) -> f64 {
        let mask = 1usize << qubit;
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, amp)| amp.norm_sqr())
            .sum()
    }

    /// Measure a qubit, collapsing the state. Returns the sampled bit.
    pub fn measure<R: Rng>(&mut self, qubit: usize, rng: &mut R) -> bool {
        let p_one = self.prob_one(qubit);
        let outcome = rng.gen_range(0.0..1.0) < p_one;

        let mask = 1usize << qubit;
        let p = if outcome { p_one } else { 1.0 - p_one };
        // Floating point can put p at exactly 0 when the sampled branch
        // has no support; keep the division finite.
        let norm = 1.0 / p.max(f64::MIN_POSITIVE).sqrt();

        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if (i & mask != 0) == outcome {
                *amp *= norm;
            } else {
                *amp = c(0.0, 0.0);
            }
        }

        outcome
    }

    /// Collapse a qubit to |0⟩.
    pub fn reset<R: Rng>(&mut self, qubit: usize, rng: &mut R) {
        if self.measure(qubit, rng) {
            self.apply_single(x_matrix(), qubit);
        }
    }
}
