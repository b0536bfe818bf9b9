//! Amplitude vectors over the truncated angular-momentum basis.

use ndarray as nd;
use num_complex::Complex64 as C64;
use num_traits::One;
use crate::error::{ RotorError, Result };

/// Amplitudes of the `2m + 1` basis states, ordered by magnetic quantum
/// number from `-m` to `+m`. Immutable once constructed; evolution produces
/// a new `StateVector` per step.
///
/// Construction does not renormalize: a physically valid state sums to 1 in
/// quadrature, and drift away from 1 over a long run signals an integrator
/// problem rather than an invalid input.
#[derive(Clone, Debug, PartialEq)]
pub struct StateVector {
    m: usize,
    amplitudes: nd::Array1<C64>,
}

impl StateVector {
    /// Create a state from an explicit amplitude vector.
    ///
    /// Fails if the vector length is not `2m + 1`.
    pub fn new(m: usize, amplitudes: nd::Array1<C64>) -> Result<Self> {
        let expected = 2 * m + 1;
        if amplitudes.len() != expected {
            return Err(RotorError::AmplitudeLength {
                m, expected, got: amplitudes.len(),
            });
        }
        Ok(Self { m, amplitudes })
    }

    /// The ground state: unit amplitude at magnetic quantum number 0, the
    /// center of the basis.
    pub fn ground(m: usize) -> Self {
        let mut amplitudes: nd::Array1<C64> = nd::Array1::zeros(2 * m + 1);
        amplitudes[m] = C64::one();
        Self { m, amplitudes }
    }

    /// The quantum number the basis is truncated at.
    pub fn m(&self) -> usize { self.m }

    /// Ket representation of the state.
    pub fn amplitudes(&self) -> &nd::Array1<C64> { &self.amplitudes }

    /// Squared norm of the amplitudes; stays within rounding of 1 under
    /// unitary evolution.
    pub fn norm_sq(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    /// Expectation value `⟨ψ|O|ψ⟩` of an observable.
    ///
    /// Fails if the operator shape does not match the basis size.
    pub fn expectation(&self, operator: &nd::Array2<C64>) -> Result<C64> {
        let n = self.amplitudes.len();
        if operator.dim() != (n, n) {
            return Err(RotorError::OperatorShape {
                expected: n, got: operator.dim(),
            });
        }
        let bra = self.amplitudes.mapv(|a| a.conj());
        Ok(bra.dot(&operator.dot(&self.amplitudes)))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::operators;

    #[test]
    fn ground_state_is_centered() {
        let psi = StateVector::ground(8);
        assert_eq!(psi.amplitudes().len(), 17);
        assert_eq!(psi.amplitudes()[8], C64::one());
        assert!((psi.norm_sq() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn wrong_amplitude_length_is_rejected() {
        let amps: nd::Array1<C64> = nd::Array1::zeros(5);
        let res = StateVector::new(8, amps);
        assert!(matches!(
            res,
            Err(RotorError::AmplitudeLength { m: 8, expected: 17, got: 5 }),
        ));
    }

    #[test]
    fn operator_shape_mismatch_is_rejected() {
        let psi = StateVector::ground(8);
        let op = operators::dipole_x(3);
        assert!(matches!(
            psi.expectation(&op),
            Err(RotorError::OperatorShape { expected: 17, got: (7, 7) }),
        ));
    }

    #[test]
    fn ground_state_expectations() {
        let psi = StateVector::ground(8);
        let cos = operators::dipole_x(8);
        let sin = operators::dipole_y(8);
        // ⟨cos φ⟩ = ⟨sin φ⟩ = 0, ⟨sin² φ⟩ = ⟨cos² φ⟩ = 1/2
        assert!(psi.expectation(&cos).unwrap().norm() < 1e-15);
        assert!(psi.expectation(&sin).unwrap().norm() < 1e-15);
        let cos2 = psi.expectation(&cos.dot(&cos)).unwrap();
        let sin2 = psi.expectation(&sin.dot(&sin)).unwrap();
        assert!((cos2.re - 0.5).abs() < 1e-15);
        assert!((sin2.re - 0.5).abs() < 1e-15);
    }
}
