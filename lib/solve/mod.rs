//! Inverse-control and forward-simulation solvers.
//!
//! [`PathToField`] solves for the field series that drives the rotor's
//! dipole expectation along a desired path; [`FieldToPath`] propagates the
//! rotor under a prescribed field series and reports the resulting path.

use ndarray as nd;
use crate::{
    error::{ RotorError, Result },
    rotor::Rotor,
};

pub mod path_to_field;
pub mod field_to_path;
pub use path_to_field::{ PathToField, SolvedField };
pub use field_to_path::{ FieldToPath, SolvedPath };

/// A quantum-control solver: run the full timestep loop, then export the
/// accumulated results in laboratory units.
pub trait Solve {
    type Output;

    /// Run the timestep loop to completion. A failure at any step aborts
    /// the whole run.
    fn solve(&mut self) -> Result<()>;

    /// Export the accumulated results (time in ps, fields in V/Å).
    fn export(&self) -> Result<Self::Output>;
}

/// Second time-derivative of a uniformly sampled function by centered
/// finite differences, with one-sided three-point stencils at the two
/// boundary points.
///
/// Fails when fewer than three samples are available or `dt <= 0`.
pub fn second_derivative<S>(x: &nd::ArrayBase<S, nd::Ix1>, dt: f64)
    -> Result<nd::Array1<f64>>
where S: nd::Data<Elem = f64>
{
    let n = x.len();
    if n < 3 {
        return Err(RotorError::TooFewPoints(n));
    }
    if dt <= 0.0 {
        return Err(RotorError::NonPositiveTimestep(dt));
    }
    let dt2 = dt * dt;
    let mut d2: nd::Array1<f64> = nd::Array1::zeros(n);
    d2[0] = (x[2] - 2.0 * x[1] + x[0]) / dt2;
    for i in 1..n - 1 {
        d2[i] = (x[i + 1] - 2.0 * x[i] + x[i - 1]) / dt2;
    }
    d2[n - 1] = (x[n - 3] - 2.0 * x[n - 2] + x[n - 1]) / dt2;
    Ok(d2)
}

/// Realized dipole trajectory: `⟨cos φ⟩` and `⟨sin φ⟩` at every recorded
/// step, shape `(n, 2)`.
pub(crate) fn realized_path(rotor: &Rotor) -> Result<nd::Array2<f64>> {
    let n = rotor.history().len();
    let mut path: nd::Array2<f64> = nd::Array2::zeros((n, 2));
    for (i, psi) in rotor.history().states().iter().enumerate() {
        path[[i, 0]] = psi.expectation(rotor.dipole_x())?.re;
        path[[i, 1]] = psi.expectation(rotor.dipole_y())?.re;
    }
    Ok(path)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn second_derivative_of_quadratic_is_constant() {
        let dt: f64 = 0.25;
        let x: nd::Array1<f64> = (0..50)
            .map(|i| (i as f64 * dt).powi(2))
            .collect();
        let d2 = second_derivative(&x, dt).unwrap();
        for v in d2 {
            assert!((v - 2.0).abs() < 1e-10);
        }
    }

    #[test]
    fn second_derivative_needs_three_points() {
        let x: nd::Array1<f64> = nd::array![0.0, 1.0];
        assert!(matches!(
            second_derivative(&x, 1.0),
            Err(RotorError::TooFewPoints(2)),
        ));
    }

    #[test]
    fn second_derivative_rejects_bad_dt() {
        let x: nd::Array1<f64> = nd::array![0.0, 1.0, 4.0];
        assert!(matches!(
            second_derivative(&x, 0.0),
            Err(RotorError::NonPositiveTimestep(_)),
        ));
    }
}
