//! Forward simulation: propagate the rotor under a prescribed field series
//! and report the resulting dipole trajectory.

use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    error::{ RotorError, Result },
    params::{ RotorParams, FIELD_AU_TO_V_PER_ANGSTROM, TIME_AU_TO_PS },
    rotor::{ Field, Rotor },
    solve::{ realized_path, Solve },
};

/// Results of a [`FieldToPath`] run, in laboratory units.
#[derive(Clone, Debug)]
pub struct SolvedPath {
    /// Time points (ps), length `n`.
    pub time: nd::Array1<f64>,
    /// Realized dipole trajectory, shape `(n, 2)`.
    pub path: nd::Array2<f64>,
    /// State amplitude history, shape `(2m + 1, n)`.
    pub states: nd::Array2<C64>,
}

/// Forward-simulation solver (field series → realized path).
///
/// The input field series is in V/Å and is converted back to atomic units
/// on construction, inverting the [`PathToField`][super::PathToField]
/// export conversion.
pub struct FieldToPath {
    rotor: Rotor,
    dt: f64,
    n: usize,
    fields: Vec<Field>,
}

impl FieldToPath {
    /// Set up a forward simulation with the default rotor parameters.
    pub fn new(fields: &nd::Array2<f64>, dt: f64) -> Result<Self> {
        Self::with_params(fields, dt, RotorParams::default())
    }

    /// Set up a forward simulation with explicit rotor parameters.
    ///
    /// The field series must have shape `(n, 2)` with `n >= 1`.
    pub fn with_params(
        fields: &nd::Array2<f64>,
        dt: f64,
        params: RotorParams,
    ) -> Result<Self>
    {
        if fields.ncols() != 2 || fields.nrows() == 0 {
            return Err(RotorError::BadShape { got: fields.dim() });
        }
        if dt <= 0.0 {
            return Err(RotorError::NonPositiveTimestep(dt));
        }
        let fields_au: Vec<Field> = fields.rows().into_iter()
            .map(|row| Field::new(
                row[0] / FIELD_AU_TO_V_PER_ANGSTROM,
                row[1] / FIELD_AU_TO_V_PER_ANGSTROM,
            ))
            .collect();
        let mut rotor = Rotor::new(params);
        rotor.set_field(fields_au[0]);
        Ok(Self { rotor, dt, n: fields_au.len(), fields: fields_au })
    }

    /// Number of time points.
    pub fn len(&self) -> usize { self.n }

    pub fn is_empty(&self) -> bool { self.n == 0 }
}

impl Solve for FieldToPath {
    type Output = SolvedPath;

    fn solve(&mut self) -> Result<()> {
        for i in 1..self.n {
            self.rotor.evolve(self.dt)?;
            self.rotor.update_field(self.fields[i]);
        }
        Ok(())
    }

    fn export(&self) -> Result<SolvedPath> {
        let history = self.rotor.history();
        Ok(SolvedPath {
            time: history.times_array() * TIME_AU_TO_PS,
            path: realized_path(&self.rotor)?,
            states: history.states_array(),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn zero_field_keeps_dipole_at_origin() {
        let fields: nd::Array2<f64> = nd::Array2::zeros((5, 2));
        let mut solver = FieldToPath::new(&fields, 1000.0).unwrap();
        solver.solve().unwrap();
        let solved = solver.export().unwrap();
        assert_eq!(solved.path.dim(), (5, 2));
        assert_eq!(solved.states.dim(), (17, 5));
        for v in solved.path.iter() {
            assert!(v.abs() < 1e-12);
        }
    }

    #[test]
    fn export_times_are_in_picoseconds() {
        let fields: nd::Array2<f64> = nd::Array2::zeros((4, 2));
        let mut solver = FieldToPath::new(&fields, 1000.0).unwrap();
        solver.solve().unwrap();
        let solved = solver.export().unwrap();
        let expected = 1000.0 * crate::params::TIME_AU_TO_PS;
        assert!((solved.time[1] - expected).abs() < 1e-15);
        assert!((solved.time[3] - 3.0 * expected).abs() < 1e-12);
    }

    #[test]
    fn bad_field_shape_is_rejected() {
        let fields: nd::Array2<f64> = nd::Array2::zeros((0, 2));
        assert!(matches!(
            FieldToPath::new(&fields, 1000.0),
            Err(RotorError::BadShape { got: (0, 2) }),
        ));
    }
}
