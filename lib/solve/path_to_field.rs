//! Inverse control: solve for the field series that drives the dipole
//! expectation along a desired path.

use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    error::{ RotorError, Result },
    operators,
    params::{ RotorParams, FIELD_AU_TO_V_PER_ANGSTROM, TIME_AU_TO_PS },
    rotor::{ Field, Rotor },
    solve::{ realized_path, second_derivative, Solve },
};

/// Results of a [`PathToField`] run, in laboratory units.
#[derive(Clone, Debug)]
pub struct SolvedField {
    /// Time points (ps), length `n`.
    pub time: nd::Array1<f64>,
    /// Control field series (V/Å), shape `(n, 2)`.
    pub fields: nd::Array2<f64>,
    /// Realized dipole trajectory, shape `(n, 2)`. Derived verification
    /// output; the control loop itself never feeds it back.
    pub path: nd::Array2<f64>,
    /// State amplitude history, shape `(2m + 1, n)`.
    pub states: nd::Array2<C64>,
}

/// Inverse-control solver (desired path → field series).
///
/// At each step the required field follows from a 2×2 linear system relating
/// the desired kinematic acceleration of the path to the instantaneous
/// quantum back-reaction of the state; the rotor is then evolved under that
/// field. The loop is open-loop: tracking error is not corrected beyond the
/// per-step inversion.
pub struct PathToField {
    rotor: Rotor,
    dt: f64,
    n: usize,
    ddpath: nd::Array2<f64>,
    op1: nd::Array2<C64>,
    op2: nd::Array2<C64>,
    cos2: nd::Array2<C64>,
    sin2: nd::Array2<C64>,
    cos_sin: nd::Array2<C64>,
    sin_cos: nd::Array2<C64>,
}

impl PathToField {
    /// Set up a solver for a desired path with uniform timestep `dt`
    /// (atomic units), using the default rotor parameters.
    pub fn new(path_desired: &nd::Array2<f64>, dt: f64) -> Result<Self> {
        Self::with_params(path_desired, dt, RotorParams::default())
    }

    /// Set up a solver with explicit rotor parameters.
    ///
    /// The desired path must have shape `(n, 2)` with `n >= 3` so that a
    /// second time-derivative is defined. The step-0 field is computed here
    /// from the initial ground state, which has a non-singular control
    /// system for these operators.
    pub fn with_params(
        path_desired: &nd::Array2<f64>,
        dt: f64,
        params: RotorParams,
    ) -> Result<Self>
    {
        if path_desired.ncols() != 2 {
            return Err(RotorError::BadShape { got: path_desired.dim() });
        }
        if dt <= 0.0 {
            return Err(RotorError::NonPositiveTimestep(dt));
        }
        let n = path_desired.nrows();
        let ddx = second_derivative(&path_desired.column(0), dt)?;
        let ddy = second_derivative(&path_desired.column(1), dt)?;
        let ddpath = nd::stack![nd::Axis(1), ddx, ddy];

        let m = params.m;
        let cos = operators::dipole_x(m);
        let sin = operators::dipole_y(m);
        let dd = operators::d_dphi(m);
        let d2 = operators::d2_dphi2(m);
        let op1 = &cos + sin.dot(&dd) * 4.0 - cos.dot(&d2) * 4.0;
        let op2 = &sin - cos.dot(&dd) * 4.0 - sin.dot(&d2) * 4.0;
        let cos2 = cos.dot(&cos);
        let sin2 = sin.dot(&sin);
        let cos_sin = cos.dot(&sin);
        let sin_cos = sin.dot(&cos);

        let mut solver = Self {
            rotor: Rotor::new(params),
            dt,
            n,
            ddpath,
            op1,
            op2,
            cos2,
            sin2,
            cos_sin,
            sin_cos,
        };
        let field = solver.field_at(0)?;
        solver.rotor.set_field(field);
        Ok(solver)
    }

    /// Number of time points.
    pub fn len(&self) -> usize { self.n }

    pub fn is_empty(&self) -> bool { self.n == 0 }

    /// Solve the 2×2 system `A f = b` for the field at step `j` from the
    /// rotor's current state.
    ///
    /// `A` collects the quadratic dipole expectations scaled by
    /// `2 B μ / ħ²`; `b` combines the desired path acceleration with the
    /// quantum back-reaction correction. The imaginary residue of the
    /// solution is numerical noise and is discarded.
    fn field_at(&self, j: usize) -> Result<Field> {
        let state = self.rotor.state();
        let p = self.rotor.params();
        let (B, mu, hbar) = (p.rot_const, p.dipole, p.hbar);

        let sin2 = state.expectation(&self.sin2)?;
        let cos2 = state.expectation(&self.cos2)?;
        let cos_sin = state.expectation(&self.cos_sin)?;
        let sin_cos = state.expectation(&self.sin_cos)?;

        // dimensionless part of the determinant; vanishes exactly when the
        // state no longer couples path acceleration to the field
        let gram = sin2 * cos2 - sin_cos * sin_cos;
        if gram.norm() <= f64::EPSILON {
            return Err(RotorError::DegenerateControl {
                step: j,
                det: gram.norm(),
            });
        }
        let det = 4.0 * B.powi(2) * mu.powi(2) / hbar.powi(4) * gram;

        let c = 2.0 * B * mu / hbar.powi(2);
        let a11 = c * sin2;
        let a12 = -c * cos_sin;
        let a21 = -c * sin_cos;
        let a22 = c * cos2;

        let cb = B.powi(2) / hbar.powi(2);
        let b1 = self.ddpath[[j, 0]] + (state.expectation(&self.op1)? * cb).re;
        let b2 = self.ddpath[[j, 1]] + (state.expectation(&self.op2)? * cb).re;

        let fx = (a22 * b1 - a12 * b2) / det;
        let fy = (-a21 * b1 + a11 * b2) / det;
        if !fx.re.is_finite() || !fy.re.is_finite() {
            return Err(RotorError::NonFiniteField { step: j });
        }
        Ok(Field::new(fx.re, fy.re))
    }
}

impl Solve for PathToField {
    type Output = SolvedField;

    fn solve(&mut self) -> Result<()> {
        for j in 1..self.n {
            self.rotor.evolve(self.dt)?;
            let field = self.field_at(j)?;
            self.rotor.update_field(field);
        }
        Ok(())
    }

    fn export(&self) -> Result<SolvedField> {
        let history = self.rotor.history();
        Ok(SolvedField {
            time: history.times_array() * TIME_AU_TO_PS,
            fields: history.fields_array() * FIELD_AU_TO_V_PER_ANGSTROM,
            path: realized_path(&self.rotor)?,
            states: history.states_array(),
        })
    }
}
