//! The rotor: current state, field, Hamiltonian, and the run history.

use ndarray::{ self as nd, s };
use ndarray_linalg::{ Eigh, UPLO };
use num_complex::Complex64 as C64;
use crate::{
    error::{ RotorError, Result },
    operators,
    params::RotorParams,
    state::StateVector,
};

/// External control field at one time instant (atomic units).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Field {
    pub x: f64,
    pub y: f64,
}

impl Field {
    pub fn new(x: f64, y: f64) -> Self { Self { x, y } }
}

/// Per-step record of a run: three parallel, index-aligned sequences.
///
/// Each completed step contributes exactly one entry to each sequence. The
/// time and state entries are appended by [`Rotor::evolve`]; the field entry
/// for that step is appended afterwards by [`Rotor::update_field`], and
/// [`Rotor::evolve`] refuses to run again until that has happened.
#[derive(Clone, Debug, Default)]
pub struct History {
    time: Vec<f64>,
    state: Vec<StateVector>,
    field: Vec<Field>,
}

impl History {
    fn start(time: f64, state: StateVector, field: Field) -> Self {
        Self { time: vec![time], state: vec![state], field: vec![field] }
    }

    /// Number of recorded steps, including the initial condition.
    pub fn len(&self) -> usize { self.time.len() }

    pub fn is_empty(&self) -> bool { self.time.is_empty() }

    fn check_aligned(&self) -> Result<()> {
        if self.time.len() == self.state.len()
            && self.time.len() == self.field.len()
        {
            Ok(())
        } else {
            Err(RotorError::HistoryMisaligned {
                time: self.time.len(),
                state: self.state.len(),
                field: self.field.len(),
            })
        }
    }

    /// All recorded states, oldest first.
    pub fn states(&self) -> &[StateVector] { &self.state }

    /// Recorded time points as an array (atomic units).
    pub fn times_array(&self) -> nd::Array1<f64> {
        self.time.iter().copied().collect()
    }

    /// Recorded state amplitudes as a `(2m + 1, n)` array, one column per
    /// time point.
    pub fn states_array(&self) -> nd::Array2<C64> {
        let n = self.state.len();
        let dim = self.state.first()
            .map(|psi| psi.amplitudes().len())
            .unwrap_or(0);
        let mut out: nd::Array2<C64> = nd::Array2::zeros((dim, n));
        for (k, psi) in self.state.iter().enumerate() {
            out.slice_mut(s![.., k]).assign(psi.amplitudes());
        }
        out
    }

    /// Recorded fields as an `(n, 2)` array (atomic units).
    pub fn fields_array(&self) -> nd::Array2<f64> {
        let mut out: nd::Array2<f64> = nd::Array2::zeros((self.field.len(), 2));
        for (k, f) in self.field.iter().enumerate() {
            out[[k, 0]] = f.x;
            out[[k, 1]] = f.y;
        }
        out
    }
}

/// A planar rigid rotor driven by an external field.
///
/// Owns the current state, field, and time together with their full history.
/// The Hamiltonian depends functionally on the field and is rebuilt, never
/// mutated in place, whenever the field changes.
#[derive(Clone, Debug)]
pub struct Rotor {
    params: RotorParams,
    state: StateVector,
    field: Field,
    time: f64,
    hamiltonian: nd::Array2<C64>,
    dipole_x: nd::Array2<C64>,
    dipole_y: nd::Array2<C64>,
    history: History,
}

impl Rotor {
    /// Create a rotor in its ground state with zero field at `t = 0`.
    pub fn new(params: RotorParams) -> Self {
        let state = StateVector::ground(params.m);
        let field = Field::default();
        let hamiltonian = build_hamiltonian(&params, field);
        let dipole_x = operators::dipole_x(params.m);
        let dipole_y = operators::dipole_y(params.m);
        let history = History::start(0.0, state.clone(), field);
        Self {
            params,
            state,
            field,
            time: 0.0,
            hamiltonian,
            dipole_x,
            dipole_y,
            history,
        }
    }

    pub fn params(&self) -> &RotorParams { &self.params }

    pub fn state(&self) -> &StateVector { &self.state }

    pub fn field(&self) -> Field { self.field }

    pub fn time(&self) -> f64 { self.time }

    pub fn history(&self) -> &History { &self.history }

    /// Matrix representation of the x dipole projection for this basis.
    pub fn dipole_x(&self) -> &nd::Array2<C64> { &self.dipole_x }

    /// Matrix representation of the y dipole projection for this basis.
    pub fn dipole_y(&self) -> &nd::Array2<C64> { &self.dipole_y }

    /// Propagate the state one step of `dt` under the current Hamiltonian.
    ///
    /// The propagator `U = exp(-i H dt / ħ)` is applied through the Hermitian
    /// eigendecomposition of `H`, which keeps each step exactly unitary up to
    /// rounding. Appends the new time and state to the history; the caller
    /// records the field entry for the new step through
    /// [`Self::update_field`] before evolving again.
    pub fn evolve(&mut self, dt: f64) -> Result<()> {
        if dt <= 0.0 {
            return Err(RotorError::NonPositiveTimestep(dt));
        }
        self.history.check_aligned()?;
        let (E, V): (nd::Array1<f64>, nd::Array2<C64>)
            = self.hamiltonian.eigh(UPLO::Lower)?;
        let c = V.t().mapv(|v| v.conj()).dot(self.state.amplitudes());
        let phases = E.mapv(|e| (-C64::i() * e * dt / self.params.hbar).exp());
        let amplitudes = V.dot(&(&c * &phases));
        let state_new = StateVector::new(self.params.m, amplitudes)?;
        self.time += dt;
        self.state = state_new.clone();
        self.history.time.push(self.time);
        self.history.state.push(state_new);
        Ok(())
    }

    /// Set the field and rebuild the Hamiltonian, overwriting the last
    /// history field entry in place.
    ///
    /// Initialization-only: establishes the field at step 0 without creating
    /// a spurious duplicate entry. Later steps go through
    /// [`Self::update_field`].
    pub fn set_field(&mut self, field: Field) {
        self.field = field;
        self.hamiltonian = build_hamiltonian(&self.params, field);
        if let Some(last) = self.history.field.last_mut() {
            *last = field;
        }
    }

    /// Set the field for the step just evolved into, rebuild the
    /// Hamiltonian, and append the field entry to the history.
    pub fn update_field(&mut self, field: Field) {
        self.field = field;
        self.hamiltonian = build_hamiltonian(&self.params, field);
        self.history.field.push(field);
    }
}

/// Build the rotor Hamiltonian for a given field:
/// `H = B diag((k - m)²) - μ cosφ fx - μ sinφ fy`.
pub fn build_hamiltonian(params: &RotorParams, field: Field)
    -> nd::Array2<C64>
{
    let m = params.m;
    let rot: nd::Array1<C64> = (0..2 * m + 1)
        .map(|k| C64::from(params.rot_const * (k as f64 - m as f64).powi(2)))
        .collect();
    nd::Array2::from_diag(&rot)
        - operators::dipole_x(m) * C64::from(params.dipole * field.x)
        - operators::dipole_y(m) * C64::from(params.dipole * field.y)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn hamiltonian_is_hermitian() {
        let params = RotorParams::default();
        let H = build_hamiltonian(&params, Field::new(0.3, -0.7));
        let Hdag = H.t().mapv(|h| h.conj());
        let maxdiff = (&H - &Hdag).iter()
            .map(|d| d.norm())
            .fold(0.0_f64, f64::max);
        assert!(maxdiff < 1e-15);
    }

    #[test]
    fn zero_field_evolution_preserves_norm() {
        let mut rotor = Rotor::new(RotorParams::default());
        for _ in 0..100 {
            rotor.evolve(1000.0).unwrap();
            rotor.update_field(Field::default());
        }
        assert!((rotor.state().norm_sq() - 1.0).abs() < 1e-10);
        assert_eq!(rotor.history().len(), 101);
    }

    #[test]
    fn nonpositive_dt_is_rejected() {
        let mut rotor = Rotor::new(RotorParams::default());
        assert!(matches!(
            rotor.evolve(0.0),
            Err(RotorError::NonPositiveTimestep(_)),
        ));
        assert!(matches!(
            rotor.evolve(-1.0),
            Err(RotorError::NonPositiveTimestep(_)),
        ));
    }

    #[test]
    fn missing_field_entry_is_caught() {
        let mut rotor = Rotor::new(RotorParams::default());
        rotor.evolve(1000.0).unwrap();
        // no update_field: the next evolution must refuse to run
        assert!(matches!(
            rotor.evolve(1000.0),
            Err(RotorError::HistoryMisaligned { time: 2, state: 2, field: 1 }),
        ));
    }

    #[test]
    fn set_field_overwrites_update_field_appends() {
        let mut rotor = Rotor::new(RotorParams::default());
        rotor.set_field(Field::new(1.0, 2.0));
        assert_eq!(rotor.history().len(), 1);
        assert_eq!(rotor.history().fields_array()[[0, 0]], 1.0);
        rotor.evolve(1000.0).unwrap();
        rotor.update_field(Field::new(3.0, 4.0));
        assert_eq!(rotor.history().len(), 2);
        let fields = rotor.history().fields_array();
        assert_eq!(fields.dim(), (2, 2));
        assert_eq!(fields[[1, 1]], 4.0);
    }
}
