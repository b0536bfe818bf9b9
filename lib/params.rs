//! Physical constants and unit conversions.
//!
//! Everything downstream of these definitions works in atomic units with
//! ħ = 1; conversion to laboratory units happens only at export time.

/// Conversion factor from atomic-unit field amplitude to V/Å.
pub const FIELD_AU_TO_V_PER_ANGSTROM: f64 = 5.142e11 * 1e-10;

/// Conversion factor from atomic-unit time to picoseconds.
pub const TIME_AU_TO_PS: f64 = 2.418e-17 * 1e12;

/// Physical parameters of the rotor, fixed for the duration of a run.
///
/// The defaults describe the reference molecule with the angular-momentum
/// basis truncated at `m = 8`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RotorParams {
    /// Basis truncation: magnetic quantum numbers run over `-m..=m`.
    pub m: usize,
    /// Rotational constant *B* (atomic units).
    pub rot_const: f64,
    /// Dipole moment μ (atomic units).
    pub dipole: f64,
    /// Reduced Planck constant (1 by convention).
    pub hbar: f64,
}

impl Default for RotorParams {
    fn default() -> Self {
        Self {
            m: 8,
            rot_const: 4.033e-24 / 4.36e-18,
            dipole: 2.36496e-30 / 8.48e-30,
            hbar: 1.0,
        }
    }
}

impl RotorParams {
    /// Dimension of the truncated angular-momentum basis, `2m + 1`.
    pub fn basis_size(&self) -> usize { 2 * self.m + 1 }
}
