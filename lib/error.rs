//! Error taxonomy for rotor construction, evolution, and the solvers.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RotorError {
    /// An explicit amplitude vector does not match the `2m + 1` basis size.
    #[error("expected {expected} amplitudes for m = {m}, got {got}")]
    AmplitudeLength { m: usize, expected: usize, got: usize },

    /// An operator was applied to a state of a different dimension.
    #[error("operator shape {got:?} does not match basis size {expected}")]
    OperatorShape { expected: usize, got: (usize, usize) },

    /// A path or field array is not `(n, 2)`-shaped.
    #[error("expected an (n, 2) array with n >= 1, got shape {got:?}")]
    BadShape { got: (usize, usize) },

    /// Evolution or differentiation was requested with `dt <= 0`.
    #[error("non-positive timestep dt = {0}")]
    NonPositiveTimestep(f64),

    /// Too few samples for a three-point second-derivative stencil.
    #[error("need at least 3 path points for a second derivative, got {0}")]
    TooFewPoints(usize),

    /// The 2×2 inversion for the control field is singular; the state has
    /// reached a configuration (e.g. an exact eigenstate) where the path
    /// acceleration no longer determines the field.
    #[error("degenerate control system at step {step} (determinant {det:e})")]
    DegenerateControl { step: usize, det: f64 },

    /// A solved field component came out non-finite.
    #[error("non-finite control field at step {step}")]
    NonFiniteField { step: usize },

    /// The per-step field entry was not recorded before the next evolution.
    #[error("history misaligned: {time} times, {state} states, {field} fields")]
    HistoryMisaligned { time: usize, state: usize, field: usize },

    /// Noise standard deviation must be non-negative and finite.
    #[error("bad noise level: {0}")]
    BadNoise(f64),

    /// Monte Carlo aggregation needs at least one sample.
    #[error("at least one Monte Carlo sample is required")]
    NoSamples,

    #[error("linear algebra error: {0}")]
    Linalg(#[from] ndarray_linalg::error::LinalgError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("npz write error: {0}")]
    Npz(#[from] ndarray_npy::WriteNpzError),
}

pub type Result<T> = std::result::Result<T, RotorError>;
