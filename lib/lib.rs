#![allow(dead_code, non_snake_case, non_upper_case_globals)]

//! Quantum control of a planar rigid rotor.
//!
//! Computes the time-dependent field that drives the rotor's dipole-moment
//! expectation along a desired 2D path ([`solve::PathToField`]), verifies the
//! result by forward propagation ([`solve::FieldToPath`]), and samples
//! sensitivity to field noise by Monte Carlo ([`noise::NoiseAnalyzer`]).
//!
//! All internal quantities are in atomic units (ħ = 1); exported fields and
//! times are converted to V/Å and picoseconds.

pub mod params;
pub mod error;
pub mod state;
pub mod operators;
pub mod rotor;
pub mod solve;
pub mod noise;
pub mod output;
