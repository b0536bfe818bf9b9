//! Fixed matrix representations over the truncated angular-momentum basis.
//!
//! All matrices are `(2m + 1) × (2m + 1)` dense complex arrays with exact
//! closed forms, indexed `0..2m` for magnetic quantum numbers `-m..=m`. Two
//! calls with equal `m` produce bit-identical arrays.

use ndarray as nd;
use num_complex::Complex64 as C64;

/// Dipole projection onto x (cos φ): tridiagonal, zero diagonal, 0.5 at
/// offsets ±1.
pub fn dipole_x(m: usize) -> nd::Array2<C64> {
    let n = 2 * m + 1;
    let mut op: nd::Array2<C64> = nd::Array2::zeros((n, n));
    for k in 0..n - 1 {
        op[[k, k + 1]] = 0.5.into();
        op[[k + 1, k]] = 0.5.into();
    }
    op
}

/// Dipole projection onto y (sin φ): +0.5i at offset +1, −0.5i at offset −1.
pub fn dipole_y(m: usize) -> nd::Array2<C64> {
    let n = 2 * m + 1;
    let mut op: nd::Array2<C64> = nd::Array2::zeros((n, n));
    for k in 0..n - 1 {
        op[[k, k + 1]] = C64::i() * 0.5;
        op[[k + 1, k]] = -C64::i() * 0.5;
    }
    op
}

/// First angular derivative ∂/∂φ: diagonal `i (k − m)`.
pub fn d_dphi(m: usize) -> nd::Array2<C64> {
    let diag: nd::Array1<C64> = (0..2 * m + 1)
        .map(|k| C64::i() * (k as f64 - m as f64))
        .collect();
    nd::Array2::from_diag(&diag)
}

/// Second angular derivative ∂²/∂φ²: diagonal `-(k − m)²`.
pub fn d2_dphi2(m: usize) -> nd::Array2<C64> {
    let diag: nd::Array1<C64> = (0..2 * m + 1)
        .map(|k| C64::from(-(k as f64 - m as f64).powi(2)))
        .collect();
    nd::Array2::from_diag(&diag)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn dipole_x_values() {
        let op = dipole_x(8);
        assert_eq!(op.dim(), (17, 17));
        for ((i, j), v) in op.indexed_iter() {
            let expected = if i.abs_diff(j) == 1 { 0.5 } else { 0.0 };
            assert_eq!(*v, C64::from(expected));
        }
    }

    #[test]
    fn dipole_y_values() {
        let op = dipole_y(8);
        assert_eq!(op.dim(), (17, 17));
        for ((i, j), v) in op.indexed_iter() {
            let expected = if j == i + 1 {
                C64::i() * 0.5
            } else if i == j + 1 {
                -C64::i() * 0.5
            } else {
                C64::from(0.0)
            };
            assert_eq!(*v, expected);
        }
    }

    #[test]
    fn angular_derivatives_are_diagonal() {
        let d1 = d_dphi(8);
        let d2 = d2_dphi2(8);
        for ((i, j), v) in d1.indexed_iter() {
            if i == j {
                assert_eq!(*v, C64::i() * (i as f64 - 8.0));
            } else {
                assert_eq!(*v, C64::from(0.0));
            }
        }
        for i in 0..17 {
            assert_eq!(d2[[i, i]], C64::from(-((i as f64 - 8.0).powi(2))));
        }
    }

    #[test]
    fn construction_is_deterministic() {
        assert_eq!(dipole_x(8), dipole_x(8));
        assert_eq!(dipole_y(8), dipole_y(8));
        assert_eq!(d_dphi(8), d_dphi(8));
        assert_eq!(d2_dphi2(8), d2_dphi2(8));
    }

    #[test]
    fn dipole_x_squared_diagonal() {
        // band truncation leaves 0.25 at the corners of cos²φ
        let cos = dipole_x(8);
        let cos2 = cos.dot(&cos);
        for i in 0..17 {
            let expected = if i == 0 || i == 16 { 0.25 } else { 0.5 };
            assert!((cos2[[i, i]].re - expected).abs() < f64::EPSILON);
            assert_eq!(cos2[[i, i]].im, 0.0);
        }
    }
}
