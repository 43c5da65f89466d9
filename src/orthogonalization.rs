/*!

## Decompositions and powers of (symmetric) matrices

The routines of this module are the numerical building blocks of the Löwdin analysis:
the eigendecomposition of a symmetric matrix with eigenpairs ordered by the magnitude of the
eigenvalue, a truncated singular value decomposition and arbitrary powers of symmetric matrices.

 */
use crate::defaults::{EIGH_THRESHOLD, RELATIVE_TOLERANCE, SYMMETRY_TOLERANCE};
use crate::error::{PopulationError, Result};
use crate::utils::array_helper::{all_finite, argsort_abs, is_symmetric};
use log::debug;
use ndarray::prelude::*;
use ndarray_linalg::{Eigh, SVD, UPLO};

fn check_threshold(threshold: f64) -> Result<()> {
    if threshold.is_nan() {
        return Err(PopulationError::type_error("Threshold must be a number."));
    }
    if !(threshold >= 0.0 && threshold.is_finite()) {
        return Err(PopulationError::value_error(
            "Threshold must be a finite, non-negative number.",
        ));
    }
    Ok(())
}

/// Eigendecomposition of a real symmetric matrix.
///
/// The eigenvalues are sorted in descending order of their absolute value and the eigenvectors
/// (columns of the second array) are ordered accordingly. Eigenpairs whose eigenvalue has a
/// magnitude below `threshold` are discarded, [EIGH_THRESHOLD] is a sensible choice if the
/// null space of the matrix should be removed.
pub fn eigh(matrix: ArrayView2<f64>, threshold: f64) -> Result<(Array1<f64>, Array2<f64>)> {
    if !all_finite(&matrix) {
        return Err(PopulationError::type_error(
            "Matrix must only contain finite floating point numbers.",
        ));
    }
    if !matrix.is_square() {
        return Err(PopulationError::value_error("Matrix must be square."));
    }
    if !is_symmetric(matrix, RELATIVE_TOLERANCE, SYMMETRY_TOLERANCE) {
        return Err(PopulationError::value_error("Matrix must be symmetric."));
    }
    check_threshold(threshold)?;

    // LAPACK returns the eigenvalues in ascending order
    let (eigval, eigvec): (Array1<f64>, Array2<f64>) = matrix.eigh(UPLO::Lower)?;
    let order: Vec<usize> = argsort_abs(eigval.view())
        .into_iter()
        .rev()
        .filter(|&i| eigval[i].abs() >= threshold)
        .collect();
    if order.len() < eigval.len() {
        debug!(
            "eigh: {} of {} eigenpairs are below the threshold {:e}",
            eigval.len() - order.len(),
            eigval.len(),
            threshold
        );
    }

    Ok((eigval.select(Axis(0), &order), eigvec.select(Axis(1), &order)))
}

/// Singular value decomposition that only keeps the singular values above `threshold`.
///
/// Returns `(U, sigma, Vt)` with U (m x r), sigma (r) in descending order and Vt (r x n), so
/// that U diag(sigma) Vt reproduces the matrix up to the discarded singular values.
pub fn svd(
    matrix: ArrayView2<f64>,
    threshold: f64,
) -> Result<(Array2<f64>, Array1<f64>, Array2<f64>)> {
    if !all_finite(&matrix) {
        return Err(PopulationError::type_error(
            "Matrix must only contain finite floating point numbers.",
        ));
    }
    check_threshold(threshold)?;

    let (u, sigma, vt) = matrix.svd(true, true)?;
    let u: Array2<f64> = u.ok_or_else(|| {
        PopulationError::value_error("SVD did not return left singular vectors.")
    })?;
    let vt: Array2<f64> = vt.ok_or_else(|| {
        PopulationError::value_error("SVD did not return right singular vectors.")
    })?;

    let rank: usize = sigma.iter().take_while(|&&s| s > threshold).count();
    debug!(
        "svd: keeping {} of {} singular values above {:e}",
        rank,
        sigma.len(),
        threshold
    );

    Ok((
        u.slice(s![.., ..rank]).to_owned(),
        sigma.slice(s![..rank]).to_owned(),
        vt.slice(s![..rank, ..]).to_owned(),
    ))
}

/// Power of a symmetric matrix:
///       p          p   T
///      M   =  V  λ    V
///
/// Eigenvalues with a magnitude below [EIGH_THRESHOLD] are removed before they are raised to
/// `power`, so negative powers of (nearly) singular matrices act on the non-singular subspace
/// only. Unless `power` is a non-negative integer, all remaining eigenvalues must be positive.
pub fn power_symmetric(matrix: ArrayView2<f64>, power: f64) -> Result<Array2<f64>> {
    if !power.is_finite() {
        return Err(PopulationError::type_error("Power must be a finite number."));
    }
    let (eigval, eigvec): (Array1<f64>, Array2<f64>) = eigh(matrix, EIGH_THRESHOLD)?;

    let integral_power: bool = power >= 0.0 && power.fract() == 0.0;
    if !integral_power && eigval.iter().any(|&x| x <= 0.0) {
        return Err(PopulationError::value_error(format!(
            "Cannot raise a matrix with non-positive eigenvalues to the power {}: \
             the principal real root does not exist.",
            power
        )));
    }

    let eigval_p: Array1<f64> = eigval.mapv(|x| x.powf(power));
    Ok((&eigvec * &eigval_p).dot(&eigvec.t()))
}
