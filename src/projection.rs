use crate::error::{PopulationError, Result};
use crate::utils::array_helper::all_finite;
use ndarray::prelude::*;
use ndarray_linalg::{Factorize, Solve};

/// Express molecular orbitals in a (quasi) basis by least squares.
///
/// With the overlap of the new basis functions with themselves, `olp_new_new` (L x L), and
/// with the molecular orbitals, `olp_new_mo` (L x M), the coefficients X (L x M) solve
///     S      X  =  S
///      new,new      new,mo
/// The system is solved through an LU factorization of `olp_new_new`, the result is neither
/// normalized nor checked for orthonormality.
pub fn project(olp_new_new: ArrayView2<f64>, olp_new_mo: ArrayView2<f64>) -> Result<Array2<f64>> {
    if !(all_finite(&olp_new_new) && all_finite(&olp_new_mo)) {
        return Err(PopulationError::type_error(
            "Overlap matrices must only contain finite floating point numbers.",
        ));
    }
    if !olp_new_new.is_square() {
        return Err(PopulationError::value_error(
            "Overlap of the new basis functions with themselves is not square.",
        ));
    }
    if olp_new_new.nrows() != olp_new_mo.nrows() {
        return Err(PopulationError::value_error(
            "Number of new basis functions in the two overlap matrices are not equal.",
        ));
    }

    let lu = olp_new_new.factorize()?;
    let mut coeff_new_mo: Array2<f64> = Array2::zeros(olp_new_mo.raw_dim());
    for (mut x, b) in coeff_new_mo
        .axis_iter_mut(Axis(1))
        .zip(olp_new_mo.axis_iter(Axis(1)))
    {
        x.assign(&lu.solve(&b)?);
    }
    Ok(coeff_new_mo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::tests::random_system;
    use ndarray_linalg::generate::random;

    const EPSILON: f64 = 1e-10;

    #[test]
    fn project_solves_linear_system() {
        let (olp, _) = random_system(6, 6);
        let olp_new_mo: Array2<f64> = random((6, 4));
        let coeff: Array2<f64> = project(olp.view(), olp_new_mo.view()).unwrap();
        assert_eq!(coeff.dim(), (6, 4));
        assert!(olp.dot(&coeff).abs_diff_eq(&olp_new_mo, EPSILON));
    }

    #[test]
    fn project_recovers_coefficients() {
        // S C projected onto the same basis gives back C
        let (olp, coeff_ab_mo) = random_system(8, 5);
        let olp_ab_mo: Array2<f64> = olp.dot(&coeff_ab_mo);
        let coeff: Array2<f64> = project(olp.view(), olp_ab_mo.view()).unwrap();
        assert!(coeff.abs_diff_eq(&coeff_ab_mo, 1e-8));
    }

    #[test]
    fn project_rejects_inconsistent_shapes() {
        let olp: Array2<f64> = Array2::eye(4);
        let rect: Array2<f64> = Array2::zeros((4, 3));
        let olp_new_mo: Array2<f64> = Array2::zeros((3, 2));
        assert!(project(rect.view(), olp_new_mo.view()).unwrap_err().is_value_error());
        assert!(project(olp.view(), olp_new_mo.view()).unwrap_err().is_value_error());
    }

    #[test]
    fn project_rejects_singular_overlap() {
        let olp: Array2<f64> = Array2::zeros((3, 3));
        let olp_new_mo: Array2<f64> = Array2::ones((3, 2));
        assert!(project(olp.view(), olp_new_mo.view()).is_err());
    }
}
