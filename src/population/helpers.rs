use itertools::Itertools;
use ndarray::prelude::*;

/// Construct the density matrix
///       ⎲
/// P  =  ⎳  C   n  C
///  µν   i   µi  i  νi
/// Orbitals without occupation do not contribute and are skipped.
pub fn density_matrix(orbs: ArrayView2<f64>, occupations: ArrayView1<f64>) -> Array2<f64> {
    let occ_indx: Vec<usize> = occupations.iter().positions(|&x| x > 0.0).collect();
    let occ_orbs: Array2<f64> = orbs.select(Axis(1), &occ_indx);
    let f_occ: Array1<f64> = occupations.select(Axis(0), &occ_indx);
    (&occ_orbs * &f_occ).dot(&occ_orbs.t())
}

/// Charge associated with every pair of basis functions, S_jk P_kj. The sum over all pairs
/// is the number of electrons.
pub fn pair_populations(olp: ArrayView2<f64>, density: ArrayView2<f64>) -> Array2<f64> {
    &olp * &density.t()
}
