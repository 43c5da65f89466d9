use crate::error::{PopulationError, Result};
use crate::orthogonalization::power_symmetric;
use crate::population::mulliken::mulliken_populations;
use crate::population::{AtomWeights, Populations};
use crate::projection::project;
use log::debug;
use ndarray::prelude::*;

/// Mulliken analysis after the molecular orbitals are expressed in a different basis.
///
/// The new basis is given by `coeff_ab_new` (K x L), whose columns expand the L new basis
/// functions in the K atomic basis functions. The orbitals are projected onto the new basis
/// with the overlaps
///     S       =  T^t S T,      S      =  T^t S C
///      new,new                  new,mo
/// and the populations are partitioned with `new_atom_indices` and `new_atom_weights`, which
/// refer to the new basis functions.
pub fn mulliken_populations_newbasis(
    coeff_ab_mo: ArrayView2<f64>,
    occupations: ArrayView1<f64>,
    olp_ab_ab: ArrayView2<f64>,
    n_atoms: usize,
    coeff_ab_new: ArrayView2<f64>,
    new_atom_indices: &[usize],
    new_atom_weights: AtomWeights,
) -> Result<Populations> {
    if !olp_ab_ab.is_square() {
        return Err(PopulationError::value_error("Overlap matrix is not square."));
    }
    let n_ab: usize = olp_ab_ab.nrows();
    if coeff_ab_mo.nrows() != n_ab {
        return Err(PopulationError::value_error(
            "Number of atomic orbitals in the transformation matrix and overlap matrix are not \
             equal.",
        ));
    }
    if coeff_ab_new.nrows() != n_ab {
        return Err(PopulationError::value_error(
            "Number of atomic orbitals in the transformation matrix to the new basis and the \
             overlap matrix are not equal.",
        ));
    }

    let olp_new_ab: Array2<f64> = coeff_ab_new.t().dot(&olp_ab_ab);
    let olp_new_new: Array2<f64> = olp_new_ab.dot(&coeff_ab_new);
    let olp_new_mo: Array2<f64> = olp_new_ab.dot(&coeff_ab_mo);
    let coeff_new_mo: Array2<f64> = project(olp_new_new.view(), olp_new_mo.view())?;
    debug!(
        "orbitals projected onto a basis of {} functions",
        coeff_new_mo.nrows()
    );

    mulliken_populations(
        coeff_new_mo.view(),
        occupations,
        olp_new_new.view(),
        n_atoms,
        new_atom_indices,
        new_atom_weights,
    )
}

/// Löwdin populations: the Mulliken analysis in the symmetrically orthogonalized basis
///           -1/2
///     T  = S
/// whose functions keep the atom assignment of the atomic basis functions they stem from.
pub fn lowdin_populations(
    coeff_ab_mo: ArrayView2<f64>,
    occupations: ArrayView1<f64>,
    olp_ab_ab: ArrayView2<f64>,
    n_atoms: usize,
    ab_atom_indices: &[usize],
    atom_weights: AtomWeights,
) -> Result<Populations> {
    let coeff_ab_oab: Array2<f64> = power_symmetric(olp_ab_ab, -0.5)?;
    mulliken_populations_newbasis(
        coeff_ab_mo,
        occupations,
        olp_ab_ab,
        n_atoms,
        coeff_ab_oab.view(),
        ab_atom_indices,
        atom_weights,
    )
}
