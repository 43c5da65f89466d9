use crate::defaults::*;
use crate::error::{PopulationError, Result};
use crate::population::helpers::{density_matrix, pair_populations};
use crate::population::logging::print_diagnostics;
use crate::population::{AtomWeights, Diagnostic, Populations};
use crate::utils::array_helper::{all_finite, is_symmetric};
use ndarray::prelude::*;

/// Checks that the orbitals, occupations, overlap and atom mapping are consistent.
/// Returns the non-fatal findings about the occupations.
fn check_input(
    coeff_ab_mo: ArrayView2<f64>,
    occupations: ArrayView1<f64>,
    olp_ab_ab: ArrayView2<f64>,
    n_atoms: usize,
    ab_atom_indices: &[usize],
) -> Result<Vec<Diagnostic>> {
    if !all_finite(&coeff_ab_mo) {
        return Err(PopulationError::type_error(
            "Transformation matrix from atomic basis functions to molecular orbitals must only \
             contain finite floating point numbers.",
        ));
    }
    if !all_finite(&occupations) {
        return Err(PopulationError::type_error(
            "Molecular orbital occupation numbers must be finite floating point numbers.",
        ));
    }
    if !all_finite(&olp_ab_ab) {
        return Err(PopulationError::type_error(
            "Overlap of the atomic basis functions must only contain finite floating point \
             numbers.",
        ));
    }

    // shapes
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
    if coeff_ab_mo.ncols() != occupations.len() {
        return Err(PopulationError::value_error(
            "Number of molecular orbitals in the transformation matrix and occupations are not \
             equal.",
        ));
    }

    // overlap and orbitals
    if !is_symmetric(olp_ab_ab, RELATIVE_TOLERANCE, SYMMETRY_TOLERANCE) {
        return Err(PopulationError::value_error(
            "Overlap of the atomic basis functions must be symmetric.",
        ));
    }
    if !olp_ab_ab
        .diag()
        .iter()
        .all(|s| (s - 1.0).abs() <= NORMALIZATION_TOLERANCE)
    {
        return Err(PopulationError::value_error(
            "Overlap of the atomic basis functions must be normalized.",
        ));
    }
    // diagonal of C^T S C without building the full MO overlap
    let mo_norms: Array1<f64> = (&olp_ab_ab.dot(&coeff_ab_mo) * &coeff_ab_mo).sum_axis(Axis(0));
    if let Some(i) = mo_norms
        .iter()
        .position(|n| (n - 1.0).abs() > NORMALIZATION_TOLERANCE)
    {
        return Err(PopulationError::value_error(format!(
            "Molecular orbitals (and the corresponding transformation matrix) must be \
             normalized, orbital {} has a norm of {:.8}.",
            i, mo_norms[i]
        )));
    }

    // occupations
    if occupations.iter().any(|&n| n < 0.0) {
        return Err(PopulationError::value_error(
            "Occupation numbers must be greater than or equal to 0.",
        ));
    }
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let overfilled: Vec<usize> = occupations
        .iter()
        .enumerate()
        .filter_map(|(i, &n)| if n > MAX_OCCUPATION { Some(i) } else { None })
        .collect();
    if !overfilled.is_empty() {
        diagnostics.push(Diagnostic::OccupationExceedsMaximum {
            orbitals: overfilled,
        });
    }

    // basis function to atom mapping
    if ab_atom_indices.len() != n_ab {
        return Err(PopulationError::value_error(
            "Number of atom indices must be equal to the number of atomic basis functions.",
        ));
    }
    if let Some(idx) = ab_atom_indices.iter().find(|&&idx| idx >= n_atoms) {
        return Err(PopulationError::value_error(format!(
            "Atom indices of each atomic basis function must be less than the number of atoms \
             ({}), found {}.",
            n_atoms, idx
        )));
    }
    Ok(diagnostics)
}

/// Calculate the populations of the atoms:
///       ⎲  ⎲   A
/// N  =  ⎳  ⎳  w   S   P
///  A    j  k   jk  jk  kj
/// The weights w^A_jk decide which part of the charge of the basis function pair (j, k) belongs
/// to atom A. They must sum to one over all atoms, so that the populations add up to the number
/// of electrons.
///
/// `coeff_ab_mo` (K x M) contains the molecular orbitals as columns, they have to be normalized
/// with respect to the overlap `olp_ab_ab` (K x K), which needs a unit diagonal.
/// `ab_atom_indices` maps each of the K basis functions to an atom in 0..n_atoms.
/// Occupations above 2 and a total population that differs from the number of electrons are
/// reported in the returned [Populations], all other inconsistencies are errors.
pub fn mulliken_populations(
    coeff_ab_mo: ArrayView2<f64>,
    occupations: ArrayView1<f64>,
    olp_ab_ab: ArrayView2<f64>,
    n_atoms: usize,
    ab_atom_indices: &[usize],
    atom_weights: AtomWeights,
) -> Result<Populations> {
    let mut diagnostics: Vec<Diagnostic> = check_input(
        coeff_ab_mo,
        occupations,
        olp_ab_ab,
        n_atoms,
        ab_atom_indices,
    )?;
    atom_weights.validate(n_atoms, olp_ab_ab.nrows())?;

    let p: Array2<f64> = density_matrix(coeff_ab_mo, occupations);
    let pair_pops: Array2<f64> = pair_populations(olp_ab_ab, p.view());

    let mut pops: Array1<f64> = Array1::zeros(n_atoms);
    match atom_weights {
        AtomWeights::Mulliken => {
            // w^A_jk = (δ_A,a(j) + δ_A,a(k)) / 2, so only the row and column sums are needed
            let rows: Array1<f64> = pair_pops.sum_axis(Axis(1));
            let cols: Array1<f64> = pair_pops.sum_axis(Axis(0));
            for (mu, &atom) in ab_atom_indices.iter().enumerate() {
                pops[atom] += 0.5 * (rows[mu] + cols[mu]);
            }
        }
        AtomWeights::Custom(weights) => {
            for (pop, w_a) in pops.iter_mut().zip(weights.axis_iter(Axis(0))) {
                *pop = (&pair_pops * &w_a).sum();
            }
        }
    }

    let n_elec: f64 = occupations.sum();
    let n_pop: f64 = pops.sum();
    if (n_elec - n_pop).abs() >= POPULATION_TOLERANCE {
        diagnostics.push(Diagnostic::PopulationMismatch {
            population: n_pop,
            electrons: n_elec,
        });
    }
    print_diagnostics(&diagnostics);

    Ok(Populations {
        populations: pops,
        diagnostics,
    })
}
