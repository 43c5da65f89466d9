use crate::defaults::{NORMALIZATION_TOLERANCE, RELATIVE_TOLERANCE, SYMMETRY_TOLERANCE};
use crate::error::{PopulationError, Result};
use crate::utils::array_helper::{all_finite, is_symmetric};
use ndarray::prelude::*;

/// How the charge of a pair of basis functions is distributed among the atoms.
#[derive(Debug, Clone, Copy)]
pub enum AtomWeights<'a> {
    /// Equal sharing: a pair on atom A counts fully for A, a pair between A and B counts
    /// half for A and half for B.
    Mulliken,
    /// Explicit weights w^A_jk of shape (n_atoms, K, K).
    Custom(ArrayView3<'a, f64>),
}

impl<'a> Default for AtomWeights<'a> {
    fn default() -> Self {
        AtomWeights::Mulliken
    }
}

impl<'a> AtomWeights<'a> {
    /// Checks that explicit weights fit the basis and form a partition of every pair.
    /// The Mulliken weights are valid by construction.
    pub fn validate(&self, n_atoms: usize, n_ab: usize) -> Result<()> {
        let weights: ArrayView3<f64> = match self {
            AtomWeights::Mulliken => return Ok(()),
            AtomWeights::Custom(w) => w.view(),
        };
        if !all_finite(&weights) {
            return Err(PopulationError::type_error(
                "Orbital weights for the atoms must only contain finite floating point numbers.",
            ));
        }
        if weights.len_of(Axis(0)) != n_atoms {
            return Err(PopulationError::value_error(
                "First dimension of the orbital weights for the atoms must be equal to the \
                 number of atoms.",
            ));
        }
        if weights.len_of(Axis(1)) != n_ab || weights.len_of(Axis(2)) != n_ab {
            return Err(PopulationError::value_error(
                "Second and third dimension of the orbital weights for the atoms must be equal \
                 to the number of basis functions.",
            ));
        }
        if !weights
            .axis_iter(Axis(0))
            .all(|w_a| is_symmetric(w_a, RELATIVE_TOLERANCE, SYMMETRY_TOLERANCE))
        {
            return Err(PopulationError::value_error(
                "Orbital weights for each atom must be symmetric with respect to the \
                 interchange of the two basis function indices.",
            ));
        }
        if !weights
            .sum_axis(Axis(0))
            .iter()
            .all(|w| (w - 1.0).abs() <= NORMALIZATION_TOLERANCE)
        {
            return Err(PopulationError::value_error(
                "Orbital weights for the atoms must be normalized, i.e. the sum over the atoms \
                 must be 1 for every pair of basis functions.",
            ));
        }
        Ok(())
    }
}

/// Dense tensor of the Mulliken weights:
///       A      1
///      w   =   - (δ      + δ     )
///       jk     2   A,a(j)    A,a(k)
/// where a(j) is the atom of basis function j.
pub fn mulliken_weight_tensor(n_atoms: usize, ab_atom_indices: &[usize]) -> Result<Array3<f64>> {
    if let Some(idx) = ab_atom_indices.iter().find(|&&idx| idx >= n_atoms) {
        return Err(PopulationError::value_error(format!(
            "Atom indices of each atomic basis function must be less than the number of atoms \
             ({}), found {}.",
            n_atoms, idx
        )));
    }
    let n_ab: usize = ab_atom_indices.len();
    let mut weights: Array3<f64> = Array3::zeros((n_atoms, n_ab, n_ab));
    for (j, &atom_j) in ab_atom_indices.iter().enumerate() {
        for (k, &atom_k) in ab_atom_indices.iter().enumerate() {
            weights[[atom_j, j, k]] += 0.5;
            weights[[atom_k, j, k]] += 0.5;
        }
    }
    Ok(weights)
}
