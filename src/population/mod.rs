pub use helpers::{density_matrix, pair_populations};
pub use lowdin::{lowdin_populations, mulliken_populations_newbasis};
pub use mulliken::mulliken_populations;
pub use weights::{mulliken_weight_tensor, AtomWeights};

mod helpers;
pub mod logging;
mod lowdin;
mod mulliken;
mod weights;

use crate::error::{PopulationError, Result};
use ndarray::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-fatal findings of a population analysis. The populations are still returned.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// Orbitals with more than two electrons.
    OccupationExceedsMaximum { orbitals: Vec<usize> },
    /// The populations do not add up to the number of electrons, the weights do not
    /// partition the charge completely.
    PopulationMismatch { population: f64, electrons: f64 },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Diagnostic::OccupationExceedsMaximum { orbitals } => write!(
                f,
                "At least one occupation number exceeds 2 (orbitals {:?}).",
                orbitals
            ),
            Diagnostic::PopulationMismatch {
                population,
                electrons,
            } => write!(
                f,
                "Population ({:.8}) does not match up with the number of electrons ({:.8}).",
                population, electrons
            ),
        }
    }
}

/// Electron populations of the atoms together with the findings of the analysis.
#[derive(Debug, Clone)]
pub struct Populations {
    pub populations: Array1<f64>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Populations {
    pub fn total(&self) -> f64 {
        self.populations.sum()
    }

    /// Partial charges Z_A - N_A.
    pub fn charges(&self, nuclear_charges: ArrayView1<f64>) -> Result<Array1<f64>> {
        if nuclear_charges.len() != self.populations.len() {
            return Err(PopulationError::value_error(format!(
                "Number of nuclear charges ({}) and atoms ({}) are not equal.",
                nuclear_charges.len(),
                self.populations.len()
            )));
        }
        Ok(&nuclear_charges - &self.populations)
    }
}

/// Partitioning scheme of the electron density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Mulliken,
    Lowdin,
}

impl Scheme {
    pub fn populations(
        &self,
        coeff_ab_mo: ArrayView2<f64>,
        occupations: ArrayView1<f64>,
        olp_ab_ab: ArrayView2<f64>,
        n_atoms: usize,
        ab_atom_indices: &[usize],
        atom_weights: AtomWeights,
    ) -> Result<Populations> {
        match self {
            Scheme::Mulliken => mulliken_populations(
                coeff_ab_mo,
                occupations,
                olp_ab_ab,
                n_atoms,
                ab_atom_indices,
                atom_weights,
            ),
            Scheme::Lowdin => lowdin_populations(
                coeff_ab_mo,
                occupations,
                olp_ab_ab,
                n_atoms,
                ab_atom_indices,
                atom_weights,
            ),
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Scheme::Mulliken => write!(f, "Mulliken"),
            Scheme::Lowdin => write!(f, "Löwdin"),
        }
    }
}
