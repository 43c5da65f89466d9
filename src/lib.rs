//! Mulliken and Löwdin population analysis of molecular orbitals that are expanded
//! in a non-orthogonal atomic basis, together with the orthogonalization and
//! projection routines that the analysis is built on.
pub mod defaults;
pub mod error;
pub mod io;
pub mod orthogonalization;
pub mod population;
pub mod projection;
pub mod utils;

pub use error::{ErrorKind, PopulationError, Result};
pub use orthogonalization::{eigh, power_symmetric, svd};
pub use population::{
    density_matrix, lowdin_populations, mulliken_populations, mulliken_populations_newbasis,
    mulliken_weight_tensor, AtomWeights, Diagnostic, Populations, Scheme,
};
pub use projection::project;
