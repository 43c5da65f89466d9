use crate::population::Scheme;

// POPULATION ANALYSIS
// partitioning scheme that is used if none is specified
pub const SCHEME: Scheme = Scheme::Mulliken;
// verbosity of the logger (2 trace ... -2 error)
pub const VERBOSE: i8 = 0;
// config file
pub const CONFIG_FILE_NAME: &str = "orbpop.toml";

// TOLERANCES
// absolute and relative tolerance for the symmetry of matrices and weights
pub const SYMMETRY_TOLERANCE: f64 = 1e-8;
pub const RELATIVE_TOLERANCE: f64 = 1e-5;
// absolute tolerance for unit diagonals, MO normalization and the weight normalization
pub const NORMALIZATION_TOLERANCE: f64 = 1e-6;
// allowed deviation between the total population and the number of electrons
pub const POPULATION_TOLERANCE: f64 = 1e-6;
// occupation numbers above this value are reported
pub const MAX_OCCUPATION: f64 = 2.0;
// eigenvalues with a smaller magnitude are treated as zero
pub const EIGH_THRESHOLD: f64 = 1e-9;

// INPUT/OUTPUT FILES
pub const COEFFICIENTS_FILE: &str = "coeff_ab_mo.npy";
pub const OCCUPATIONS_FILE: &str = "occupations.npy";
pub const OVERLAP_FILE: &str = "olp_ab_ab.npy";
pub const ATOM_INDICES_FILE: &str = "ab_atom_indices.npy";
pub const POPULATIONS_FILE: &str = "populations.npy";
