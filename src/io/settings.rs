use crate::defaults::*;
use crate::population::Scheme;
use serde::{Deserialize, Serialize};

fn default_scheme() -> Scheme {
    SCHEME
}
fn default_verbose() -> i8 {
    VERBOSE
}
fn default_coefficients() -> String {
    String::from(COEFFICIENTS_FILE)
}
fn default_occupations() -> String {
    String::from(OCCUPATIONS_FILE)
}
fn default_overlap() -> String {
    String::from(OVERLAP_FILE)
}
fn default_atom_indices() -> String {
    String::from(ATOM_INDICES_FILE)
}
fn default_populations() -> String {
    String::from(POPULATIONS_FILE)
}
fn default_input_config() -> InputConfig {
    InputConfig {
        coefficients: default_coefficients(),
        occupations: default_occupations(),
        overlap: default_overlap(),
        atom_indices: default_atom_indices(),
        atom_weights: None,
        nuclear_charges: None,
    }
}
fn default_output_config() -> OutputConfig {
    OutputConfig {
        populations: default_populations(),
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Configuration {
    #[serde(default = "default_scheme")]
    pub scheme: Scheme,
    #[serde(default = "default_verbose")]
    pub verbose: i8,
    /// Inferred from the largest atom index if not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_atoms: Option<usize>,
    #[serde(default = "default_input_config")]
    pub input: InputConfig,
    #[serde(default = "default_output_config")]
    pub output: OutputConfig,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
            verbose: default_verbose(),
            n_atoms: None,
            input: default_input_config(),
            output: default_output_config(),
        }
    }
}

/// Paths of the NumPy files that hold the input arrays.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct InputConfig {
    #[serde(default = "default_coefficients")]
    pub coefficients: String,
    #[serde(default = "default_occupations")]
    pub occupations: String,
    #[serde(default = "default_overlap")]
    pub overlap: String,
    #[serde(default = "default_atom_indices")]
    pub atom_indices: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atom_weights: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nuclear_charges: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct OutputConfig {
    #[serde(default = "default_populations")]
    pub populations: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: Configuration = toml::from_str("").unwrap();
        assert_eq!(config.scheme, Scheme::Mulliken);
        assert_eq!(config.verbose, 0);
        assert_eq!(config.n_atoms, None);
        assert_eq!(config.input.overlap, OVERLAP_FILE);
        assert!(config.input.atom_weights.is_none());
        assert_eq!(config.output.populations, POPULATIONS_FILE);
    }

    #[test]
    fn parse_config() {
        let config_string: &str = r#"
            scheme = "lowdin"
            verbose = -1
            n_atoms = 3

            [input]
            coefficients = "h2o/c.npy"
            nuclear_charges = "h2o/z.npy"
        "#;
        let config: Configuration = toml::from_str(config_string).unwrap();
        assert_eq!(config.scheme, Scheme::Lowdin);
        assert_eq!(config.verbose, -1);
        assert_eq!(config.n_atoms, Some(3));
        assert_eq!(config.input.coefficients, "h2o/c.npy");
        assert_eq!(config.input.occupations, OCCUPATIONS_FILE);
        assert_eq!(config.input.nuclear_charges.as_deref(), Some("h2o/z.npy"));
    }

    #[test]
    fn unknown_scheme_is_rejected() {
        assert!(toml::from_str::<Configuration>("scheme = \"hirshfeld\"").is_err());
    }

    #[test]
    fn written_config_can_be_read_again() {
        let config_string: String = toml::to_string(&Configuration::default()).unwrap();
        let config: Configuration = toml::from_str(&config_string).unwrap();
        assert_eq!(config.scheme, SCHEME);
        assert_eq!(config.input.atom_indices, ATOM_INDICES_FILE);
    }
}
