use crate::error::PopulationError;
use crate::io::settings::{Configuration, InputConfig};
use anyhow::{Context, Result};
use log::{debug, info};
use ndarray::prelude::*;
use ndarray_npy::{read_npy, ReadNpyError, ReadableElement};
use std::fs;
use std::path::Path;

/// Arrays of a population analysis as they are read from disk.
#[derive(Debug, Clone)]
pub struct InputData {
    pub coeff_ab_mo: Array2<f64>,
    pub occupations: Array1<f64>,
    pub olp_ab_ab: Array2<f64>,
    pub n_atoms: usize,
    pub ab_atom_indices: Vec<usize>,
    pub atom_weights: Option<Array3<f64>>,
    pub nuclear_charges: Option<Array1<f64>>,
}

pub fn read_input(config_file: &str) -> Result<Configuration> {
    // The configuration file is read, if it does not exist in the directory
    // the program initializes the default settings and writes a configuration file
    // to the directory.
    let config_file_path: &Path = Path::new(config_file);
    let mut config_string: String = if config_file_path.exists() {
        fs::read_to_string(config_file_path)
            .with_context(|| format!("Unable to read config file {}", config_file))?
    } else {
        String::from("")
    };
    // Load the configuration.
    let config: Configuration = toml::from_str(&config_string)
        .with_context(|| format!("Unable to parse config file {}", config_file))?;
    // The configuration file is saved if it does not exist already so that the user can see
    // all the used options.
    if !config_file_path.exists() {
        config_string = toml::to_string(&config)?;
        fs::write(config_file_path, config_string)
            .with_context(|| format!("Unable to write config file {}", config_file))?;
    }
    Ok(config)
}

fn load<T: ReadableElement>(path: &str) -> Result<ArrayD<T>> {
    debug!("reading {}", path);
    read_npy(path).with_context(|| format!("Unable to read the array in {}", path))
}

/// Reads an array of integers stored with 64 or 32 bit.
fn load_integers(path: &str, name: &str) -> Result<ArrayD<i64>> {
    debug!("reading {}", path);
    let wrong_dtype = |err: &ReadNpyError| matches!(err, ReadNpyError::WrongDescriptor(_));
    match read_npy::<_, ArrayD<i64>>(path) {
        Ok(arr) => return Ok(arr),
        Err(err) if !wrong_dtype(&err) => {
            return Err(err).with_context(|| format!("Unable to read the array in {}", path))
        }
        Err(_) => {}
    }
    match read_npy::<_, ArrayD<i32>>(path) {
        Ok(arr) => Ok(arr.mapv(i64::from)),
        Err(err) if !wrong_dtype(&err) => {
            Err(err).with_context(|| format!("Unable to read the array in {}", path))
        }
        Err(_) => Err(PopulationError::type_error(format!(
            "{} must be stored as 32 or 64 bit integers ({}).",
            name, path
        ))
        .into()),
    }
}

fn into_rank<D: Dimension>(arr: ArrayD<f64>, name: &str, rank: usize) -> Result<Array<f64, D>> {
    arr.into_dimensionality::<D>()
        .map_err(PopulationError::from)
        .with_context(|| format!("{} must be a {}-dimensional array of floats.", name, rank))
}

/// Occupation numbers may be stored as integers or as floats.
fn load_occupations(path: &str) -> Result<Array1<f64>> {
    let name: &str = "Molecular orbital occupation numbers";
    let occupations: ArrayD<f64> = match read_npy::<_, ArrayD<f64>>(path) {
        Ok(occ) => occ,
        Err(ReadNpyError::WrongDescriptor(_)) => load_integers(path, name)?.mapv(|x| x as f64),
        Err(err) => {
            return Err(err).with_context(|| format!("Unable to read the array in {}", path))
        }
    };
    into_rank::<Ix1>(occupations, name, 1)
}

/// Atom indices have to be non-negative integers.
pub fn atom_indices_from(indices: ArrayD<i64>) -> crate::error::Result<Vec<usize>> {
    if indices.ndim() != 1 {
        return Err(PopulationError::type_error(
            "Atom indices of each atomic basis function must be a one-dimensional array of \
             integers.",
        ));
    }
    indices
        .iter()
        .map(|&idx| {
            usize::try_from(idx).map_err(|_| {
                PopulationError::value_error(format!(
                    "Atom indices of each atomic basis function must be greater than or equal \
                     to zero, found {}.",
                    idx
                ))
            })
        })
        .collect()
}

pub fn read_arrays(input: &InputConfig, n_atoms: Option<usize>) -> Result<InputData> {
    let coeff_ab_mo: Array2<f64> = into_rank::<Ix2>(
        load(&input.coefficients)?,
        "Transformation matrix from atomic basis functions to molecular orbitals",
        2,
    )?;
    let occupations: Array1<f64> = load_occupations(&input.occupations)?;
    let olp_ab_ab: Array2<f64> = into_rank::<Ix2>(
        load(&input.overlap)?,
        "Overlap of the atomic basis functions",
        2,
    )?;
    let indices: ArrayD<i64> = load_integers(
        &input.atom_indices,
        "Atom indices of each atomic basis function",
    )?;
    let ab_atom_indices: Vec<usize> = atom_indices_from(indices)?;

    let atom_weights: Option<Array3<f64>> = match &input.atom_weights {
        Some(path) => Some(into_rank::<Ix3>(
            load(path)?,
            "Orbital weights for the atoms",
            3,
        )?),
        None => None,
    };
    let nuclear_charges: Option<Array1<f64>> = match &input.nuclear_charges {
        Some(path) => Some(into_rank::<Ix1>(load(path)?, "Nuclear charges", 1)?),
        None => None,
    };

    let n_atoms: usize = match n_atoms {
        Some(n) => n,
        None => ab_atom_indices.iter().max().map_or(0, |&idx| idx + 1),
    };
    info!("{: <25} {}", "number of atoms:", n_atoms);
    info!("{: <25} {}", "basis functions:", olp_ab_ab.nrows());
    info!("{: <25} {}", "molecular orbitals:", coeff_ab_mo.ncols());

    Ok(InputData {
        coeff_ab_mo,
        occupations,
        olp_ab_ab,
        n_atoms,
        ab_atom_indices,
        atom_weights,
        nuclear_charges,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::tests::get_system;
    use ndarray_npy::write_npy;
    use std::path::PathBuf;

    fn test_dir(name: &str) -> PathBuf {
        let dir: PathBuf =
            std::env::temp_dir().join(format!("orbpop_{}_{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn path_string(dir: &Path, file: &str) -> String {
        dir.join(file).to_str().unwrap().to_owned()
    }

    #[test]
    fn negative_atom_indices_are_value_errors() {
        let indices: ArrayD<i64> = array![0, 1, -1].into_dyn();
        assert!(atom_indices_from(indices).unwrap_err().is_value_error());
        let indices: ArrayD<i64> = array![[0, 1], [1, 0]].into_dyn();
        assert!(atom_indices_from(indices).unwrap_err().is_type_error());
        let indices: ArrayD<i64> = array![0, 2, 1].into_dyn();
        assert_eq!(atom_indices_from(indices).unwrap(), vec![0, 2, 1]);
    }

    #[test]
    fn read_h2o_arrays() {
        let system = get_system("h2o");
        let dir: PathBuf = test_dir("h2o");
        let indices: Array1<i64> = system.ab_atom_indices.iter().map(|&i| i as i64).collect();
        let occupations: Array1<i64> = system.occupations.mapv(|x| x as i64);
        write_npy(dir.join("c.npy"), &system.coeff_ab_mo).unwrap();
        write_npy(dir.join("n.npy"), &occupations).unwrap();
        write_npy(dir.join("s.npy"), &system.olp_ab_ab).unwrap();
        write_npy(dir.join("idx.npy"), &indices).unwrap();
        write_npy(dir.join("z.npy"), &system.nuclear_charges).unwrap();

        let input = InputConfig {
            coefficients: path_string(&dir, "c.npy"),
            occupations: path_string(&dir, "n.npy"),
            overlap: path_string(&dir, "s.npy"),
            atom_indices: path_string(&dir, "idx.npy"),
            atom_weights: None,
            nuclear_charges: Some(path_string(&dir, "z.npy")),
        };
        let data: InputData = read_arrays(&input, None).unwrap();
        assert_eq!(data.n_atoms, 3);
        assert_eq!(data.ab_atom_indices, system.ab_atom_indices);
        assert_eq!(data.occupations, system.occupations);
        assert_eq!(data.coeff_ab_mo, system.coeff_ab_mo);
        assert_eq!(data.nuclear_charges, Some(system.nuclear_charges.clone()));
        assert!(data.atom_weights.is_none());

        // the overlap is not a vector
        let wrong = InputConfig {
            nuclear_charges: Some(path_string(&dir, "s.npy")),
            ..input.clone()
        };
        let err = read_arrays(&wrong, None).unwrap_err();
        let err = err.downcast_ref::<PopulationError>().unwrap();
        assert!(err.is_type_error());

        // float atom indices
        let wrong = InputConfig {
            atom_indices: path_string(&dir, "z.npy"),
            ..input
        };
        let err = read_arrays(&wrong, Some(3)).unwrap_err();
        let err = err.downcast_ref::<PopulationError>().unwrap();
        assert!(err.is_type_error());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn read_32_bit_integers() {
        let system = get_system("h2o");
        let dir: PathBuf = test_dir("int32");
        let indices: Array1<i32> = system.ab_atom_indices.iter().map(|&i| i as i32).collect();
        let occupations: Array1<i32> = system.occupations.mapv(|x| x as i32);
        write_npy(dir.join("c.npy"), &system.coeff_ab_mo).unwrap();
        write_npy(dir.join("n.npy"), &occupations).unwrap();
        write_npy(dir.join("s.npy"), &system.olp_ab_ab).unwrap();
        write_npy(dir.join("idx.npy"), &indices).unwrap();

        let input = InputConfig {
            coefficients: path_string(&dir, "c.npy"),
            occupations: path_string(&dir, "n.npy"),
            overlap: path_string(&dir, "s.npy"),
            atom_indices: path_string(&dir, "idx.npy"),
            atom_weights: None,
            nuclear_charges: None,
        };
        let data: InputData = read_arrays(&input, None).unwrap();
        assert_eq!(data.n_atoms, 3);
        assert_eq!(data.ab_atom_indices, system.ab_atom_indices);
        assert_eq!(data.occupations, system.occupations);

        // a missing file is not a problem of the stored data
        let missing = InputConfig {
            atom_indices: path_string(&dir, "missing.npy"),
            ..input
        };
        let err = read_arrays(&missing, None).unwrap_err();
        assert!(err.downcast_ref::<PopulationError>().is_none());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn missing_config_is_created() {
        let dir: PathBuf = test_dir("config");
        let file: String = path_string(&dir, "orbpop.toml");
        let config: Configuration = read_input(&file).unwrap();
        assert!(Path::new(&file).exists());
        let again: Configuration = read_input(&file).unwrap();
        assert_eq!(config.scheme, again.scheme);
        assert_eq!(config.input.coefficients, again.input.coefficients);
        fs::remove_dir_all(dir).unwrap();
    }
}
