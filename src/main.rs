use anyhow::{Context, Result};
use clap::{crate_name, crate_version, Arg, Command};
use env_logger::Builder;
use log::LevelFilter;
use ndarray::prelude::*;
use ndarray_npy::write_npy;
use orbpop::defaults::CONFIG_FILE_NAME;
use orbpop::io::{read_arrays, read_input, write_footer, write_header, Configuration, InputData};
use orbpop::population::logging::print_populations;
use orbpop::utils::Timer;
use orbpop::{AtomWeights, Populations};
use std::io::Write;

fn main() -> Result<()> {
    // Input.
    let matches = Command::new(crate_name!())
        .version(crate_version!())
        .about("Mulliken and Löwdin population analysis of molecular orbitals")
        .arg(
            Arg::new("config-File")
                .help("Sets the config file to use")
                .required(false)
                .index(1),
        )
        .get_matches();
    // All input arrays are specified in the configuration file. If it does not exist
    // the default settings are used and written to the working directory.
    let config_file: &str = matches.value_of("config-File").unwrap_or(CONFIG_FILE_NAME);
    let config: Configuration = read_input(config_file)?;

    // Logging.
    // The log level is set.
    let log_level: LevelFilter = match config.verbose {
        2 => LevelFilter::Trace,
        1 => LevelFilter::Debug,
        0 => LevelFilter::Info,
        -1 => LevelFilter::Warn,
        -2 => LevelFilter::Error,
        _ => LevelFilter::Info,
    };
    // and the logger is build.
    Builder::new()
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .filter(None, log_level)
        .init();

    // The program header is written to the command line.
    write_header();
    // and the total wall-time timer is started.
    let timer: Timer = Timer::start();

    // Computations.
    // ................................................................
    let data: InputData = read_arrays(&config.input, config.n_atoms)?;
    let atom_weights: AtomWeights = match &data.atom_weights {
        Some(weights) => AtomWeights::Custom(weights.view()),
        None => AtomWeights::Mulliken,
    };
    let pops: Populations = config.scheme.populations(
        data.coeff_ab_mo.view(),
        data.occupations.view(),
        data.olp_ab_ab.view(),
        data.n_atoms,
        &data.ab_atom_indices,
        atom_weights,
    )?;
    let charges: Option<Array1<f64>> = match &data.nuclear_charges {
        Some(z) => Some(pops.charges(z.view())?),
        None => None,
    };
    print_populations(
        config.scheme,
        &pops,
        charges.as_ref().map(|q| q.view()),
    );

    // Output.
    write_npy(&config.output.populations, &pops.populations).with_context(|| {
        format!(
            "Unable to write the populations to {}",
            config.output.populations
        )
    })?;

    // ................................................................
    // Print the footer and the total elapsed time.
    write_footer(timer);
    Ok(())
}
