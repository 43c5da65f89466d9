mod imprint;
mod input;
pub(crate) mod settings;

pub use imprint::{write_footer, write_header};
pub use input::{atom_indices_from, read_arrays, read_input, InputData};
pub use settings::{Configuration, InputConfig, OutputConfig};
