use crate::population::{Diagnostic, Populations, Scheme};
use log::{info, warn};
use ndarray::ArrayView1;

pub fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics.iter() {
        warn!("WARNING: {}", diagnostic);
    }
}

pub fn print_populations(scheme: Scheme, pops: &Populations, charges: Option<ArrayView1<f64>>) {
    info!("{:^80}", "");
    info!("{: ^80}", format!("{} Population Analysis", scheme));
    info!("{:-^80}", "");
    match charges {
        Some(q) => {
            info!("{: <8} {: >22} {: >22}", "Atom", "population", "partial charge");
            info!("{:-^54}", "");
            for (idx, (n_a, q_a)) in pops.populations.iter().zip(q.iter()).enumerate() {
                info!("{: >8} {:>22.14} {:>22.14}", idx + 1, n_a, q_a);
            }
        }
        None => {
            info!("{: <8} {: >22}", "Atom", "population");
            info!("{:-^31}", "");
            for (idx, n_a) in pops.populations.iter().enumerate() {
                info!("{: >8} {:>22.14}", idx + 1, n_a);
            }
        }
    }
    info!("{:-^80}", "");
    info!("{: <25} {:.14}", "total population:", pops.total());
    if !pops.diagnostics.is_empty() {
        info!("{: <25} {}", "warnings:", pops.diagnostics.len());
    }
    info!("{:^80}", "");
}
