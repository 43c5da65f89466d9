use ndarray::prelude::*;
use ndarray::{Data, Zip};
use std::cmp::Ordering;

/// Indices that sort `v` by ascending absolute value.
pub fn argsort_abs(v: ArrayView1<f64>) -> Vec<usize> {
    let mut idx = (0..v.len()).collect::<Vec<_>>();
    idx.sort_unstable_by(|&i, &j| {
        v[i].abs()
            .partial_cmp(&v[j].abs())
            .unwrap_or(Ordering::Equal)
    });
    idx
}

/// Element-wise comparison |a - b| <= atol + rtol * |b| (same shapes required).
pub fn all_close<S1, S2, D>(
    a: &ArrayBase<S1, D>,
    b: &ArrayBase<S2, D>,
    rtol: f64,
    atol: f64,
) -> bool
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
    D: Dimension,
{
    if a.shape() != b.shape() {
        return false;
    }
    Zip::from(a)
        .and(b)
        .all(|&x, &y| (x - y).abs() <= atol + rtol * y.abs())
}

pub fn is_symmetric(m: ArrayView2<f64>, rtol: f64, atol: f64) -> bool {
    m.is_square() && all_close(&m, &m.t(), rtol, atol)
}

pub fn all_finite<S, D>(a: &ArrayBase<S, D>) -> bool
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    a.iter().all(|x| x.is_finite())
}
