//! Reporting utilities: per-map statistics and formatted terminal output.

pub mod format;

pub use format::*;

use ndarray::{ArrayBase, Data, Dimension};
use rayon::prelude::*;
use serde::Serialize;

/// Summary statistics of one per-pixel map.
///
/// Statistics only cover finite pixels; NaN/inf (dark pixels, over-modulation)
/// are counted but excluded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapSummary {
    pub n_pixels: usize,
    pub n_finite: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Summarize a map, ignoring non-finite pixels.
pub fn summarize<S, D>(map: &ArrayBase<S, D>) -> MapSummary
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let mut finite: Vec<f64> = map.iter().copied().filter(|v| v.is_finite()).collect();
    let n_finite = finite.len();
    if finite.is_empty() {
        return MapSummary {
            n_pixels: map.len(),
            n_finite,
            mean: None,
            median: None,
            min: None,
            max: None,
        };
    }

    finite.par_sort_unstable_by(|a, b| a.total_cmp(b));
    let mean = finite.par_iter().sum::<f64>() / n_finite as f64;
    let mid = n_finite / 2;
    let median = if n_finite % 2 == 0 {
        0.5 * (finite[mid - 1] + finite[mid])
    } else {
        finite[mid]
    };

    MapSummary {
        n_pixels: map.len(),
        n_finite,
        mean: Some(mean),
        median: Some(median),
        min: finite.first().copied(),
        max: finite.last().copied(),
    }
}
