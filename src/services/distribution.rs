use crate::domain::models::{Histogram, HistogramBin};

/// Equal-width histogram over the finite values.
///
/// Bins span `[min, max]` with the last bin closed on the right. A single
/// distinct value is widened to `[v - 0.5, v + 0.5]`.
pub fn histogram(values: &[f64], bins: usize) -> Histogram {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let excluded = values.len() - finite.len();
    if finite.is_empty() || bins == 0 {
        return Histogram {
            bins: Vec::new(),
            counted: 0,
            excluded,
        };
    }

    let mut lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;

    let mut counts = vec![0usize; bins];
    for v in &finite {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    let bins = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: lo + width * i as f64,
            upper: if i + 1 == bins { hi } else { lo + width * (i + 1) as f64 },
            count,
        })
        .collect();

    Histogram {
        bins,
        counted: finite.len(),
        excluded,
    }
}
