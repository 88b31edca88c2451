//! Small numeric helpers over `f64` slices

/// `n` evenly spaced points over `[start, end]`, both ends included
///
/// One point yields `[start]`; zero points yield an empty vector.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Root mean square; 0 for an empty slice
pub fn rms(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    (data.iter().map(|x| x * x).sum::<f64>() / data.len() as f64).sqrt()
}

/// Mean squared difference over the common prefix
pub fn mean_squared_error(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len().min(b.len());
    if n == 0 {
        return 0.0;
    }
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        / n as f64
}

/// Largest absolute value; 0 for an empty slice
pub fn max_abs(data: &[f64]) -> f64 {
    data.iter().fold(0.0_f64, |acc, x| acc.max(x.abs()))
}
