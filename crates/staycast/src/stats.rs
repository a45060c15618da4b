//! Regression metrics used for model selection and reporting.
use statrs::statistics::Statistics;

/// Signed residuals `actual - predicted`.
///
/// # Panics
///
/// Panics if `actual` and `predicted` have different lengths.
pub fn residuals(actual: &[f32], predicted: &[f32]) -> Vec<f64> {
    assert_eq!(
        actual.len(),
        predicted.len(),
        "actual and predicted must have equal lengths"
    );
    actual
        .iter()
        .zip(predicted)
        .map(|(&a, &p)| a as f64 - p as f64)
        .collect()
}

/// Mean squared error. Returns NaN for empty input.
pub fn mean_squared_error(actual: &[f32], predicted: &[f32]) -> f64 {
    residuals(actual, predicted)
        .iter()
        .map(|r| r * r)
        .collect::<Vec<f64>>()
        .mean()
}

pub fn root_mean_squared_error(actual: &[f32], predicted: &[f32]) -> f64 {
    mean_squared_error(actual, predicted).sqrt()
}

/// Pearson correlation coefficient of two equally long samples.
///
/// Returns NaN when either sample has fewer than two values or zero variance.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    assert_eq!(x.len(), y.len(), "samples must have equal lengths");
    if x.len() < 2 {
        return f64::NAN;
    }
    let sx = x.iter().std_dev();
    let sy = y.iter().std_dev();
    if sx == 0.0 || sy == 0.0 {
        return f64::NAN;
    }
    x.iter().covariance(y.iter()) / (sx * sy)
}

/// Pairwise Pearson correlations between columns.
pub fn correlation_matrix(columns: &[Vec<f64>]) -> Vec<Vec<f64>> {
    columns
        .iter()
        .map(|a| columns.iter().map(|b| pearson(a, b)).collect())
        .collect()
}
