use anyhow::Result;
use ndarray::Array2;

/// A small trait abstraction for regression models fitted on encoded
/// feature matrices. Rows are samples and columns are features.
pub trait RegressorModel {
    /// Fit the model against real-valued targets, one per row of `x`.
    fn fit(&mut self, x: &Array2<f32>, y: &[f32]) -> Result<()>;

    /// Predict one real value per row of `x`.
    fn predict(&self, x: &Array2<f32>) -> Result<Vec<f32>>;

    /// Optional human readable name for the model
    fn name(&self) -> &str {
        "regressor"
    }
}
