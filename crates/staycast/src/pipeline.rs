//! Column encoder and regressor fitted and persisted together.
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::ModelConfig;
use crate::models::{GBDTRegressor, RegressorModel};
use crate::predictor::StayModel;
use crate::preprocessing::ColumnEncoder;
use crate::record::{PatientRecord, StayDataset};

/// A fitted length-of-stay pipeline: encode records, then regress.
#[derive(Serialize, Deserialize)]
pub struct StayPipeline {
    encoder: ColumnEncoder,
    regressor: GBDTRegressor,
}

impl StayPipeline {
    /// Fit the encoder and the regressor on `dataset`.
    pub fn fit(dataset: &StayDataset, config: &ModelConfig) -> Result<Self> {
        let encoder = ColumnEncoder::fit(&dataset.records)?;
        let x = encoder.transform(&dataset.records);
        let mut regressor = GBDTRegressor::new(config.clone());
        regressor
            .fit(&x, &dataset.length_of_stay)
            .context("Failed to fit the length of stay regressor")?;
        Ok(Self { encoder, regressor })
    }

    pub fn predict(&self, records: &[PatientRecord]) -> Result<Vec<f32>> {
        let x = self.encoder.transform(records);
        self.regressor.predict(&x)
    }

    pub fn config(&self) -> &ModelConfig {
        self.regressor.params()
    }

    pub fn feature_names(&self) -> Vec<String> {
        self.encoder.feature_names()
    }

    /// Write the fitted pipeline as JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_vec(self).context("Failed to serialize pipeline")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write model file: {}", path.display()))?;
        log::info!("Model saved to: {}", path.display());
        Ok(())
    }

    /// Load a pipeline written by [`StayPipeline::save`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read(path)
            .with_context(|| format!("Failed to read model file: {}", path.display()))?;
        let pipeline: StayPipeline = serde_json::from_slice(&content)
            .with_context(|| format!("Failed to parse model file: {}", path.display()))?;
        log::debug!(
            "Loaded {} pipeline with {} features from {}",
            pipeline.regressor.name(),
            pipeline.encoder.n_features(),
            path.display()
        );
        Ok(pipeline)
    }
}

impl StayModel for StayPipeline {
    fn estimate_days(&self, record: &PatientRecord) -> Result<f32> {
        let predictions = self.predict(std::slice::from_ref(record))?;
        predictions
            .into_iter()
            .next()
            .context("Pipeline returned no prediction")
    }
}
