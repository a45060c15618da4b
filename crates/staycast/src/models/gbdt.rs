use anyhow::{anyhow, Result};
use gbdt::config::Config;
use gbdt::decision_tree::{Data, DataVec};
use gbdt::gradient_boost::GBDT;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::config::{ModelConfig, ModelType};
use crate::models::regressor_trait::RegressorModel;

/// Gradient Boosting Decision Tree (GBDT) regressor
#[derive(Serialize, Deserialize)]
pub struct GBDTRegressor {
    model: Option<GBDT>,
    params: ModelConfig,
    feature_size: usize,
}

impl GBDTRegressor {
    pub fn new(params: ModelConfig) -> Self {
        GBDTRegressor {
            model: None,
            params,
            feature_size: 0,
        }
    }

    pub fn params(&self) -> &ModelConfig {
        &self.params
    }

    fn build_config(&self, feature_size: usize) -> Config {
        let ModelType::GBDT {
            max_depth,
            num_boost_round,
            subsample,
            colsample_bytree,
            debug,
            training_optimization_level,
            loss_type,
        } = &self.params.model_type;

        let mut config = Config::new();
        config.set_feature_size(feature_size);
        config.set_shrinkage(self.params.learning_rate);
        config.set_max_depth(*max_depth);
        config.set_iterations(*num_boost_round as usize);
        config.set_data_sample_ratio(*subsample);
        config.set_feature_sample_ratio(*colsample_bytree);
        config.set_debug(*debug);
        config.set_training_optimization_level(*training_optimization_level);
        config.set_loss(loss_type);
        config
    }
}

fn to_data_vec(x: &Array2<f32>, y: Option<&[f32]>) -> DataVec {
    let mut data = DataVec::with_capacity(x.nrows());
    for (i, row) in x.outer_iter().enumerate() {
        let label = y.map(|y| y[i]).unwrap_or(0.0);
        data.push(Data::new_training_data(row.to_vec(), 1.0, label, None));
    }
    data
}

impl RegressorModel for GBDTRegressor {
    fn fit(&mut self, x: &Array2<f32>, y: &[f32]) -> Result<()> {
        if x.nrows() != y.len() {
            return Err(anyhow!(
                "Feature matrix has {} rows but {} targets were given",
                x.nrows(),
                y.len()
            ));
        }
        if x.nrows() == 0 {
            return Err(anyhow!("Cannot fit a GBDT regressor on zero rows"));
        }

        let feature_size = x.ncols();
        let config = self.build_config(feature_size);
        let mut gbdt = GBDT::new(&config);
        let mut train_x = to_data_vec(x, Some(y));
        gbdt.fit(&mut train_x);

        self.feature_size = feature_size;
        self.model = Some(gbdt);
        Ok(())
    }

    fn predict(&self, x: &Array2<f32>) -> Result<Vec<f32>> {
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| anyhow!("GBDT regressor has not been fitted"))?;
        if x.ncols() != self.feature_size {
            return Err(anyhow!(
                "Expected {} features but got {}",
                self.feature_size,
                x.ncols()
            ));
        }
        let test_x = to_data_vec(x, None);
        Ok(model.predict(&test_x))
    }

    fn name(&self) -> &str {
        "gbdt"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gbdt_regressor() {
        // y follows the first feature; the second is noise
        let x = Array2::from_shape_vec(
            (8, 2),
            vec![
                1.0, 0.3, 2.0, -0.1, 3.0, 0.2, 4.0, 0.0, 5.0, -0.3, 6.0, 0.1, 7.0, 0.4, 8.0, -0.2,
            ],
        )
        .unwrap();
        let y = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];

        let params = ModelConfig {
            learning_rate: 0.3,
            model_type: ModelType::GBDT {
                max_depth: 3,
                num_boost_round: 50,
                subsample: 1.0,
                colsample_bytree: 1.0,
                debug: false,
                training_optimization_level: 2,
                loss_type: "SquaredError".to_string(),
            },
        };

        let mut regressor = GBDTRegressor::new(params);
        assert!(regressor.predict(&x).is_err());

        regressor.fit(&x, &y).unwrap();
        let predictions = regressor.predict(&x).unwrap();
        assert_eq!(predictions.len(), y.len());
        assert!(predictions[0] < predictions[7]);
    }

    #[test]
    fn test_fit_rejects_length_mismatch() {
        let x = Array2::<f32>::zeros((3, 2));
        let mut regressor = GBDTRegressor::new(ModelConfig::default());
        assert!(regressor.fit(&x, &[1.0, 2.0]).is_err());
    }
}
