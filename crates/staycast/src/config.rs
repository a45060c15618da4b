use serde::{Deserialize, Serialize};
use std::fmt;

/// Central configuration for the length-of-stay regressor.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub learning_rate: f32,

    #[serde(flatten)]
    pub model_type: ModelType,
}

/// Supported model types and their hyper-parameters.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub enum ModelType {
    GBDT {
        max_depth: u32,
        num_boost_round: u32,
        /// Fraction of rows sampled for each tree.
        subsample: f64,
        /// Fraction of feature columns sampled for each tree.
        colsample_bytree: f64,
        debug: bool,
        training_optimization_level: u8,
        loss_type: String,
    },
}

impl Default for ModelType {
    fn default() -> Self {
        ModelType::GBDT {
            max_depth: 6,
            num_boost_round: 100,
            subsample: 1.0,
            colsample_bytree: 1.0,
            debug: false,
            training_optimization_level: 2,
            loss_type: "SquaredError".to_string(),
        }
    }
}

impl ModelConfig {
    pub fn new(learning_rate: f32, model_type: ModelType) -> Self {
        Self {
            learning_rate,
            model_type,
        }
    }

    /// Copy of this configuration with one grid point applied.
    pub fn with_params(&self, params: &GridPoint) -> Self {
        let ModelType::GBDT {
            debug,
            training_optimization_level,
            loss_type,
            ..
        } = &self.model_type;
        Self {
            learning_rate: params.learning_rate,
            model_type: ModelType::GBDT {
                max_depth: params.max_depth,
                num_boost_round: params.n_estimators,
                subsample: params.subsample,
                colsample_bytree: params.colsample_bytree,
                debug: *debug,
                training_optimization_level: *training_optimization_level,
                loss_type: loss_type.clone(),
            },
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            model_type: ModelType::default(),
        }
    }
}

/// Candidate hyper-parameter values searched by cross-validation.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SearchGrid {
    pub n_estimators: Vec<u32>,
    pub max_depth: Vec<u32>,
    pub learning_rate: Vec<f32>,
    pub subsample: Vec<f64>,
    pub colsample_bytree: Vec<f64>,
}

impl Default for SearchGrid {
    fn default() -> Self {
        Self {
            n_estimators: vec![100, 200],
            max_depth: vec![3, 5, 7],
            learning_rate: vec![0.01, 0.1, 0.2],
            subsample: vec![0.8, 1.0],
            colsample_bytree: vec![0.8, 1.0],
        }
    }
}

/// One combination of grid values.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct GridPoint {
    pub n_estimators: u32,
    pub max_depth: u32,
    pub learning_rate: f32,
    pub subsample: f64,
    pub colsample_bytree: f64,
}

impl fmt::Display for GridPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n_estimators={}, max_depth={}, learning_rate={}, subsample={}, colsample_bytree={}",
            self.n_estimators, self.max_depth, self.learning_rate, self.subsample, self.colsample_bytree
        )
    }
}

impl SearchGrid {
    /// Number of combinations in the grid.
    pub fn len(&self) -> usize {
        self.n_estimators.len()
            * self.max_depth.len()
            * self.learning_rate.len()
            * self.subsample.len()
            * self.colsample_bytree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every combination, with `colsample_bytree` varying fastest.
    pub fn points(&self) -> Vec<GridPoint> {
        let mut points = Vec::with_capacity(self.len());
        for &n_estimators in &self.n_estimators {
            for &max_depth in &self.max_depth {
                for &learning_rate in &self.learning_rate {
                    for &subsample in &self.subsample {
                        for &colsample_bytree in &self.colsample_bytree {
                            points.push(GridPoint {
                                n_estimators,
                                max_depth,
                                learning_rate,
                                subsample,
                                colsample_bytree,
                            });
                        }
                    }
                }
            }
        }
        points
    }
}
