use anyhow::{Context, Result};
use clap::ArgMatches;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use staycast::config::{ModelConfig, SearchGrid};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StayTrainConfig {
    pub version: String,
    pub train_data: String,
    pub output_file: String,
    /// HTML report path. `None` disables the report.
    pub report_file: Option<String>,
    /// Fraction of admissions held out for the final test evaluation.
    pub test_fraction: f64,
    pub cv_folds: usize,
    pub seed: u64,
    /// Settings shared by every grid candidate (loss, debug, optimization level).
    pub model: ModelConfig,
    pub search_grid: SearchGrid,
}

impl Default for StayTrainConfig {
    fn default() -> Self {
        StayTrainConfig {
            version: clap::crate_version!().to_string(),
            train_data: String::new(),
            output_file: String::from("staycast_model.json"),
            report_file: Some(String::from("staycast_training_report.html")),
            test_fraction: 0.2,
            cv_folds: 5,
            seed: 42,
            model: ModelConfig::default(),
            search_grid: SearchGrid::default(),
        }
    }
}

impl StayTrainConfig {
    /// Build the configuration from an optional JSON file, then apply
    /// command line overrides. Missing or invalid fields fall back to defaults.
    pub fn from_arguments(config_path: Option<&PathBuf>, matches: &ArgMatches) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_json_file(path)?,
            None => StayTrainConfig::default(),
        };

        if let Some(train_data) = matches.get_one::<String>("train_data") {
            config.train_data = train_data.clone();
        }
        if let Some(output_file) = matches.get_one::<String>("output_file") {
            config.output_file = output_file.clone();
        }
        if let Some(report_file) = matches.get_one::<String>("report_file") {
            config.report_file = Some(report_file.clone());
        }
        if matches.get_flag("no_report") {
            config.report_file = None;
        }
        if let Some(cv_folds) = matches.get_one::<usize>("cv_folds") {
            config.cv_folds = *cv_folds;
        }

        Ok(config)
    }

    pub fn from_json_file(config_path: &PathBuf) -> Result<Self> {
        let config_json = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
        Self::from_json_str(&config_json)
    }

    pub fn from_json_str(config_json: &str) -> Result<Self> {
        let partial: serde_json::Value =
            serde_json::from_str(config_json).context("Config file is not valid JSON")?;
        let mut config = StayTrainConfig::default();

        macro_rules! load_or_default {
            ($field:ident) => {
                if let Some(val) = partial.get(stringify!($field)) {
                    if let Ok(parsed) = serde_json::from_value(val.clone()) {
                        config.$field = parsed;
                    } else {
                        log::warn!(
                            "Config Invalid value for '{}', using default: {:?}",
                            stringify!($field),
                            config.$field
                        );
                    }
                } else {
                    log::warn!(
                        "Config Missing field '{}', using default: {:?}",
                        stringify!($field),
                        config.$field
                    );
                }
            };
        }

        load_or_default!(train_data);
        load_or_default!(output_file);
        load_or_default!(report_file);
        load_or_default!(test_fraction);
        load_or_default!(cv_folds);
        load_or_default!(seed);
        load_or_default!(model);
        load_or_default!(search_grid);

        Ok(config)
    }
}
