use anyhow::{Context, Result};
use std::time::Instant;

use staycast::io::read_stay_csv;
use staycast::model_selection::{train_test_split, GridSearchCv};
use staycast::report::{build_training_report, TrainingSummary};
use staycast::stats::{mean_squared_error, root_mean_squared_error};

use super::input::StayTrainConfig;
use crate::util::{validate_tsv_or_csv_file, write_bytes_to_file};

pub fn run_training(config: &StayTrainConfig) -> Result<TrainingSummary> {
    validate_tsv_or_csv_file(&config.train_data)?;

    let dataset = read_stay_csv(&config.train_data)
        .with_context(|| format!("Failed to load training data: {}", config.train_data))?;
    log::info!("Loaded {} admissions", dataset.len());
    dataset.log_input_data_summary();

    let (train_idx, test_idx) = train_test_split(dataset.len(), config.test_fraction, config.seed)?;
    let train = dataset.subset(&train_idx);
    let test = dataset.subset(&test_idx);
    log::info!(
        "Split into {} training and {} test admissions",
        train.len(),
        test.len()
    );

    let start_time = Instant::now();
    let search = GridSearchCv::new(
        config.model.clone(),
        config.search_grid.clone(),
        config.cv_folds,
    );
    let result = search
        .fit(&train)
        .context("Training failed: an error occurred during the grid search")?;
    log::info!("Grid search completed in {:?}", start_time.elapsed());

    result.best_pipeline.save(&config.output_file)?;

    let predictions = result.best_pipeline.predict(&test.records)?;
    let mse = mean_squared_error(&test.length_of_stay, &predictions);
    let rmse = root_mean_squared_error(&test.length_of_stay, &predictions);

    let summary = TrainingSummary {
        n_train: train.len(),
        n_test: test.len(),
        mse,
        rmse,
        best_params: result.best_params,
        best_cv_score: result.best_score,
        model: result.best_pipeline.config().clone(),
    };

    println!("GBDT model trained and saved successfully!");
    println!("Test Set Mean Squared Error: {}", mse);
    println!("Test Set Root Mean Squared Error: {}", rmse);
    println!("Best Hyperparameters: {}", result.best_params);

    if let Some(report_file) = &config.report_file {
        let report = build_training_report(
            &config.version,
            &dataset,
            &test.length_of_stay,
            &predictions,
            &summary,
            &result.candidates,
        )?;
        report.save_to_file(report_file)?;

        // Save the effective configuration next to the report
        let config_path = format!("{}.config.json", report_file.trim_end_matches(".html"));
        let bytes = serde_json::to_vec_pretty(config)?;
        write_bytes_to_file(&config_path, &bytes)
            .with_context(|| format!("Failed to write config: {}", config_path))?;
    }

    Ok(summary)
}
