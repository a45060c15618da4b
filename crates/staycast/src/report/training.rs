//! HTML report summarising a length-of-stay training run.
use anyhow::{Context, Result};
use maud::html;
use serde::Serialize;

use crate::config::{GridPoint, ModelConfig};
use crate::model_selection::CandidateScore;
use crate::record::StayDataset;
use crate::report::plots::{
    plot_actual_vs_predicted, plot_correlation_heatmap, plot_length_of_stay_histogram,
    plot_residuals,
};
use crate::report::{Report, ReportSection};
use crate::stats::correlation_matrix;

/// Numbers reported at the end of a training run.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingSummary {
    pub n_train: usize,
    pub n_test: usize,
    pub mse: f64,
    pub rmse: f64,
    pub best_params: GridPoint,
    /// Mean cross-validated negative MSE of the best candidate.
    pub best_cv_score: f64,
    pub model: ModelConfig,
}

/// Build the training report: data overview, test-set evaluation and the
/// cross-validation table.
pub fn build_training_report(
    version: &str,
    dataset: &StayDataset,
    test_actual: &[f32],
    test_predicted: &[f32],
    summary: &TrainingSummary,
    candidates: &[CandidateScore],
) -> Result<Report> {
    let mut report = Report::new("staycast", version, "Hospital Length of Stay Training Report");

    /* Section 1: Data */
    {
        let mut data_section = ReportSection::new("Data");
        data_section.add_content(html! {
            p {
                "Distribution of the observed length of stay across all "
                (dataset.len()) " admissions, and the correlation between the numeric "
                "feature (Age) and the target."
            }
        });
        data_section.add_plot(plot_length_of_stay_histogram(
            &dataset.length_of_stay,
            "Distribution of Length of Stay",
        ));

        let age: Vec<f64> = dataset.records.iter().map(|r| r.age as f64).collect();
        let los: Vec<f64> = dataset.length_of_stay.iter().map(|&v| v as f64).collect();
        let names = vec!["Age".to_string(), "Length of Stay".to_string()];
        data_section.add_plot(plot_correlation_heatmap(
            &names,
            correlation_matrix(&[age, los]),
            "Correlation Heatmap",
        ));
        report.add_section(data_section);
    }

    /* Section 2: Evaluation */
    {
        let mut eval_section = ReportSection::new("Test Set Evaluation");
        eval_section.add_content(html! {
            table {
                tr { th { "Training admissions" } td { (summary.n_train) } }
                tr { th { "Test admissions" } td { (summary.n_test) } }
                tr { th { "Test Set Mean Squared Error" } td { (format!("{:.4}", summary.mse)) } }
                tr { th { "Test Set Root Mean Squared Error" } td { (format!("{:.4}", summary.rmse)) } }
                tr { th { "Best Hyperparameters" } td { (summary.best_params) } }
            }
        });
        eval_section.add_plot(plot_actual_vs_predicted(
            test_actual,
            test_predicted,
            "Actual vs Predicted Length of Stay",
        ));
        eval_section.add_plot(plot_residuals(test_actual, test_predicted, "Residuals Plot"));
        report.add_section(eval_section);
    }

    /* Section 3: Grid search */
    {
        let mut cv_section = ReportSection::new("Grid Search");
        cv_section.add_content(html! {
            table {
                tr {
                    th { "n_estimators" } th { "max_depth" } th { "learning_rate" }
                    th { "subsample" } th { "colsample_bytree" } th { "mean score (-MSE)" }
                }
                @for c in candidates {
                    tr {
                        td { (c.params.n_estimators) }
                        td { (c.params.max_depth) }
                        td { (c.params.learning_rate) }
                        td { (c.params.subsample) }
                        td { (c.params.colsample_bytree) }
                        td { (format!("{:.4}", c.mean_score)) }
                    }
                }
            }
        });
        report.add_section(cv_section);
    }

    /* Section 4: Configuration */
    {
        let mut config_section = ReportSection::new("Configuration");
        let config_json = serde_json::to_string_pretty(&summary.model)
            .context("Failed to serialize model configuration for the report")?;
        config_section.add_content(html! {
            style {
                ".code-container {
                    background-color: #f5f5f5;
                    padding: 10px;
                    border-radius: 5px;
                    overflow-x: auto;
                    font-family: monospace;
                    white-space: pre-wrap;
                }"
            }
            div class="code-container" {
                pre {
                    code { (config_json) }
                }
            }
        });
        report.add_section(config_section);
    }

    Ok(report)
}
