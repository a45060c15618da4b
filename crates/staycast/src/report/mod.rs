//! Reporting and plotting helpers.
//!
//! This module wraps plotting helpers (Plotly) and small utilities to
//! produce HTML reports: the training report written after a grid search
//! and the per-day stay breakdown page shown after a prediction.
pub mod breakdown;
pub mod plots;
#[allow(clippy::module_inception)]
pub mod report;
pub mod training;

pub use breakdown::render_breakdown_html;
pub use report::{Report, ReportSection};
pub use training::{build_training_report, TrainingSummary};
