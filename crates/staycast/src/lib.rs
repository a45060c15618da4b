//! staycast: hospital length-of-stay prediction and stay narratives.
//!
//! This crate provides the narrative generator that turns a predicted
//! length of stay and a severity of illness into one description per day,
//! the predictor adapter that rounds and clamps a regression estimate,
//! and the supporting training stack: CSV ingestion, column encoding,
//! a GBDT regressor, grid search cross-validation, metrics and HTML
//! reporting.
pub mod config;
pub mod error;
pub mod form;
pub mod io;
pub mod model_selection;
pub mod models;
pub mod narrative;
pub mod pipeline;
pub mod predictor;
pub mod preprocessing;
pub mod record;
pub mod report;
pub mod stats;
