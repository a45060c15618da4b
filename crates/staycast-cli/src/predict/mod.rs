pub mod input;
pub mod output;

use anyhow::{Context, Result};

use staycast::narrative::{Severity, StayBreakdown, StayLength};
use staycast::predictor::Predictor;

use input::PredictInput;
use output::write_breakdown;

/// Load the model, predict one admission and print its day-by-day breakdown.
pub fn run_prediction(input: PredictInput) -> Result<StayBreakdown> {
    let predictor = Predictor::from_file(&input.model_path)
        .with_context(|| format!("Failed to load model: {:?}", input.model_path))?;
    let record = input.form.into_record();
    log::debug!("Predicting length of stay for {:?}", record);

    let breakdown = predictor.breakdown(&record)?;
    write_breakdown(&breakdown, input.html_output.as_deref())?;
    Ok(breakdown)
}

/// Print the narrative for a given stay length and severity label.
pub fn run_narrate(days: u8, severity: &str) -> Result<StayBreakdown> {
    let severity: Severity = severity.parse()?;
    let breakdown = StayBreakdown::new(StayLength::new(days)?, severity);
    write_breakdown(&breakdown, None)?;
    Ok(breakdown)
}
