//! Predictor adapter: real-valued model estimate to a whole-day stay.
use std::path::Path;

use anyhow::Result;

use crate::narrative::{StayBreakdown, StayLength};
use crate::pipeline::StayPipeline;
use crate::record::PatientRecord;

/// Anything that can estimate a length of stay for one admission.
pub trait StayModel {
    fn estimate_days(&self, record: &PatientRecord) -> Result<f32>;
}

/// Wraps a trained model and turns its estimate into a [`StayLength`].
pub struct Predictor<M> {
    model: M,
}

impl<M: StayModel> Predictor<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    /// Predicted stay, rounded to the nearest day (ties to even) and clamped to `1..=12`.
    pub fn predict_days(&self, record: &PatientRecord) -> Result<StayLength> {
        let estimate = self.model.estimate_days(record)?;
        let length = StayLength::from_estimate(estimate)?;
        log::debug!("Raw estimate {:.3} days, reported as {}", estimate, length);
        Ok(length)
    }

    /// Predicted stay together with the narrative for each day.
    pub fn breakdown(&self, record: &PatientRecord) -> Result<StayBreakdown> {
        let length = self.predict_days(record)?;
        Ok(StayBreakdown::new(length, record.severity))
    }
}

impl Predictor<StayPipeline> {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(StayPipeline::load(path)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StayError;
    use crate::narrative::{DayCategory, Severity};
    use crate::record::fixtures::record;

    struct FixedEstimate(f32);

    impl StayModel for FixedEstimate {
        fn estimate_days(&self, _record: &PatientRecord) -> Result<f32> {
            Ok(self.0)
        }
    }

    #[test]
    fn test_predict_days_clamps() {
        let patient = record(50, "Stroke", Severity::Severe);
        let high = Predictor::new(FixedEstimate(17.8));
        assert_eq!(high.predict_days(&patient).unwrap().days(), 12);
        let low = Predictor::new(FixedEstimate(0.4));
        assert_eq!(low.predict_days(&patient).unwrap().days(), 1);
        let mid = Predictor::new(FixedEstimate(6.6));
        assert_eq!(mid.predict_days(&patient).unwrap().days(), 7);
    }

    #[test]
    fn test_non_finite_estimate_errors() {
        let patient = record(50, "Stroke", Severity::Severe);
        let err = Predictor::new(FixedEstimate(f32::INFINITY))
            .predict_days(&patient)
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StayError>(),
            Some(StayError::NonFiniteEstimate(_))
        ));
    }

    #[test]
    fn test_breakdown_uses_record_severity() {
        let patient = record(70, "Sepsis", Severity::Moderate);
        let breakdown = Predictor::new(FixedEstimate(3.2)).breakdown(&patient).unwrap();
        assert_eq!(breakdown.severity, Severity::Moderate);
        assert_eq!(breakdown.days.len(), 3);
        assert_eq!(breakdown.days[2].category, DayCategory::Final);
    }
}
