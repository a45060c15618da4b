//! Patient records and the length-of-stay training table.
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::narrative::Severity;

/// Placeholder stored when a training row has no comorbidities recorded.
pub const UNKNOWN_COMORBIDITIES: &str = "Unknown";

/// A single patient admission, as fed to the regression pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    #[serde(rename = "Age")]
    pub age: u32,
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "Admission Type")]
    pub admission_type: String,
    #[serde(rename = "Primary Diagnosis")]
    pub primary_diagnosis: String,
    #[serde(rename = "Severity of Illness")]
    pub severity: Severity,
    #[serde(rename = "Comorbidities")]
    pub comorbidities: String,
    #[serde(rename = "Procedure Codes Count")]
    pub procedure_codes_count: u32,
    #[serde(rename = "Ward/Department")]
    pub ward_department: String,
    #[serde(rename = "Discharge Disposition")]
    pub discharge_disposition: String,
}

/// Patient records paired with their observed length of stay.
#[derive(Debug, Clone, Default)]
pub struct StayDataset {
    pub records: Vec<PatientRecord>,
    pub length_of_stay: Vec<f32>,
}

impl StayDataset {
    pub fn new(records: Vec<PatientRecord>, length_of_stay: Vec<f32>) -> Result<Self> {
        if records.len() != length_of_stay.len() {
            return Err(anyhow!(
                "Got {} records but {} length of stay values",
                records.len(),
                length_of_stay.len()
            ));
        }
        Ok(StayDataset {
            records,
            length_of_stay,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Copy out the rows at `indices`, in the given order.
    pub fn subset(&self, indices: &[usize]) -> StayDataset {
        StayDataset {
            records: indices.iter().map(|&i| self.records[i].clone()).collect(),
            length_of_stay: indices.iter().map(|&i| self.length_of_stay[i]).collect(),
        }
    }

    pub fn log_input_data_summary(&self) {
        log::info!("----- Input Data Summary -----");
        log::info!("{} admissions", self.len());
        for severity in Severity::ALL {
            let count = self
                .records
                .iter()
                .filter(|r| r.severity == severity)
                .count();
            log::info!("{}: {} admissions", severity, count);
        }
        if let (Some(min), Some(max)) = (
            self.length_of_stay.iter().copied().reduce(f32::min),
            self.length_of_stay.iter().copied().reduce(f32::max),
        ) {
            log::info!("Length of stay ranges from {} to {} days", min, max);
        }
        log::info!("-------------------------------");
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn record(age: u32, diagnosis: &str, severity: Severity) -> PatientRecord {
        PatientRecord {
            age,
            gender: "Female".to_string(),
            admission_type: "Emergency".to_string(),
            primary_diagnosis: diagnosis.to_string(),
            severity,
            comorbidities: "None".to_string(),
            procedure_codes_count: 1,
            ward_department: "Cardiology".to_string(),
            discharge_disposition: "Home".to_string(),
        }
    }

    /// Small synthetic table where stays grow with age and severity.
    pub fn dataset(n: usize) -> StayDataset {
        let diagnoses = ["Diabetes", "Stroke", "Pneumonia"];
        let mut records = Vec::with_capacity(n);
        let mut targets = Vec::with_capacity(n);
        for i in 0..n {
            let severity = Severity::ALL[i % 3];
            let age = 20 + (i as u32 * 7) % 70;
            records.push(record(age, diagnoses[i % diagnoses.len()], severity));
            let base = match severity {
                Severity::Mild => 2.0,
                Severity::Moderate => 5.0,
                Severity::Severe => 9.0,
            };
            targets.push(base + age as f32 / 40.0);
        }
        StayDataset::new(records, targets).unwrap()
    }
}
