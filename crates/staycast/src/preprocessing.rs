//! Column encoding for patient records.
//!
//! `Age` is passed through as the only numeric feature and every
//! categorical column is one-hot encoded against the categories seen at
//! fit time. Categories that were not seen encode as an all-zero block.
//! Columns that are neither (`Procedure Codes Count`) are dropped.
use std::collections::BTreeSet;

use anyhow::{anyhow, Result};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::record::PatientRecord;

/// Categorical columns in feature order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoricalColumn {
    Gender,
    AdmissionType,
    PrimaryDiagnosis,
    SeverityOfIllness,
    Comorbidities,
    WardDepartment,
    DischargeDisposition,
}

impl CategoricalColumn {
    pub const ALL: [CategoricalColumn; 7] = [
        CategoricalColumn::Gender,
        CategoricalColumn::AdmissionType,
        CategoricalColumn::PrimaryDiagnosis,
        CategoricalColumn::SeverityOfIllness,
        CategoricalColumn::Comorbidities,
        CategoricalColumn::WardDepartment,
        CategoricalColumn::DischargeDisposition,
    ];

    /// Column header in the training table.
    pub fn name(self) -> &'static str {
        match self {
            CategoricalColumn::Gender => "Gender",
            CategoricalColumn::AdmissionType => "Admission Type",
            CategoricalColumn::PrimaryDiagnosis => "Primary Diagnosis",
            CategoricalColumn::SeverityOfIllness => "Severity of Illness",
            CategoricalColumn::Comorbidities => "Comorbidities",
            CategoricalColumn::WardDepartment => "Ward/Department",
            CategoricalColumn::DischargeDisposition => "Discharge Disposition",
        }
    }

    pub fn value(self, record: &PatientRecord) -> &str {
        match self {
            CategoricalColumn::Gender => &record.gender,
            CategoricalColumn::AdmissionType => &record.admission_type,
            CategoricalColumn::PrimaryDiagnosis => &record.primary_diagnosis,
            CategoricalColumn::SeverityOfIllness => record.severity.as_str(),
            CategoricalColumn::Comorbidities => &record.comorbidities,
            CategoricalColumn::WardDepartment => &record.ward_department,
            CategoricalColumn::DischargeDisposition => &record.discharge_disposition,
        }
    }
}

pub const NUMERIC_FEATURES: [&str; 1] = ["Age"];

/// Learned one-hot vocabulary for one categorical column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryVocabulary {
    pub column: CategoricalColumn,
    /// Sorted, de-duplicated categories.
    pub categories: Vec<String>,
}

impl CategoryVocabulary {
    fn position(&self, value: &str) -> Option<usize> {
        self.categories
            .binary_search_by(|c| c.as_str().cmp(value))
            .ok()
    }
}

/// Numeric passthrough plus ignore-unknown one-hot encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnEncoder {
    vocabularies: Vec<CategoryVocabulary>,
}

impl ColumnEncoder {
    /// Learn the category vocabulary of every categorical column.
    pub fn fit(records: &[PatientRecord]) -> Result<Self> {
        if records.is_empty() {
            return Err(anyhow!("Cannot fit a column encoder on zero records"));
        }
        let vocabularies = CategoricalColumn::ALL
            .iter()
            .map(|&column| {
                let categories: BTreeSet<&str> =
                    records.iter().map(|r| column.value(r)).collect();
                CategoryVocabulary {
                    column,
                    categories: categories.into_iter().map(str::to_string).collect(),
                }
            })
            .collect();
        Ok(Self { vocabularies })
    }

    pub fn n_features(&self) -> usize {
        NUMERIC_FEATURES.len()
            + self
                .vocabularies
                .iter()
                .map(|v| v.categories.len())
                .sum::<usize>()
    }

    /// Output column names: `Age`, then `<column>_<category>`.
    pub fn feature_names(&self) -> Vec<String> {
        let mut names: Vec<String> = NUMERIC_FEATURES.iter().map(|s| s.to_string()).collect();
        for vocab in &self.vocabularies {
            for category in &vocab.categories {
                names.push(format!("{}_{}", vocab.column.name(), category));
            }
        }
        names
    }

    /// Encode one record into `out`, which must hold `n_features()` zeros.
    fn encode_into(&self, record: &PatientRecord, out: &mut [f32]) {
        out[0] = record.age as f32;
        let mut offset = NUMERIC_FEATURES.len();
        for vocab in &self.vocabularies {
            if let Some(pos) = vocab.position(vocab.column.value(record)) {
                out[offset + pos] = 1.0;
            }
            offset += vocab.categories.len();
        }
    }

    /// Encode records into a `(records, features)` matrix.
    pub fn transform(&self, records: &[PatientRecord]) -> Array2<f32> {
        let n_features = self.n_features();
        let mut data = vec![0.0f32; records.len() * n_features];
        for (row, record) in data.chunks_mut(n_features).zip(records) {
            self.encode_into(record, row);
        }
        Array2::from_shape_vec((records.len(), n_features), data)
            .expect("transform: shape mismatch")
    }
}

/// Fit an encoder and transform the same records in one call.
pub fn fit_transform(records: &[PatientRecord]) -> Result<(ColumnEncoder, Array2<f32>)> {
    let encoder = ColumnEncoder::fit(records)?;
    let x = encoder.transform(records);
    Ok((encoder, x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narrative::Severity;
    use crate::record::fixtures::record;

    #[test]
    fn test_fit_counts_categories() {
        let records = vec![
            record(30, "Stroke", Severity::Mild),
            record(40, "Asthma", Severity::Severe),
            record(50, "Stroke", Severity::Severe),
        ];
        let encoder = ColumnEncoder::fit(&records).unwrap();
        // Age + gender(1) + admission(1) + diagnosis(2) + severity(2)
        // + comorbidities(1) + ward(1) + discharge(1)
        assert_eq!(encoder.n_features(), 10);
        assert_eq!(encoder.feature_names().len(), 10);
        assert_eq!(encoder.feature_names()[3], "Primary Diagnosis_Asthma");
    }

    #[test]
    fn test_transform_one_hot() {
        let records = vec![
            record(30, "Stroke", Severity::Mild),
            record(40, "Asthma", Severity::Severe),
        ];
        let (_, x) = fit_transform(&records).unwrap();
        assert_eq!(x.shape(), &[2, 10]);
        assert_eq!(x[[0, 0]], 30.0);
        // diagnosis block: Asthma, Stroke
        assert_eq!(x[[0, 3]], 0.0);
        assert_eq!(x[[0, 4]], 1.0);
        assert_eq!(x[[1, 3]], 1.0);
        // every row has exactly one hot value per categorical column
        for row in x.outer_iter() {
            let hot: f32 = row.iter().skip(1).sum();
            assert_eq!(hot, CategoricalColumn::ALL.len() as f32);
        }
    }

    #[test]
    fn test_unknown_category_is_ignored() {
        let encoder = ColumnEncoder::fit(&[record(30, "Stroke", Severity::Mild)]).unwrap();
        let x = encoder.transform(&[record(65, "Sepsis", Severity::Mild)]);
        assert_eq!(x[[0, 0]], 65.0);
        let hot: f32 = x.row(0).iter().skip(1).sum();
        assert_eq!(hot, (CategoricalColumn::ALL.len() - 1) as f32);
    }

    #[test]
    fn test_fit_rejects_empty() {
        assert!(ColumnEncoder::fit(&[]).is_err());
    }
}
