//! Length-of-stay CSV/TSV reader.
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

use crate::narrative::Severity;
use crate::record::{PatientRecord, StayDataset, UNKNOWN_COMORBIDITIES};

/// Configuration for reading length-of-stay tables.
#[derive(Debug, Clone)]
pub struct StayCsvConfig {
    /// Field delimiter. `None` picks tab for `.tsv` files and comma otherwise.
    pub delimiter: Option<u8>,
    /// Value used for rows with blank comorbidities.
    pub missing_comorbidities: String,
}

impl Default for StayCsvConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            missing_comorbidities: UNKNOWN_COMORBIDITIES.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct StayRow {
    #[serde(rename = "Age")]
    age: u32,
    #[serde(rename = "Gender")]
    gender: String,
    #[serde(rename = "Admission Type")]
    admission_type: String,
    #[serde(rename = "Primary Diagnosis")]
    primary_diagnosis: String,
    #[serde(rename = "Severity of Illness")]
    severity: String,
    #[serde(rename = "Comorbidities", default)]
    comorbidities: Option<String>,
    #[serde(rename = "Procedure Codes Count")]
    procedure_codes_count: u32,
    #[serde(rename = "Ward/Department")]
    ward_department: String,
    #[serde(rename = "Discharge Disposition")]
    discharge_disposition: String,
    #[serde(rename = "Length of Stay")]
    length_of_stay: f32,
}

/// Read a length-of-stay table with the default configuration.
pub fn read_stay_csv<P: AsRef<Path>>(path: P) -> Result<StayDataset> {
    read_stay_csv_with_config(path, &StayCsvConfig::default())
}

/// Read a length-of-stay table using a custom configuration.
pub fn read_stay_csv_with_config<P: AsRef<Path>>(
    path: P,
    config: &StayCsvConfig,
) -> Result<StayDataset> {
    let path = path.as_ref();
    let delimiter = config.delimiter.unwrap_or_else(|| delimiter_for(path));

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open length of stay table: {}", path.display()))?;

    let mut records = Vec::new();
    let mut length_of_stay = Vec::new();

    for (row_idx, result) in reader.deserialize::<StayRow>().enumerate() {
        let row = result.with_context(|| format!("Failed to read row {}", row_idx + 1))?;

        let severity = row
            .severity
            .parse::<Severity>()
            .with_context(|| format!("Invalid severity at row {}", row_idx + 1))?;

        let comorbidities = row
            .comorbidities
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| config.missing_comorbidities.clone());

        records.push(PatientRecord {
            age: row.age,
            gender: row.gender,
            admission_type: row.admission_type,
            primary_diagnosis: row.primary_diagnosis,
            severity,
            comorbidities,
            procedure_codes_count: row.procedure_codes_count,
            ward_department: row.ward_department,
            discharge_disposition: row.discharge_disposition,
        });
        length_of_stay.push(row.length_of_stay);
    }

    if records.is_empty() {
        return Err(anyhow!("No admissions found in {}", path.display()));
    }
    log::debug!("Read {} admissions from {}", records.len(), path.display());

    StayDataset::new(records, length_of_stay)
}

fn delimiter_for(path: &Path) -> u8 {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .as_deref()
    {
        Some("tsv") => b'\t',
        _ => b',',
    }
}
