//! Admission form input.
//!
//! The form collects free-text comorbidities and procedure codes; this
//! module turns them into the values the regression pipeline was trained on.
use crate::narrative::Severity;
use crate::record::PatientRecord;

pub const MIN_AGE: u32 = 0;
pub const MAX_AGE: u32 = 100;

/// Value stored when no comorbidities were entered on the form.
pub const NO_COMORBIDITIES: &str = "None";

pub const GENDERS: &[&str] = &["Male", "Female", "Non Binary"];

pub const ADMISSION_TYPES: &[&str] = &["Emergency", "Elective", "Urgent"];

pub const PRIMARY_DIAGNOSES: &[&str] = &[
    "Diabetes",
    "Hypertension",
    "Asthma",
    "Heart Disease",
    "Chronic Obstructive Pulmonary Disease (COPD)",
    "Kidney Disease",
    "Stroke",
    "Liver Disease",
    "Pneumonia",
    "Cancer",
    "Dementia",
    "Anemia",
    "Arthritis",
    "Obesity",
    "Sepsis",
    "COVID-19",
    "Fracture",
];

pub const WARDS: &[&str] = &[
    "Cardiology",
    "Orthopedics",
    "Respiratory",
    "Transplant",
    "General Surgery",
];

pub const DISCHARGE_DISPOSITIONS: &[&str] = &[
    "Transferred to another facility",
    "Long-term Care Facility",
    "Home",
];

/// Raw values as entered on the admission form.
#[derive(Debug, Clone)]
pub struct PatientForm {
    pub age: u32,
    pub gender: String,
    pub admission_type: String,
    pub primary_diagnosis: String,
    pub severity: Severity,
    /// Comma-separated, may be empty.
    pub comorbidities: String,
    /// Comma-separated procedure codes, may be empty.
    pub procedure_codes: String,
    pub ward_department: String,
    pub discharge_disposition: String,
}

impl PatientForm {
    pub fn into_record(self) -> PatientRecord {
        let comorbidities = if self.comorbidities.is_empty() {
            NO_COMORBIDITIES.to_string()
        } else {
            self.comorbidities
        };
        PatientRecord {
            age: self.age,
            gender: self.gender,
            admission_type: self.admission_type,
            primary_diagnosis: self.primary_diagnosis,
            severity: self.severity,
            comorbidities,
            procedure_codes_count: procedure_codes_count(&self.procedure_codes),
            ward_department: self.ward_department,
            discharge_disposition: self.discharge_disposition,
        }
    }
}

/// Number of comma-separated entries; an empty field counts as zero.
pub fn procedure_codes_count(codes: &str) -> u32 {
    if codes.is_empty() {
        0
    } else {
        codes.split(',').count() as u32
    }
}
