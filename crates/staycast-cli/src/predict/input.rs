use anyhow::{anyhow, Result};
use clap::ArgMatches;
use std::path::PathBuf;

use staycast::form::PatientForm;
use staycast::narrative::Severity;

/// Everything `staycast predict` needs for one admission.
#[derive(Debug, Clone)]
pub struct PredictInput {
    pub model_path: PathBuf,
    pub html_output: Option<PathBuf>,
    pub form: PatientForm,
}

fn required_string(matches: &ArgMatches, id: &str) -> Result<String> {
    matches
        .get_one::<String>(id)
        .cloned()
        .ok_or_else(|| anyhow!("Missing required argument '{}'", id))
}

impl PredictInput {
    pub fn from_arguments(matches: &ArgMatches) -> Result<Self> {
        let model_path = matches
            .get_one::<PathBuf>("model_path")
            .cloned()
            .ok_or_else(|| anyhow!("Missing required argument 'model_path'"))?;
        let age = *matches
            .get_one::<u32>("age")
            .ok_or_else(|| anyhow!("Missing required argument 'age'"))?;
        let severity: Severity = required_string(matches, "severity")?.parse()?;

        let form = PatientForm {
            age,
            gender: required_string(matches, "gender")?,
            admission_type: required_string(matches, "admission_type")?,
            primary_diagnosis: required_string(matches, "diagnosis")?,
            severity,
            comorbidities: matches
                .get_one::<String>("comorbidities")
                .cloned()
                .unwrap_or_default(),
            procedure_codes: matches
                .get_one::<String>("procedure_codes")
                .cloned()
                .unwrap_or_default(),
            ward_department: required_string(matches, "ward")?,
            discharge_disposition: required_string(matches, "discharge")?,
        };

        Ok(Self {
            model_path,
            html_output: matches.get_one::<PathBuf>("html_output").cloned(),
            form,
        })
    }
}
