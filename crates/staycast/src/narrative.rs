//! Day-by-day stay narratives.
//!
//! A stay of `n` days is described one day at a time. Each day is first
//! classified into a [`DayCategory`] and the description is then looked up
//! in a fixed `(Severity, DayCategory)` table.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StayError;

/// Longest stay the predictor will report.
pub const MAX_STAY_DAYS: u8 = 12;

/// Shortest stay the predictor will report.
pub const MIN_STAY_DAYS: u8 = 1;

/// Severity of illness as recorded on admission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Mild, Severity::Moderate, Severity::Severe];

    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Mild => "Mild",
            Severity::Moderate => "Moderate",
            Severity::Severe => "Severe",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = StayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mild" => Ok(Severity::Mild),
            "moderate" => Ok(Severity::Moderate),
            "severe" => Ok(Severity::Severe),
            _ => Err(StayError::InvalidSeverity(s.to_string())),
        }
    }
}

/// Position of a day within a stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayCategory {
    First,
    Second,
    Interior,
    Final,
}

impl DayCategory {
    /// Classify 1-based `day` within a stay of `total` days.
    ///
    /// Day 1 is always `First`, even for a one-day stay, and day 2 is always
    /// `Second`. Only stays of three or more days have a `Final` day.
    pub fn classify(day: u8, total: StayLength) -> DayCategory {
        match day {
            1 => DayCategory::First,
            2 => DayCategory::Second,
            d if d < total.days() => DayCategory::Interior,
            _ => DayCategory::Final,
        }
    }
}

/// Narrative text for one day of a stay at the given severity.
pub fn day_description(severity: Severity, category: DayCategory) -> &'static str {
    use DayCategory::*;
    use Severity::*;

    match (severity, category) {
        (Mild, First) => "Basic assessments, diagnostic tests, and initiation of treatment.",
        (Mild, Second) => "Continued monitoring with mild interventions if required.",
        (Mild, Interior) => "Stable condition with basic physiotherapy and continued care.",
        (Mild, Final) => "Final evaluations and discharge preparations.",
        (Moderate, First) => "Thorough assessments, blood work, and more complex treatments.",
        (Moderate, Second) => "Ongoing treatment adjustments based on the condition.",
        (Moderate, Interior) => "Additional interventions like imaging or minor surgeries.",
        (Moderate, Final) => "Discharge planning and final reviews by the healthcare team.",
        (Severe, First) => "Critical interventions and monitoring in the ICU.",
        (Severe, Second) => {
            "Aggressive treatments or surgeries; patient remains under close observation."
        }
        (Severe, Interior) => "Extended ICU care and possible second surgeries or interventions.",
        (Severe, Final) => "Transition to a recovery ward and preparation for discharge.",
    }
}

/// A length of stay in whole days, always within `1..=12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct StayLength(u8);

impl StayLength {
    pub fn new(days: u8) -> Result<Self, StayError> {
        if (MIN_STAY_DAYS..=MAX_STAY_DAYS).contains(&days) {
            Ok(StayLength(days))
        } else {
            Err(StayError::DaysOutOfRange(days as i64))
        }
    }

    /// Round a real-valued model estimate to the nearest day (ties to even)
    /// and clamp it into `1..=12`.
    pub fn from_estimate(estimate: f32) -> Result<Self, StayError> {
        if !estimate.is_finite() {
            return Err(StayError::NonFiniteEstimate(estimate));
        }
        let rounded = estimate.round_ties_even();
        let clamped = rounded.clamp(MIN_STAY_DAYS as f32, MAX_STAY_DAYS as f32);
        Ok(StayLength(clamped as u8))
    }

    pub fn days(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for StayLength {
    type Error = StayError;

    fn try_from(days: u8) -> Result<Self, Self::Error> {
        StayLength::new(days)
    }
}

impl From<StayLength> for u8 {
    fn from(length: StayLength) -> u8 {
        length.0
    }
}

impl fmt::Display for StayLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} days", self.0)
    }
}

/// Description of a single day of a stay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayNarrative {
    pub day: u8,
    pub category: DayCategory,
    pub description: &'static str,
}

/// Describe every day of a stay, in order.
pub fn describe_stay(length: StayLength, severity: Severity) -> Vec<DayNarrative> {
    (1..=length.days())
        .map(|day| {
            let category = DayCategory::classify(day, length);
            DayNarrative {
                day,
                category,
                description: day_description(severity, category),
            }
        })
        .collect()
}

/// Describe a stay from unvalidated input, e.g. a form or command line.
pub fn describe_stay_from_label(days: u8, severity: &str) -> Result<Vec<DayNarrative>, StayError> {
    let severity = severity.parse::<Severity>()?;
    let length = StayLength::new(days)?;
    Ok(describe_stay(length, severity))
}

/// A predicted stay together with its narrative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StayBreakdown {
    pub length: StayLength,
    pub severity: Severity,
    pub days: Vec<DayNarrative>,
}

impl StayBreakdown {
    pub fn new(length: StayLength, severity: Severity) -> Self {
        StayBreakdown {
            length,
            severity,
            days: describe_stay(length, severity),
        }
    }
}

impl fmt::Display for StayBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Predicted length of stay: {}", self.length)?;
        for entry in &self.days {
            writeln!(f, "Day {}: {}", entry.day, entry.description)?;
        }
        Ok(())
    }
}
