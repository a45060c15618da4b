//! Integration tests for the day-by-day stay narrative.

use staycast::error::StayError;
use staycast::narrative::{
    day_description, describe_stay, describe_stay_from_label, DayCategory, Severity, StayLength,
    MAX_STAY_DAYS,
};

fn descriptions(days: u8, severity: Severity) -> Vec<&'static str> {
    describe_stay(StayLength::new(days).unwrap(), severity)
        .into_iter()
        .map(|d| d.description)
        .collect()
}

// ---------------------------------------------------------------------------
// Entry counts and numbering
// ---------------------------------------------------------------------------

#[test]
fn one_entry_per_day_for_every_length_and_severity() {
    for severity in Severity::ALL {
        for days in 1..=MAX_STAY_DAYS {
            let narrative = describe_stay(StayLength::new(days).unwrap(), severity);
            assert_eq!(narrative.len(), days as usize);
            let numbers: Vec<u8> = narrative.iter().map(|d| d.day).collect();
            assert_eq!(numbers, (1..=days).collect::<Vec<_>>());
        }
    }
}

// ---------------------------------------------------------------------------
// Short stays
// ---------------------------------------------------------------------------

#[test]
fn one_day_stay_reads_as_first_day() {
    for severity in Severity::ALL {
        assert_eq!(
            descriptions(1, severity),
            vec![day_description(severity, DayCategory::First)]
        );
    }
}

#[test]
fn two_day_stay_is_first_then_second() {
    for severity in Severity::ALL {
        assert_eq!(
            descriptions(2, severity),
            vec![
                day_description(severity, DayCategory::First),
                day_description(severity, DayCategory::Second),
            ]
        );
    }
}

// ---------------------------------------------------------------------------
// Longer stays
// ---------------------------------------------------------------------------

#[test]
fn five_day_severe_stay() {
    assert_eq!(
        descriptions(5, Severity::Severe),
        vec![
            "Critical interventions and monitoring in the ICU.",
            "Aggressive treatments or surgeries; patient remains under close observation.",
            "Extended ICU care and possible second surgeries or interventions.",
            "Extended ICU care and possible second surgeries or interventions.",
            "Transition to a recovery ward and preparation for discharge.",
        ]
    );
}

#[test]
fn twelve_day_mild_stay_ends_with_discharge() {
    let days = descriptions(12, Severity::Mild);
    assert_eq!(days[11], "Final evaluations and discharge preparations.");
    assert!(days[2..11]
        .iter()
        .all(|d| *d == "Stable condition with basic physiotherapy and continued care."));
}

#[test]
fn every_severity_has_distinct_texts() {
    let categories = [
        DayCategory::First,
        DayCategory::Second,
        DayCategory::Interior,
        DayCategory::Final,
    ];
    let mut all: Vec<&str> = Severity::ALL
        .iter()
        .flat_map(|&s| categories.iter().map(move |&c| day_description(s, c)))
        .collect();
    all.sort_unstable();
    all.dedup();
    assert_eq!(all.len(), 12);
}

// ---------------------------------------------------------------------------
// Invalid input
// ---------------------------------------------------------------------------

#[test]
fn unknown_severity_fails() {
    let err = describe_stay_from_label(4, "Critical").unwrap_err();
    assert_eq!(err, StayError::InvalidSeverity("Critical".to_string()));
    assert!(describe_stay_from_label(4, "").is_err());
}

#[test]
fn out_of_range_days_fail() {
    assert_eq!(
        describe_stay_from_label(0, "Mild").unwrap_err(),
        StayError::DaysOutOfRange(0)
    );
    assert_eq!(
        describe_stay_from_label(13, "Mild").unwrap_err(),
        StayError::DaysOutOfRange(13)
    );
}

#[test]
fn label_is_parsed_case_insensitively() {
    let narrative = describe_stay_from_label(3, "moderate").unwrap();
    assert_eq!(
        narrative[2].description,
        "Discharge planning and final reviews by the healthcare team."
    );
}

#[test]
fn stay_length_serializes_as_plain_number() {
    let length = StayLength::new(7).unwrap();
    assert_eq!(serde_json::to_string(&length).unwrap(), "7");
    assert!(serde_json::from_str::<StayLength>("13").is_err());
}
