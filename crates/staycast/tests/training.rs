//! End-to-end tests: CSV ingestion, grid search, persistence and prediction.

use std::io::Write;
use std::path::Path;

use staycast::config::{ModelConfig, SearchGrid};
use staycast::io::{read_stay_csv, read_stay_csv_with_config, StayCsvConfig};
use staycast::model_selection::{train_test_split, GridSearchCv};
use staycast::narrative::Severity;
use staycast::pipeline::StayPipeline;
use staycast::predictor::Predictor;
use staycast::record::UNKNOWN_COMORBIDITIES;

const HEADER: &str = "Age,Gender,Admission Type,Primary Diagnosis,Severity of Illness,\
Comorbidities,Procedure Codes Count,Ward/Department,Discharge Disposition,Length of Stay";

fn write_table(path: &Path, n: usize) {
    let severities = ["Mild", "Moderate", "Severe"];
    let diagnoses = ["Diabetes", "Stroke", "Pneumonia", "Fracture"];
    let wards = ["Cardiology", "Orthopedics", "Respiratory"];
    let mut file = std::fs::File::create(path).unwrap();
    writeln!(file, "{}", HEADER).unwrap();
    for i in 0..n {
        let severity = severities[i % 3];
        let age = 18 + (i * 11) % 80;
        let los = match severity {
            "Mild" => 2,
            "Moderate" => 5,
            _ => 9,
        } + age / 40;
        let comorbidities = if i % 5 == 0 { "" } else { "Arthritis" };
        writeln!(
            file,
            "{},{},Emergency,{},{},{},{},{},Home,{}",
            age,
            if i % 2 == 0 { "Male" } else { "Female" },
            diagnoses[i % diagnoses.len()],
            severity,
            comorbidities,
            i % 4,
            wards[i % wards.len()],
            los
        )
        .unwrap();
    }
}

fn tiny_grid() -> SearchGrid {
    SearchGrid {
        n_estimators: vec![20, 40],
        max_depth: vec![3],
        learning_rate: vec![0.1, 0.3],
        subsample: vec![1.0],
        colsample_bytree: vec![1.0],
    }
}

#[test]
fn reads_table_and_fills_missing_comorbidities() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stays.csv");
    write_table(&path, 10);

    let data = read_stay_csv(&path).unwrap();
    assert_eq!(data.len(), 10);
    assert_eq!(data.records[0].comorbidities, UNKNOWN_COMORBIDITIES);
    assert_eq!(data.records[1].comorbidities, "Arthritis");
    assert_eq!(data.records[2].severity, Severity::Severe);
    assert_eq!(data.length_of_stay[0], 2.0);
}

#[test]
fn reads_tab_separated_table() {
    let dir = tempfile::tempdir().unwrap();
    let comma = dir.path().join("stays.csv");
    write_table(&comma, 6);
    let path = dir.path().join("stays.tsv");
    std::fs::write(&path, std::fs::read_to_string(&comma).unwrap().replace(',', "\t")).unwrap();

    let data = read_stay_csv(&path).unwrap();
    assert_eq!(data.len(), 6);
    assert_eq!(data.records[3].primary_diagnosis, "Fracture");
    assert_eq!(data.records[0].ward_department, "Cardiology");
    assert_eq!(data.records[0].comorbidities, UNKNOWN_COMORBIDITIES);
}

#[test]
fn explicit_delimiter_overrides_extension() {
    let dir = tempfile::tempdir().unwrap();
    let comma = dir.path().join("stays.csv");
    write_table(&comma, 4);
    let path = dir.path().join("semicolon.csv");
    std::fs::write(&path, std::fs::read_to_string(&comma).unwrap().replace(',', ";")).unwrap();

    assert!(read_stay_csv(&path).is_err());

    let config = StayCsvConfig {
        delimiter: Some(b';'),
        ..StayCsvConfig::default()
    };
    let data = read_stay_csv_with_config(&path, &config).unwrap();
    assert_eq!(data.len(), 4);
    assert_eq!(data.records[2].severity, Severity::Severe);
    assert_eq!(data.length_of_stay[1], 5.0);
}

#[test]
fn rejects_unknown_severity_in_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    std::fs::write(
        &path,
        format!("{}\n40,Male,Urgent,Asthma,Critical,None,1,Respiratory,Home,3\n", HEADER),
    )
    .unwrap();
    let err = read_stay_csv(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("row 1"));
}

#[test]
fn rejects_empty_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    std::fs::write(&path, format!("{}\n", HEADER)).unwrap();
    assert!(read_stay_csv(&path).is_err());
}

#[test]
fn grid_search_trains_a_usable_predictor() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stays.csv");
    write_table(&path, 60);
    let data = read_stay_csv(&path).unwrap();

    let (train_idx, test_idx) = train_test_split(data.len(), 0.2, 42).unwrap();
    assert_eq!(test_idx.len(), 12);
    let train = data.subset(&train_idx);
    let test = data.subset(&test_idx);

    let search = GridSearchCv::new(ModelConfig::default(), tiny_grid(), 3);
    let result = search.fit(&train).unwrap();
    assert_eq!(result.candidates.len(), 4);
    assert!(result.candidates.iter().all(|c| c.fold_scores.len() == 3));
    assert!(result
        .candidates
        .iter()
        .all(|c| c.mean_score <= result.best_score));
    assert!((result.best_pipeline.config().learning_rate - result.best_params.learning_rate).abs() < 1e-6);

    let model_path = dir.path().join("model.json");
    result.best_pipeline.save(&model_path).unwrap();

    let predictor = Predictor::from_file(&model_path).unwrap();
    for record in &test.records {
        let days = predictor.predict_days(record).unwrap().days();
        assert!((1..=12).contains(&days));
        let breakdown = predictor.breakdown(record).unwrap();
        assert_eq!(breakdown.days.len(), breakdown.length.days() as usize);
        assert_eq!(breakdown.severity, record.severity);
    }
}

#[test]
fn grid_search_with_row_and_column_subsampling() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stays.csv");
    write_table(&path, 45);
    let data = read_stay_csv(&path).unwrap();

    let grid = SearchGrid {
        n_estimators: vec![30],
        max_depth: vec![3],
        learning_rate: vec![0.1],
        subsample: vec![0.8, 1.0],
        colsample_bytree: vec![0.8],
    };
    let result = GridSearchCv::new(ModelConfig::default(), grid, 3)
        .fit(&data)
        .unwrap();
    assert_eq!(result.candidates.len(), 2);
    assert!(result.candidates.iter().all(|c| c.mean_score.is_finite()));
    assert!((result.best_params.colsample_bytree - 0.8).abs() < 1e-12);

    let predictions = result.best_pipeline.predict(&data.records).unwrap();
    assert_eq!(predictions.len(), data.len());
    assert!(predictions.iter().all(|p| p.is_finite()));
}

#[test]
fn pipeline_separates_severities() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stays.csv");
    write_table(&path, 90);
    let data = read_stay_csv(&path).unwrap();

    let pipeline = StayPipeline::fit(&data, &ModelConfig::default()).unwrap();
    let mut mild = data.records[0].clone();
    mild.severity = Severity::Mild;
    let mut severe = mild.clone();
    severe.severity = Severity::Severe;

    let predictions = pipeline.predict(&[mild, severe]).unwrap();
    assert!(predictions[0] < predictions[1]);
}
