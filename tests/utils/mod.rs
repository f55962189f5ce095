use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use airline_satisfaction::schema::{DEFAULT_ENCODED_COLUMNS, SURVEY_COLUMNS};
use airline_satisfaction::{PredictorConfig, RawRecord, RawValue, ReferenceTable};
use airline_satisfaction::reader::ReadOptions;

/// Number of rows in the generated reference population
pub const REFERENCE_ROWS: usize = 1000;

/// Class labels used by the fixture models
pub const CLASSES: [&str; 2] = ["neutral or dissatisfied", "satisfied"];

/// Features of the fixture models, in training order
pub const MODEL_FEATURES: [&str; 10] = [
    "age",
    "flight_distance",
    "online_boarding",
    "class_Business",
    "class_Eco",
    "class_Eco Plus",
    "customer_type_Loyal Customer",
    "customer_type_disloyal Customer",
    "type_of_travel_Business travel",
    "type_of_travel_Personal Travel",
];

/// Value of one survey column in generated reference row `i`
///
/// Exactly 30% of the rows are Business class, 10% Eco Plus.
#[must_use]
pub fn reference_value(column: &str, i: usize) -> RawValue {
    match column {
        "customer_type" => RawValue::from(if i % 5 == 0 {
            "disloyal Customer"
        } else {
            "Loyal Customer"
        }),
        "type_of_travel" => RawValue::from(if i % 3 == 0 {
            "Personal Travel"
        } else {
            "Business travel"
        }),
        "class" => RawValue::from(match i % 10 {
            0..=2 => "Business",
            9 => "Eco Plus",
            _ => "Eco",
        }),
        "age" => RawValue::Number((10 + (i * 7) % 70) as f64),
        "flight_distance" => RawValue::Number((100 + (i * 13) % 4000) as f64),
        "departure_delay_in_minutes" => RawValue::Number(((i * 3) % 60) as f64),
        "arrival_delay_in_minutes" => RawValue::Number(((i * 5) % 60) as f64),
        rating => {
            let offset = SURVEY_COLUMNS
                .iter()
                .position(|c| c.name == rating)
                .unwrap_or(0);
            RawValue::Number((1 + (i + offset) % 5) as f64)
        }
    }
}

/// Generated reference row `i` as a raw record
#[must_use]
pub fn reference_record(i: usize) -> RawRecord {
    SURVEY_COLUMNS
        .iter()
        .map(|c| (c.name, reference_value(c.name, i)))
        .collect()
}

/// Write the generated reference population as CSV
pub fn write_reference_csv(dir: &Path, rows: usize) -> PathBuf {
    let mut csv = SURVEY_COLUMNS
        .iter()
        .map(|c| c.name)
        .collect::<Vec<_>>()
        .join(",");
    csv.push('\n');
    for i in 0..rows {
        let line = SURVEY_COLUMNS
            .iter()
            .map(|c| reference_value(c.name, i).to_string())
            .collect::<Vec<_>>()
            .join(",");
        writeln!(csv, "{line}").unwrap();
    }

    let path = dir.join("airline_train_raw.csv");
    fs::write(&path, csv).unwrap();
    path
}

/// Decision tree over `MODEL_FEATURES`
///
/// online_boarding > 3.5 is satisfied; otherwise Business class is a tie
/// (first class wins) and everything else is dissatisfied.
#[must_use]
pub fn tree_artifact() -> serde_json::Value {
    serde_json::json!({
        "kind": "decision_tree",
        "feature_names_in": MODEL_FEATURES,
        "classes": CLASSES,
        "nodes": [
            {"feature": 2, "threshold": 3.5, "left": 1, "right": 4, "value": [95, 75]},
            {"feature": 3, "threshold": 0.5, "left": 2, "right": 3, "value": [90, 30]},
            {"left": -1, "right": -1, "value": [70, 10]},
            {"left": -1, "right": -1, "value": [20, 20]},
            {"left": -1, "right": -1, "value": [5, 45]}
        ]
    })
}

/// Linear SVC over `MODEL_FEATURES`: satisfied when online_boarding > 3
#[must_use]
pub fn svc_artifact() -> serde_json::Value {
    let mut coef = vec![0.0; MODEL_FEATURES.len()];
    coef[2] = 1.0;
    serde_json::json!({
        "kind": "linear_svc",
        "feature_names_in": MODEL_FEATURES,
        "classes": CLASSES,
        "coef": [coef],
        "intercept": [-3.0]
    })
}

/// Write a model artifact as JSON
pub fn write_model(dir: &Path, name: &str, artifact: &serde_json::Value) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, artifact.to_string()).unwrap();
    path
}

/// Configuration pointing at fixture files, without a spinner
#[must_use]
pub fn test_config(model_path: PathBuf, reference_path: PathBuf) -> PredictorConfig {
    PredictorConfig {
        model_path,
        reference_path,
        show_progress: false,
        ..PredictorConfig::default()
    }
}

/// Default encoded columns as owned strings
#[must_use]
pub fn encoded_columns() -> Vec<String> {
    DEFAULT_ENCODED_COLUMNS.iter().map(|c| (*c).to_string()).collect()
}

/// Load the generated population from a fresh CSV
pub fn load_reference(dir: &Path, rows: usize) -> ReferenceTable {
    let path = write_reference_csv(dir, rows);
    ReferenceTable::load(&path, ReadOptions::from(&PredictorConfig::default()), &encoded_columns())
        .unwrap()
}

/// Training-time encoding of a raw record onto `MODEL_FEATURES`
///
/// Written independently of the library's encoder.
#[must_use]
pub fn training_encoding(record: &RawRecord) -> Vec<f64> {
    MODEL_FEATURES
        .iter()
        .map(|feature| {
            if let Some(value) = record.get(feature).and_then(RawValue::as_f64) {
                return value;
            }
            let hit = DEFAULT_ENCODED_COLUMNS.iter().any(|field| {
                record
                    .get(field)
                    .and_then(RawValue::as_str)
                    .is_some_and(|v| *feature == format!("{field}_{v}"))
            });
            if hit { 1.0 } else { 0.0 }
        })
        .collect()
}
