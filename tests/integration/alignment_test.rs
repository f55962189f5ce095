use airline_satisfaction::{EncodedSchema, FeatureEncoder, RawValue, SurveyError};

use crate::utils::{MODEL_FEATURES, encoded_columns, load_reference, reference_record};

fn schema() -> EncodedSchema {
    EncodedSchema::new(MODEL_FEATURES.iter().map(|f| (*f).to_string()).collect()).unwrap()
}

#[test]
fn test_shape_matches_schema_for_every_category() {
    let dir = tempfile::tempdir().unwrap();
    let reference = load_reference(dir.path(), 200);
    let encoder = FeatureEncoder::new(&reference, &encoded_columns()).unwrap();
    let schema = schema();

    for class in ["Business", "Eco", "Eco Plus", "First", ""] {
        for travel in ["Business travel", "Personal Travel", "Space travel"] {
            let mut raw = reference_record(4);
            raw.insert("class", RawValue::from(class));
            raw.insert("type_of_travel", RawValue::from(travel));

            let vector = encoder.align(&raw, &schema).unwrap();
            assert_eq!(vector.len(), schema.len());
            assert_eq!(vector.columns(), schema.columns());

            let class_hot: f64 = ["class_Business", "class_Eco", "class_Eco Plus"]
                .iter()
                .filter_map(|c| vector.get(c))
                .sum();
            let expected = if ["Business", "Eco", "Eco Plus"].contains(&class) { 1.0 } else { 0.0 };
            assert_eq!(class_hot, expected, "class {class:?}");
        }
    }
}

#[test]
fn test_numeric_values_pass_through() {
    let dir = tempfile::tempdir().unwrap();
    let reference = load_reference(dir.path(), 50);
    let encoder = FeatureEncoder::new(&reference, &encoded_columns()).unwrap();

    let mut raw = reference_record(0);
    raw.insert("flight_distance", RawValue::Number(12345.0));
    raw.insert("age", RawValue::Number(99.0));

    let vector = encoder.align(&raw, &schema()).unwrap();
    assert_eq!(vector.get("flight_distance"), Some(12345.0));
    assert_eq!(vector.get("age"), Some(99.0));
}

#[test]
fn test_missing_column_is_schema_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    let reference = load_reference(dir.path(), 50);
    let encoder = FeatureEncoder::new(&reference, &encoded_columns()).unwrap();

    let mut raw = reference_record(1);
    raw.remove("online_boarding");

    match encoder.align(&raw, &schema()) {
        Err(SurveyError::SchemaMismatch { missing, .. }) => {
            assert_eq!(missing, vec!["online_boarding".to_string()]);
        }
        other => panic!("expected SchemaMismatch, got {other:?}"),
    }
}

#[test]
fn test_missing_unused_column_is_still_a_mismatch() {
    // seat_comfort is not a model feature, but the record must still be complete
    let dir = tempfile::tempdir().unwrap();
    let reference = load_reference(dir.path(), 50);
    let encoder = FeatureEncoder::new(&reference, &encoded_columns()).unwrap();

    let mut raw = reference_record(1);
    raw.remove("seat_comfort");
    let err = encoder.align(&raw, &schema()).unwrap_err();
    assert!(err.is_submission_error());
    assert!(err.to_string().contains("seat_comfort"));
}
