use airline_satisfaction::{AlignedVector, RawValue, SurveyContext, load_model, predict};

use crate::utils::{
    MODEL_FEATURES, REFERENCE_ROWS, reference_record, svc_artifact, test_config, training_encoding,
    tree_artifact, write_model, write_reference_csv,
};

fn context(artifact: &serde_json::Value) -> (tempfile::TempDir, SurveyContext) {
    let dir = tempfile::tempdir().unwrap();
    let model_path = write_model(dir.path(), "model.json", artifact);
    let reference_path = write_reference_csv(dir.path(), REFERENCE_ROWS);
    let context = SurveyContext::load(test_config(model_path, reference_path)).unwrap();
    (dir, context)
}

#[test]
fn test_reference_rows_round_trip() {
    let (_dir, context) = context(&tree_artifact());
    let features: Vec<String> = MODEL_FEATURES.iter().map(|f| (*f).to_string()).collect();

    for i in (0..REFERENCE_ROWS).step_by(37) {
        let record = reference_record(i);
        let through_pipeline = context.predict_raw(&record).unwrap();

        let training = AlignedVector::from_parts(features.clone(), training_encoding(&record));
        let direct = predict(&training, context.model()).unwrap();

        assert_eq!(through_pipeline, direct, "row {i}");
    }
}

#[test]
fn test_tree_confidence() {
    let (_dir, context) = context(&tree_artifact());

    // Business class, online_boarding 1: tied leaf, first class wins
    let mut record = reference_record(0);
    record.insert("online_boarding", RawValue::Number(1.0));
    record.insert("class", RawValue::from("Business"));
    let result = context.predict_raw(&record).unwrap();
    assert_eq!(result.label, "neutral or dissatisfied");
    assert_eq!(result.confidence, Some(50.0));

    record.insert("online_boarding", RawValue::Number(5.0));
    let result = context.predict_raw(&record).unwrap();
    assert_eq!(result.label, "satisfied");
    assert_eq!(result.confidence_display().as_deref(), Some("90.00%"));
}

#[test]
fn test_svc_has_no_confidence() {
    let (_dir, context) = context(&svc_artifact());

    let mut record = reference_record(3);
    record.insert("online_boarding", RawValue::Number(5.0));
    let result = context.predict_raw(&record).unwrap();
    assert_eq!(result.label, "satisfied");
    assert_eq!(result.confidence, None);

    record.insert("online_boarding", RawValue::Number(2.0));
    assert_eq!(context.predict_raw(&record).unwrap().label, "neutral or dissatisfied");
}

#[test]
fn test_malformed_artifacts() {
    let dir = tempfile::tempdir().unwrap();

    let mut artifact = tree_artifact();
    artifact["nodes"][1]["right"] = 99.into();
    let path = write_model(dir.path(), "bad_tree.json", &artifact);
    assert!(matches!(
        load_model(&path),
        Err(airline_satisfaction::SurveyError::ModelArtifact(_))
    ));

    let mut artifact = svc_artifact();
    artifact["feature_names_in"][1] = "age".into();
    let path = write_model(dir.path(), "duplicate_features.json", &artifact);
    assert!(load_model(&path).is_err());

    let path = write_model(dir.path(), "not_a_model.json", &serde_json::json!({"kind": "tree"}));
    assert!(matches!(
        load_model(&path),
        Err(airline_satisfaction::SurveyError::Json(_))
    ));
}
