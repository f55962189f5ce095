use airline_satisfaction::{
    FlightClass, PredictorConfig, Rating, SurveyContext, SurveyError, SurveyResponse, TypeOfTravel,
};

use crate::utils::{REFERENCE_ROWS, test_config, tree_artifact, write_model, write_reference_csv};

fn context() -> (tempfile::TempDir, SurveyContext) {
    let dir = tempfile::tempdir().unwrap();
    let model_path = write_model(dir.path(), "decision_tree_airline.json", &tree_artifact());
    let reference_path = write_reference_csv(dir.path(), REFERENCE_ROWS);
    let context = SurveyContext::load(test_config(model_path, reference_path)).unwrap();
    (dir, context)
}

#[test]
fn test_process_submission() {
    let (_dir, context) = context();
    assert_eq!(context.reference().num_rows(), REFERENCE_ROWS);

    let response = SurveyResponse {
        online_boarding: Rating::new(5).unwrap(),
        flight_class: FlightClass::Eco,
        type_of_travel: TypeOfTravel::Personal,
        age: 42,
        ..SurveyResponse::default()
    };
    let report = context.process(&response).unwrap();

    assert_eq!(report.prediction.label, "satisfied");
    assert_eq!(report.prediction.confidence, Some(90.0));
    assert_eq!(report.demographics.flight_class.value, "Eco");
    assert!((report.demographics.flight_class.percentage - 60.0).abs() < 1e-9);
    assert_eq!(report.demographics.age_group.label, "41–50");

    let text = report.to_string();
    assert!(text.contains("Your predicted satisfaction level is satisfied."));
    assert!(text.contains("With a confidence of 90.00%."));
}

#[test]
fn test_process_from_json() {
    let (_dir, context) = context();
    let mut value = serde_json::to_value(SurveyResponse::default()).unwrap();
    value["online_boarding"] = 2.into();
    value["class"] = "Eco Plus".into();

    let response = SurveyResponse::from_json(&value.to_string()).unwrap();
    let report = context.process(&response).unwrap();
    assert_eq!(report.prediction.label, "neutral or dissatisfied");
    assert_eq!(report.prediction.confidence, Some(87.5));
}

#[test]
fn test_invalid_answer_is_rejected_before_prediction() {
    let (_dir, context) = context();
    let response = SurveyResponse {
        flight_distance: 0,
        ..SurveyResponse::default()
    };
    let err = context.process(&response).unwrap_err();
    assert!(matches!(err, SurveyError::InvalidAnswer { ref field, .. } if field == "flight_distance"));
    assert!(err.is_submission_error());
}

#[test]
fn test_context_is_reusable() {
    let (_dir, context) = context();
    let first = context.process(&SurveyResponse::default()).unwrap();
    let second = context.process(&SurveyResponse::default()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_missing_artifacts_fail_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let config = PredictorConfig {
        model_path: dir.path().join("missing.json"),
        reference_path: dir.path().join("missing.csv"),
        show_progress: false,
        ..PredictorConfig::default()
    };
    assert!(matches!(
        SurveyContext::load(config),
        Err(SurveyError::Io { .. })
    ));
}
