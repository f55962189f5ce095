use airline_satisfaction::{AgeBins, DemographicSummary, SurveyResponse, compare_age_group, compare_categorical};

use crate::utils::{REFERENCE_ROWS, load_reference, reference_value};

#[test]
fn test_business_class_share() {
    let dir = tempfile::tempdir().unwrap();
    let reference = load_reference(dir.path(), REFERENCE_ROWS);

    let share = compare_categorical("class", "Business", &reference).unwrap();
    assert!((share - 30.0).abs() < 1e-9);
    assert!((compare_categorical("class", "Eco Plus", &reference).unwrap() - 10.0).abs() < 1e-9);
    assert_eq!(compare_categorical("class", "First", &reference).unwrap(), 0.0);
}

#[test]
fn test_age_group_of_minor() {
    let dir = tempfile::tempdir().unwrap();
    let reference = load_reference(dir.path(), REFERENCE_ROWS);

    let expected = (0..REFERENCE_ROWS)
        .filter_map(|i| reference_value("age", i).as_f64())
        .filter(|age| *age > 0.0 && *age <= 18.0)
        .count() as f64
        / REFERENCE_ROWS as f64
        * 100.0;

    let comparison = compare_age_group(17.0, &reference, &AgeBins::default()).unwrap();
    assert_eq!(comparison.label, "<18");
    assert!((comparison.percentage - expected).abs() < 1e-9);
    assert!(comparison.percentage > 0.0);
}

#[test]
fn test_shares_of_all_groups_sum_to_100() {
    let dir = tempfile::tempdir().unwrap();
    let reference = load_reference(dir.path(), 350);
    let bins = AgeBins::default();

    // One representative age per group
    let total: f64 = [10.0, 25.0, 35.0, 45.0, 55.0, 65.0, 75.0]
        .iter()
        .map(|age| compare_age_group(*age, &reference, &bins).unwrap().percentage)
        .sum();
    assert!((total - 100.0).abs() < 1e-9);
}

#[test]
fn test_summary_matches_individual_comparisons() {
    let dir = tempfile::tempdir().unwrap();
    let reference = load_reference(dir.path(), REFERENCE_ROWS);
    let response = SurveyResponse::default();

    let summary = DemographicSummary::for_response(&response, &reference, &AgeBins::default()).unwrap();
    assert_eq!(
        summary.customer_type.percentage,
        compare_categorical("customer_type", "Loyal Customer", &reference).unwrap()
    );
    assert_eq!(
        summary.type_of_travel.percentage,
        compare_categorical("type_of_travel", "Business travel", &reference).unwrap()
    );
    assert_eq!(summary.age_group.label, "18–30");
}
