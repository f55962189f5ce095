//! Tests for the SurveyRecord derive macro
//!
//! The generated code refers to `crate::record`, so it is only compiled
//! inside the main crate; here we check the expansion itself.

use syn::parse_quote;

use crate::survey_record::expand_survey_record;

#[test]
fn test_columns_follow_field_order_and_overrides() {
    let input: syn::DeriveInput = parse_quote! {
        struct Answers {
            customer_type: String,
            #[survey(column = "class")]
            flight_class: String,
            #[survey(column = "on-board_service")]
            onboard_service: u8,
        }
    };

    let expanded = expand_survey_record(&input).unwrap().to_string();

    let customer = expanded.find("\"customer_type\"").unwrap();
    let class = expanded.find("\"class\"").unwrap();
    let onboard = expanded.find("\"on-board_service\"").unwrap();
    assert!(customer < class && class < onboard);
    assert!(expanded.contains("SurveyFields for Answers"));
    assert!(!expanded.contains("\"flight_class\""));
}

#[test]
fn test_skipped_fields_are_not_columns() {
    let input: syn::DeriveInput = parse_quote! {
        struct Answers {
            age: u32,
            #[survey(skip)]
            note: String,
        }
    };

    let expanded = expand_survey_record(&input).unwrap().to_string();
    assert!(expanded.contains("\"age\""));
    assert!(!expanded.contains("\"note\""));
}

#[test]
fn test_duplicate_columns_are_rejected() {
    let input: syn::DeriveInput = parse_quote! {
        struct Answers {
            class: String,
            #[survey(column = "class")]
            flight_class: String,
        }
    };

    assert!(expand_survey_record(&input).is_err());
}

#[test]
fn test_tuple_structs_are_rejected() {
    let input: syn::DeriveInput = parse_quote! {
        struct Answers(String, u32);
    };

    assert!(expand_survey_record(&input).is_err());
}
