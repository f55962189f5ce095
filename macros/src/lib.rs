//! Procedural macros for the airline-satisfaction crate
//!
//! This crate provides the `SurveyRecord` derive, which generates the
//! column list and the raw-record conversion for a typed survey form.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod survey_record;

// Tests
#[cfg(test)]
mod tests;

/// Derive macro for survey form structs
///
/// Generates an implementation of `crate::record::SurveyFields`: the ordered
/// list of raw column names and a conversion into a `RawRecord`. Every field
/// type must implement `From<&T>` for `RawValue`.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(SurveyRecord)]
/// struct Answers {
///     customer_type: CustomerType,
///     age: u32,
///
///     #[survey(column = "class")]
///     flight_class: FlightClass,
///
///     #[survey(skip)]
///     note: String,
/// }
/// ```
#[proc_macro_derive(SurveyRecord, attributes(survey))]
pub fn derive_survey_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match survey_record::expand_survey_record(&input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(err) => err.write_errors().into(),
    }
}
