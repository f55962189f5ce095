//! SurveyRecord derive macro implementation
//!
//! Maps the named fields of a form struct onto raw survey columns.

use darling::{ast, FromDeriveInput, FromField};
use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

/// Receiver for the struct that derives SurveyRecord
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(survey), supports(struct_named))]
pub struct SurveyRecordReceiver {
    /// The struct identifier
    ident: syn::Ident,
    /// Generics of the struct
    generics: syn::Generics,
    /// The struct data with parsed fields
    data: ast::Data<(), SurveyFieldReceiver>,
}

/// Receiver for the fields in the struct
#[derive(Debug, FromField)]
#[darling(attributes(survey))]
pub struct SurveyFieldReceiver {
    /// The field identifier
    ident: Option<syn::Ident>,
    /// Column name override
    #[darling(default)]
    column: Option<String>,
    /// Leave the field out of the raw record
    #[darling(default)]
    skip: bool,
}

impl SurveyFieldReceiver {
    /// Raw column name for this field: the override, or the field name
    pub fn column_name(&self) -> Option<String> {
        let ident = self.ident.as_ref()?;
        Some(self.column.clone().unwrap_or_else(|| ident.to_string()))
    }
}

/// Expand the derive for a parsed struct
pub fn expand_survey_record(input: &DeriveInput) -> darling::Result<TokenStream> {
    let receiver = SurveyRecordReceiver::from_derive_input(input)?;

    let ast::Data::Struct(fields) = &receiver.data else {
        unreachable!("Darling ensures this is a struct")
    };

    let mapped: Vec<(&syn::Ident, String)> = fields
        .iter()
        .filter(|field| !field.skip)
        .filter_map(|field| Some((field.ident.as_ref()?, field.column_name()?)))
        .collect();

    let mut seen = std::collections::HashSet::new();
    for (ident, column) in &mapped {
        if !seen.insert(column.as_str()) {
            return Err(darling::Error::custom(format!("duplicate survey column `{column}`"))
                .with_span(*ident));
        }
    }

    Ok(generate_survey_fields_impl(&receiver, &mapped))
}

/// Generate the `SurveyFields` implementation
fn generate_survey_fields_impl(
    receiver: &SurveyRecordReceiver,
    mapped: &[(&syn::Ident, String)],
) -> TokenStream {
    let struct_name = &receiver.ident;
    let (impl_generics, ty_generics, where_clause) = receiver.generics.split_for_impl();

    let columns = mapped.iter().map(|(_, column)| column);
    let inserts = mapped.iter().map(|(ident, column)| {
        quote! {
            record.insert(#column, crate::record::RawValue::from(&self.#ident));
        }
    });

    quote! {
        impl #impl_generics crate::record::SurveyFields for #struct_name #ty_generics #where_clause {
            const COLUMNS: &'static [&'static str] = &[#(#columns),*];

            fn to_raw_record(&self) -> crate::record::RawRecord {
                let mut record = crate::record::RawRecord::new();
                #(#inserts)*
                record
            }
        }
    }
}
