//! Airline passenger satisfaction prediction from survey answers.
//!
//! A survey response is one-hot encoded against a historical reference
//! population, aligned to the columns a trained classifier expects and
//! classified. The response is also compared with the reference population
//! (customer type, travel type, flight class and age group).

pub mod algorithm;
pub mod config;
pub mod context;
pub mod error;
pub mod model;
pub mod reader;
pub mod record;
pub mod reference;
pub mod report;
pub mod schema;
pub mod survey;
pub mod utils;

// Core types
pub use config::PredictorConfig;
pub use context::SurveyContext;
pub use error::{Result, SurveyError};
pub use record::{RawRecord, RawValue, SurveyFields};
pub use reference::ReferenceTable;
pub use report::SubmissionReport;
pub use schema::{EncodedSchema, SchemaCompatibilityReport, SchemaIssue};
pub use survey::{CustomerType, FlightClass, Rating, SurveyResponse, TypeOfTravel};

// Pipeline stages
pub use algorithm::alignment::{AlignedVector, FeatureEncoder, align};
pub use algorithm::demographics::{AgeBins, DemographicSummary, compare_age_group, compare_categorical};
pub use algorithm::prediction::{PredictionResult, predict};
pub use model::{Classifier, ModelArtifact, load_model};
