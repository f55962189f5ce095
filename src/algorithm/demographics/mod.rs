//! Demographic comparison against the reference population
//!
//! Shows how common a passenger's answers are among historical fliers:
//! the share of fliers with the same categorical selection and the share
//! in the same age group.

pub mod config;
pub mod statistics;

pub use config::{AgeBins, DEFAULT_AGE_EDGES, DEFAULT_AGE_LABELS};
pub use statistics::{
    AgeGroupComparison, CategoryComparison, DemographicSummary, compare_age_group,
    compare_categorical,
};
