//! The submission pipeline
//!
//! Alignment turns raw answers into the model's feature vector, prediction
//! runs the classifier on it, and the demographic comparison places the
//! passenger within the reference population.

pub mod alignment;
pub mod demographics;
pub mod prediction;
