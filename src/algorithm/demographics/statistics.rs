//! Percentages of the reference population sharing an answer

use std::fmt;

use serde::Serialize;

use crate::algorithm::demographics::AgeBins;
use crate::error::{Result, SurveyError};
use crate::reference::{ReferenceColumn, ReferenceTable};
use crate::survey::SurveyResponse;

/// Share of reference rows whose `field` equals `value`, in percent
///
/// Rows where the field is missing are left out of the denominator. A value
/// that never occurs gives 0.
///
/// # Errors
/// `ColumnNotFound` for an unknown field, `ColumnType` for a numeric one.
pub fn compare_categorical(field: &str, value: &str, reference: &ReferenceTable) -> Result<f64> {
    let values = match reference.column(field) {
        Some(ReferenceColumn::Categorical(values)) => values,
        Some(ReferenceColumn::Numeric(_)) => {
            return Err(SurveyError::ColumnType {
                column: field.to_string(),
                expected: "categorical".to_string(),
            });
        }
        None => return Err(SurveyError::ColumnNotFound(field.to_string())),
    };

    let (matching, total) = values
        .iter()
        .flatten()
        .fold((0usize, 0usize), |(matching, total), v| {
            (matching + usize::from(v == value), total + 1)
        });

    if total == 0 {
        return Ok(0.0);
    }
    Ok(matching as f64 / total as f64 * 100.0)
}

/// The passenger's age group and its share of the reference population
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeGroupComparison {
    /// The passenger's age
    pub age: f64,
    /// Label of the age group containing `age`
    pub label: String,
    /// Share of all reference rows in that group, in percent
    pub percentage: f64,
}

/// Locate the passenger's age group and its share of all reference rows
///
/// Reference rows with a missing or out-of-range age count towards the
/// denominator but never match.
///
/// # Errors
/// `InvalidAnswer` if `age` falls outside every group, plus the lookup
/// errors of a missing or non-numeric `age` column.
pub fn compare_age_group(
    age: f64,
    reference: &ReferenceTable,
    bins: &AgeBins,
) -> Result<AgeGroupComparison> {
    let Some(group) = bins.bin_index(age) else {
        return Err(SurveyError::InvalidAnswer {
            field: "age".to_string(),
            reason: format!("{age} is outside every age group ({bins})"),
        });
    };

    let ages = match reference.column("age") {
        Some(ReferenceColumn::Numeric(values)) => values,
        Some(ReferenceColumn::Categorical(_)) => {
            return Err(SurveyError::ColumnType {
                column: "age".to_string(),
                expected: "numeric".to_string(),
            });
        }
        None => return Err(SurveyError::ColumnNotFound("age".to_string())),
    };

    let matching = ages
        .iter()
        .flatten()
        .filter(|a| bins.bin_index(**a) == Some(group))
        .count();
    let percentage = if ages.is_empty() {
        0.0
    } else {
        matching as f64 / ages.len() as f64 * 100.0
    };

    Ok(AgeGroupComparison {
        age,
        label: bins.labels()[group].clone(),
        percentage,
    })
}

/// One categorical selection and how common it is
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryComparison {
    pub field: String,
    pub value: String,
    pub percentage: f64,
}

impl CategoryComparison {
    fn compute(field: &str, value: &str, reference: &ReferenceTable) -> Result<Self> {
        Ok(Self {
            field: field.to_string(),
            value: value.to_string(),
            percentage: compare_categorical(field, value, reference)?,
        })
    }
}

/// The comparisons shown for each submission
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemographicSummary {
    pub customer_type: CategoryComparison,
    pub type_of_travel: CategoryComparison,
    pub flight_class: CategoryComparison,
    pub age_group: AgeGroupComparison,
}

impl DemographicSummary {
    /// Compare a survey response with the reference population
    pub fn for_response(
        response: &SurveyResponse,
        reference: &ReferenceTable,
        bins: &AgeBins,
    ) -> Result<Self> {
        Ok(Self {
            customer_type: CategoryComparison::compute(
                "customer_type",
                response.customer_type.as_str(),
                reference,
            )?,
            type_of_travel: CategoryComparison::compute(
                "type_of_travel",
                response.type_of_travel.as_str(),
                reference,
            )?,
            flight_class: CategoryComparison::compute(
                "class",
                response.flight_class.as_str(),
                reference,
            )?,
            age_group: compare_age_group(f64::from(response.age), reference, bins)?,
        })
    }
}

impl fmt::Display for DemographicSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Customer Demographic Analysis:")?;
        for (title, comparison) in [
            ("Customer Type", &self.customer_type),
            ("Type of Travel", &self.type_of_travel),
            ("Flight Class", &self.flight_class),
        ] {
            writeln!(f, "  {title}: your selection '{}'", comparison.value)?;
            writeln!(
                f,
                "    Percentage of fliers with this selection: {:.2}%",
                comparison.percentage
            )?;
        }
        writeln!(
            f,
            "  Age Group: your age {} falls in '{}'",
            self.age_group.age, self.age_group.label
        )?;
        write!(
            f,
            "    Percentage of our fliers in this age group: {:.2}%",
            self.age_group.percentage
        )
    }
}
