//! Survey column definitions
//!
//! Single source of truth for the raw survey columns the reference table
//! and every submission must carry.

use std::fmt;

use arrow::datatypes::DataType;

/// Semantic kind of a raw survey column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Nominal text value, one-hot encoded before prediction
    Categorical,
    /// Numeric value passed through unchanged
    Numeric,
    /// Ordinal 1-5 star rating, passed through unchanged
    Rating,
}

impl ColumnKind {
    /// Arrow type the column is normalised to when loading reference data
    #[must_use]
    pub fn arrow_type(&self) -> DataType {
        match self {
            Self::Categorical => DataType::Utf8,
            Self::Numeric | Self::Rating => DataType::Float64,
        }
    }

    /// Whether values of this kind are numbers
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        !matches!(self, Self::Categorical)
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Categorical => write!(f, "Categorical"),
            Self::Numeric => write!(f, "Numeric"),
            Self::Rating => write!(f, "Rating"),
        }
    }
}

/// Definition of a raw survey column
#[derive(Debug, Clone, Copy)]
pub struct SurveyColumn {
    /// Column name in the reference file
    pub name: &'static str,
    /// Semantic kind
    pub kind: ColumnKind,
    /// Question the column answers
    pub description: &'static str,
}

const fn column(name: &'static str, kind: ColumnKind, description: &'static str) -> SurveyColumn {
    SurveyColumn {
        name,
        kind,
        description,
    }
}

/// Raw survey columns in the order of the training table
pub const SURVEY_COLUMNS: &[SurveyColumn] = &[
    column("customer_type", ColumnKind::Categorical, "What type of customer is this?"),
    column("age", ColumnKind::Numeric, "How old is the customer?"),
    column(
        "type_of_travel",
        ColumnKind::Categorical,
        "Is the customer travelling for business or personal reasons?",
    ),
    column("class", ColumnKind::Categorical, "In which class is the customer flying?"),
    column(
        "flight_distance",
        ColumnKind::Numeric,
        "How far is the customer flying in miles?",
    ),
    column("seat_comfort", ColumnKind::Rating, "How comfortable was the seat?"),
    column(
        "departure_arrival_time_convenient",
        ColumnKind::Rating,
        "Was the departure/arrival time convenient for the customer?",
    ),
    column("food_and_drink", ColumnKind::Rating, "How would the customer rate the food and drink?"),
    column("gate_location", ColumnKind::Rating, "How would the customer rate the gate location?"),
    column(
        "inflight_wifi_service",
        ColumnKind::Rating,
        "How would the customer rate the inflight wifi service?",
    ),
    column(
        "inflight_entertainment",
        ColumnKind::Rating,
        "How would the customer rate the inflight entertainment?",
    ),
    column("online_support", ColumnKind::Rating, "How would the customer rate online support?"),
    column(
        "ease_of_online_booking",
        ColumnKind::Rating,
        "How easy was online booking for the customer?",
    ),
    column(
        "on-board_service",
        ColumnKind::Rating,
        "How would the customer rate the onboard service?",
    ),
    column(
        "leg_room_service",
        ColumnKind::Rating,
        "How would the customer rate the leg room service?",
    ),
    column("baggage_handling", ColumnKind::Rating, "How would the customer rate baggage handling?"),
    column("checkin_service", ColumnKind::Rating, "How would the customer rate the check-in service?"),
    column("cleanliness", ColumnKind::Rating, "How would the customer rate cleanliness?"),
    column("online_boarding", ColumnKind::Rating, "How would the customer rate online boarding?"),
    column(
        "departure_delay_in_minutes",
        ColumnKind::Numeric,
        "How many minutes was the departure delayed?",
    ),
    column(
        "arrival_delay_in_minutes",
        ColumnKind::Numeric,
        "How many minutes was the flight delayed upon arrival?",
    ),
];

/// Nominal columns one-hot encoded at training time
pub const DEFAULT_ENCODED_COLUMNS: &[&str] = &["customer_type", "type_of_travel", "class"];

/// Separator between field name and category in dummy column names
pub const DUMMY_SEPARATOR: &str = "_";

/// Look up a survey column definition by name
#[must_use]
pub fn survey_column(name: &str) -> Option<&'static SurveyColumn> {
    SURVEY_COLUMNS.iter().find(|c| c.name == name)
}

/// Dummy column name for a categorical value, `{field}_{value}`
#[must_use]
pub fn dummy_column_name(field: &str, value: &str) -> String {
    format!("{field}{DUMMY_SEPARATOR}{value}")
}
