//! The airline satisfaction survey form.
//!
//! `SurveyResponse` is what a passenger submits. It is validated, then
//! converted into a [`RawRecord`] keyed by the reference table's column
//! names.

use std::fmt;

use macros::SurveyRecord;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SurveyError};
use crate::record::{RawRecord, RawValue, SurveyFields};

/// Lowest and highest accepted star rating
pub const RATING_RANGE: (u8, u8) = (1, 5);

macro_rules! survey_choice {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$variant_meta:meta])* $variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            /// The value as it appears in the reference data
            #[must_use]
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<&$name> for RawValue {
            fn from(value: &$name) -> Self {
                RawValue::Text(value.as_str().to_string())
            }
        }
    };
}

survey_choice! {
    /// Loyalty status
    CustomerType {
        #[default]
        Loyal => "Loyal Customer",
        Disloyal => "disloyal Customer",
    }
}

survey_choice! {
    /// Purpose of the flight
    TypeOfTravel {
        #[default]
        Business => "Business travel",
        Personal => "Personal Travel",
    }
}

survey_choice! {
    /// Cabin class
    FlightClass {
        #[default]
        Business => "Business",
        Eco => "Eco",
        EcoPlus => "Eco Plus",
    }
}

/// A 1-5 star rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Create a rating, rejecting values outside 1-5
    pub fn new(stars: u8) -> Result<Self> {
        let (low, high) = RATING_RANGE;
        if !(low..=high).contains(&stars) {
            return Err(SurveyError::InvalidAnswer {
                field: "rating".to_string(),
                reason: format!("{stars} is not between {low} and {high} stars"),
            });
        }
        Ok(Self(stars))
    }

    #[must_use]
    pub fn stars(self) -> u8 {
        self.0
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self(RATING_RANGE.0)
    }
}

impl TryFrom<u8> for Rating {
    type Error = SurveyError;

    fn try_from(stars: u8) -> Result<Self> {
        Self::new(stars)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl From<&Rating> for RawValue {
    fn from(rating: &Rating) -> Self {
        RawValue::Number(f64::from(rating.0))
    }
}

/// One passenger's survey answers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SurveyRecord)]
pub struct SurveyResponse {
    pub customer_type: CustomerType,
    pub age: u32,
    pub type_of_travel: TypeOfTravel,
    #[serde(rename = "class")]
    #[survey(column = "class")]
    pub flight_class: FlightClass,
    pub flight_distance: u32,
    pub seat_comfort: Rating,
    pub departure_arrival_time_convenient: Rating,
    pub food_and_drink: Rating,
    pub gate_location: Rating,
    pub inflight_wifi_service: Rating,
    pub inflight_entertainment: Rating,
    pub online_support: Rating,
    pub ease_of_online_booking: Rating,
    #[serde(rename = "on-board_service")]
    #[survey(column = "on-board_service")]
    pub on_board_service: Rating,
    pub leg_room_service: Rating,
    pub baggage_handling: Rating,
    pub checkin_service: Rating,
    pub cleanliness: Rating,
    pub online_boarding: Rating,
    pub departure_delay_in_minutes: u32,
    pub arrival_delay_in_minutes: u32,
}

impl Default for SurveyResponse {
    fn default() -> Self {
        Self {
            customer_type: CustomerType::default(),
            age: 25,
            type_of_travel: TypeOfTravel::default(),
            flight_class: FlightClass::default(),
            flight_distance: 500,
            seat_comfort: Rating::default(),
            departure_arrival_time_convenient: Rating::default(),
            food_and_drink: Rating::default(),
            gate_location: Rating::default(),
            inflight_wifi_service: Rating::default(),
            inflight_entertainment: Rating::default(),
            online_support: Rating::default(),
            ease_of_online_booking: Rating::default(),
            on_board_service: Rating::default(),
            leg_room_service: Rating::default(),
            baggage_handling: Rating::default(),
            checkin_service: Rating::default(),
            cleanliness: Rating::default(),
            online_boarding: Rating::default(),
            departure_delay_in_minutes: 0,
            arrival_delay_in_minutes: 0,
        }
    }
}

fn check_range(field: &str, value: u32, low: u32, high: u32) -> Result<()> {
    if (low..=high).contains(&value) {
        Ok(())
    } else {
        Err(SurveyError::InvalidAnswer {
            field: field.to_string(),
            reason: format!("{value} is not between {low} and {high}"),
        })
    }
}

impl SurveyResponse {
    /// Check the numeric answers against the form's limits
    pub fn validate(&self) -> Result<()> {
        check_range("age", self.age, 1, 100)?;
        check_range("flight_distance", self.flight_distance, 1, 20_000)?;
        check_range("departure_delay_in_minutes", self.departure_delay_in_minutes, 0, 500)?;
        check_range("arrival_delay_in_minutes", self.arrival_delay_in_minutes, 0, 500)?;
        Ok(())
    }

    /// Parse one response from JSON
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Validate and convert to a raw record
    pub fn to_validated_record(&self) -> Result<RawRecord> {
        self.validate()?;
        Ok(self.to_raw_record())
    }
}
