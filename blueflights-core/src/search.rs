use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{CoreError, CoreResult};

/// Cabin class accepted by the upstream offer search.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelClass {
    Economy,
    PremiumEconomy,
    Business,
    First,
}

impl TravelClass {
    /// Wire value used in upstream query parameters.
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelClass::Economy => "ECONOMY",
            TravelClass::PremiumEconomy => "PREMIUM_ECONOMY",
            TravelClass::Business => "BUSINESS",
            TravelClass::First => "FIRST",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ECONOMY" => Some(TravelClass::Economy),
            "PREMIUM_ECONOMY" => Some(TravelClass::PremiumEconomy),
            "BUSINESS" => Some(TravelClass::Business),
            "FIRST" => Some(TravelClass::First),
            _ => None,
        }
    }
}

fn default_adults() -> u32 {
    1
}

fn default_currency() -> String {
    "INR".to_string()
}

fn default_max() -> u32 {
    20
}

/// One flight search as submitted by the form. Consumed once by the offer
/// search and then persisted verbatim as a history record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    pub origin_location_code: String,
    pub destination_location_code: String,
    pub departure_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_date: Option<NaiveDate>,
    #[serde(default = "default_adults")]
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    #[serde(default)]
    pub infants: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_class: Option<TravelClass>,
    #[serde(default = "default_currency")]
    pub currency_code: String,
    #[serde(default = "default_max")]
    pub max: u32,
}

/// Exactly three uppercase ASCII letters.
pub fn is_valid_iata_code(code: &str) -> bool {
    code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase())
}

impl SearchCriteria {
    /// Local validation, applied before any network round-trip.
    pub fn validate(&self) -> CoreResult<()> {
        if !is_valid_iata_code(&self.origin_location_code)
            || !is_valid_iata_code(&self.destination_location_code)
        {
            return Err(CoreError::Validation(
                "Invalid airport codes. They must be 3-letter IATA codes (e.g., DEL, BOM)."
                    .to_string(),
            ));
        }
        if let Some(return_date) = self.return_date {
            if return_date <= self.departure_date {
                return Err(CoreError::Validation(
                    "Return date must be after the departure date.".to_string(),
                ));
            }
        }
        if self.adults == 0 {
            return Err(CoreError::Validation(
                "At least one adult traveler is required.".to_string(),
            ));
        }
        Ok(())
    }
}

/// A persisted copy of one search. Append-only; read back newest-first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRecord {
    pub id: Uuid,
    #[serde(flatten)]
    pub criteria: SearchCriteria,
    pub timestamp: DateTime<Utc>,
}
