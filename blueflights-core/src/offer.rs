use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Flight offer models (provider wire shape, camelCase)
// ============================================================================
//
// Every struct keeps a flattened passthrough map so an offer deserialized from
// the provider re-serializes byte-equivalent modulo field order. Price
// verification re-submits a previously returned offer verbatim, so fields this
// service never looks at must survive the round trip.

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FlightOffer {
    pub id: String,
    pub itineraries: Vec<Itinerary>,
    pub price: OfferPrice,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_bookable_seats: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub traveler_pricings: Vec<TravelerPricing>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl FlightOffer {
    /// Numeric total price. Malformed totals degrade to 0.0 rather than
    /// failing a render.
    pub fn total_price(&self) -> f64 {
        self.price.total.parse().unwrap_or(0.0)
    }
}

/// One directional trip (outbound or return) within an offer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    pub duration: String,
    pub segments: Vec<Segment>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Itinerary {
    /// Stops within this itinerary: one fewer than its segment count.
    pub fn stop_count(&self) -> u32 {
        self.segments.len().saturating_sub(1) as u32
    }
}

/// One non-stop flight leg.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub departure: FlightEndpoint,
    pub arrival: FlightEndpoint,
    pub carrier_code: String,
    pub number: String,
    pub aircraft: Aircraft,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default)]
    pub number_of_stops: u32,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FlightEndpoint {
    pub iata_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal: Option<String>,
    /// Local timestamp at the airport, no offset on the wire.
    pub at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Aircraft {
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OfferPrice {
    pub currency: String,
    /// Decimal string as sent by the provider, e.g. "5432.10".
    pub total: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grand_total: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Per-traveler fare breakdown. Displayed only, so the detail stays opaque.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TravelerPricing {
    pub traveler_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traveler_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fare_option: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

// ============================================================================
// Dictionaries
// ============================================================================

/// Display-name lookup tables supplied alongside an offer list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Dictionaries {
    #[serde(default)]
    pub carriers: HashMap<String, String>,
    #[serde(default)]
    pub aircraft: HashMap<String, String>,
}

impl Dictionaries {
    pub fn carrier_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.carriers.get(code).map(String::as_str).unwrap_or(code)
    }

    pub fn aircraft_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.aircraft.get(code).map(String::as_str).unwrap_or(code)
    }
}

/// Result of one upstream offer search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferSearchResponse {
    #[serde(default)]
    pub data: Vec<FlightOffer>,
    #[serde(default)]
    pub dictionaries: Dictionaries,
}
