use serde::{Deserialize, Serialize};

/// Location category returned by the provider's reference-data endpoint.
/// Closed enumeration instead of a free-text subtype string.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationCategory {
    Airport,
    City,
}

impl LocationCategory {
    /// Value accepted by the upstream `subType` query parameter.
    pub fn as_sub_type(&self) -> &'static str {
        match self {
            LocationCategory::Airport => "AIRPORT",
            LocationCategory::City => "CITY",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "AIRPORT" => Some(LocationCategory::Airport),
            "CITY" => Some(LocationCategory::City),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    pub city_name: Option<String>,
    #[serde(default)]
    pub country_name: Option<String>,
}

/// One location candidate from an autocomplete lookup. Immutable once
/// returned; lives for the duration of one lookup response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: String,
    pub name: String,
    pub iata_code: String,
    pub sub_type: LocationCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

impl Place {
    /// Text shown in the input once this place is selected, e.g.
    /// "Indira Gandhi Intl (DEL)". Distinct from the logical field value,
    /// which is the bare IATA code.
    pub fn display(&self) -> String {
        format!("{} ({})", self.name, self.iata_code)
    }
}

/// Which search-form field an autocomplete instance is bound to. The storage
/// key for the recent-selections slot derives from this role, not from a
/// display label.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldRole {
    Origin,
    Destination,
}

impl FieldRole {
    pub fn storage_key(&self) -> &'static str {
        match self {
            FieldRole::Origin => "recent_origin",
            FieldRole::Destination => "recent_destination",
        }
    }
}
