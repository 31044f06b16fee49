use async_trait::async_trait;

use crate::offer::{FlightOffer, OfferSearchResponse};
use crate::place::{FieldRole, LocationCategory, Place};
use crate::search::{SearchCriteria, SearchRecord};
use crate::UpstreamError;

/// Keyword lookup against the provider's location reference data.
/// `category = None` searches airports and cities together.
#[async_trait]
pub trait LocationLookup: Send + Sync {
    async fn search_locations(
        &self,
        keyword: &str,
        category: Option<LocationCategory>,
    ) -> Result<Vec<Place>, UpstreamError>;
}

/// Offer search and price verification against the provider.
#[async_trait]
pub trait FlightShopping: Send + Sync {
    async fn search_offers(
        &self,
        criteria: &SearchCriteria,
    ) -> Result<OfferSearchResponse, UpstreamError>;

    /// Re-submits a previously returned offer for pricing confirmation and
    /// returns the provider's confirmation payload as-is.
    async fn verify_price(
        &self,
        offer: &FlightOffer,
    ) -> Result<serde_json::Value, UpstreamError>;
}

/// Append-only log of completed searches.
#[async_trait]
pub trait SearchHistoryRepository: Send + Sync {
    async fn append(
        &self,
        criteria: &SearchCriteria,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Newest-first, capped at `limit`.
    async fn list_recent(
        &self,
        limit: i64,
    ) -> Result<Vec<SearchRecord>, Box<dyn std::error::Error + Send + Sync>>;
}

/// Durable per-field slot for the autocomplete recency list.
#[async_trait]
pub trait RecentSelectionsRepository: Send + Sync {
    async fn load(
        &self,
        role: FieldRole,
    ) -> Result<Vec<Place>, Box<dyn std::error::Error + Send + Sync>>;

    async fn save(
        &self,
        role: FieldRole,
        places: &[Place],
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
