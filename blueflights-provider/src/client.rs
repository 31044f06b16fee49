use async_trait::async_trait;

use blueflights_core::offer::{FlightOffer, OfferSearchResponse};
use blueflights_core::place::{LocationCategory, Place};
use blueflights_core::repository::{FlightShopping, LocationLookup};
use blueflights_core::search::SearchCriteria;
use blueflights_core::UpstreamError;

use crate::auth::TokenManager;
use crate::{provider_error, transport_error};

/// Locations are capped upstream at this page size.
const LOCATION_PAGE_LIMIT: &str = "10";

/// Client for the Amadeus self-service APIs: location reference data, flight
/// offer search, and offer pricing. One instance serves all three concerns;
/// no retry and no timeout beyond the HTTP client's defaults. A call either
/// resolves or its failure surfaces to the caller.
pub struct AmadeusClient {
    http: reqwest::Client,
    base_url: String,
    token: TokenManager,
}

#[derive(Debug, serde::Deserialize)]
struct LocationsResponse {
    #[serde(default)]
    data: Vec<Place>,
}

impl AmadeusClient {
    pub fn new(base_url: &str, api_key: &str, api_secret: &str) -> Self {
        let http = reqwest::Client::new();
        let base_url = base_url.trim_end_matches('/').to_string();
        let token = TokenManager::new(http.clone(), &base_url, api_key, api_secret);
        Self {
            http,
            base_url,
            token,
        }
    }

    async fn get(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<reqwest::Response, UpstreamError> {
        let token = self.token.access_token().await?;
        self.http
            .get(format!("{}{}", self.base_url, path))
            .bearer_auth(token)
            .query(query)
            .send()
            .await
            .map_err(transport_error)
    }
}

#[async_trait]
impl LocationLookup for AmadeusClient {
    async fn search_locations(
        &self,
        keyword: &str,
        category: Option<LocationCategory>,
    ) -> Result<Vec<Place>, UpstreamError> {
        let sub_type = match category {
            Some(c) => c.as_sub_type().to_string(),
            // Default: airports and cities together.
            None => "AIRPORT,CITY".to_string(),
        };

        tracing::debug!(keyword, sub_type, "searching locations");
        let response = self
            .get(
                "/v1/reference-data/locations",
                &[
                    ("keyword", keyword.to_string()),
                    ("subType", sub_type),
                    ("page[limit]", LOCATION_PAGE_LIMIT.to_string()),
                ],
            )
            .await?;

        if !response.status().is_success() {
            return Err(provider_error(response).await);
        }

        let body: LocationsResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Decode(e.to_string()))?;
        Ok(body.data)
    }
}

#[async_trait]
impl FlightShopping for AmadeusClient {
    async fn search_offers(
        &self,
        criteria: &SearchCriteria,
    ) -> Result<OfferSearchResponse, UpstreamError> {
        let mut query = vec![
            (
                "originLocationCode",
                criteria.origin_location_code.clone(),
            ),
            (
                "destinationLocationCode",
                criteria.destination_location_code.clone(),
            ),
            (
                "departureDate",
                criteria.departure_date.format("%Y-%m-%d").to_string(),
            ),
            ("adults", criteria.adults.to_string()),
            ("currencyCode", criteria.currency_code.clone()),
            ("max", criteria.max.to_string()),
        ];
        if let Some(return_date) = criteria.return_date {
            query.push(("returnDate", return_date.format("%Y-%m-%d").to_string()));
        }
        if criteria.children > 0 {
            query.push(("children", criteria.children.to_string()));
        }
        if criteria.infants > 0 {
            query.push(("infants", criteria.infants.to_string()));
        }
        if let Some(travel_class) = criteria.travel_class {
            query.push(("travelClass", travel_class.as_str().to_string()));
        }

        tracing::debug!(
            origin = %criteria.origin_location_code,
            destination = %criteria.destination_location_code,
            "searching flight offers"
        );
        let response = self.get("/v2/shopping/flight-offers", &query).await?;

        if !response.status().is_success() {
            return Err(provider_error(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| UpstreamError::Decode(e.to_string()))
    }

    async fn verify_price(
        &self,
        offer: &FlightOffer,
    ) -> Result<serde_json::Value, UpstreamError> {
        let token = self.token.access_token().await?;
        let body = serde_json::json!({
            "data": {
                "type": "flight-offers-pricing",
                "flightOffers": [offer],
            }
        });

        tracing::debug!(offer_id = %offer.id, "verifying offer price");
        let response = self
            .http
            .post(format!("{}/v1/shopping/flight-offers/pricing", self.base_url))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(provider_error(response).await);
        }

        let mut payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| UpstreamError::Decode(e.to_string()))?;
        match payload.get_mut("data") {
            Some(data) => Ok(data.take()),
            None => Err(UpstreamError::Decode(
                "pricing response missing data".to_string(),
            )),
        }
    }
}
