use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use blueflights_core::offer::{FlightOffer, OfferSearchResponse};
use blueflights_core::search::{SearchCriteria, SearchRecord};

use crate::error::ApiError;
use crate::state::AppState;

/// How many past searches the recent-searches endpoint returns.
const RECENT_SEARCHES_LIMIT: i64 = 10;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/flights/search", post(search_flights))
        .route("/flights/verify-price", post(verify_price))
        .route("/flights/recent-searches", get(recent_searches))
}

async fn search_flights(
    State(state): State<AppState>,
    Json(criteria): Json<SearchCriteria>,
) -> Result<Json<OfferSearchResponse>, ApiError> {
    criteria.validate()?;

    tracing::info!(
        origin = %criteria.origin_location_code,
        destination = %criteria.destination_location_code,
        departure = %criteria.departure_date,
        "flight offer search"
    );

    let response = state.flights.search_offers(&criteria).await?;
    if response.data.is_empty() {
        return Err(ApiError::NotFound(
            "No flight offers found for the given criteria.".to_string(),
        ));
    }

    // History is best effort. A storage failure must not fail the search.
    let history = state.history.clone();
    tokio::spawn(async move {
        if let Err(err) = history.append(&criteria).await {
            tracing::error!(error = %err, "failed to record search history");
        }
    });

    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPriceRequest {
    pub flight_offer: Option<FlightOffer>,
}

async fn verify_price(
    State(state): State<AppState>,
    Json(request): Json<VerifyPriceRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let offer = request
        .flight_offer
        .ok_or_else(|| ApiError::Validation("Flight offer data is required.".to_string()))?;

    let confirmed = state.flights.verify_price(&offer).await?;
    Ok(Json(confirmed))
}

async fn recent_searches(
    State(state): State<AppState>,
) -> Result<Json<Vec<SearchRecord>>, ApiError> {
    let records = state
        .history
        .list_recent(RECENT_SEARCHES_LIMIT)
        .await
        .map_err(|err| ApiError::Internal(anyhow::anyhow!(err)))?;
    Ok(Json(records))
}
