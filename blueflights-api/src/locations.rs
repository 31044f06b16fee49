use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use blueflights_core::place::{LocationCategory, Place};

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/locations/search", get(search_locations))
}

#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    pub keyword: Option<String>,
    #[serde(rename = "subType")]
    pub sub_type: Option<String>,
}

async fn search_locations(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> Result<Json<Vec<Place>>, ApiError> {
    let keyword = query.keyword.unwrap_or_default();
    let keyword = keyword.trim();
    if keyword.chars().count() < 2 {
        return Err(ApiError::Validation(
            "Keyword must be at least 2 characters long.".to_string(),
        ));
    }

    let category = match query.sub_type.as_deref() {
        None | Some("") => None,
        Some(raw) => Some(LocationCategory::parse(raw).ok_or_else(|| {
            ApiError::Validation(format!("Unknown subType: {raw}. Expected AIRPORT or CITY."))
        })?),
    };

    tracing::debug!(keyword, ?category, "location lookup");
    let places = state.locations.search_locations(keyword, category).await?;
    Ok(Json(places))
}
