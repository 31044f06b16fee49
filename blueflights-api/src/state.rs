use std::sync::Arc;

use blueflights_core::repository::{FlightShopping, LocationLookup, SearchHistoryRepository};

#[derive(Clone)]
pub struct AppState {
    pub locations: Arc<dyn LocationLookup>,
    pub flights: Arc<dyn FlightShopping>,
    pub history: Arc<dyn SearchHistoryRepository>,
}
