use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use blueflights_core::offer::{Dictionaries, FlightOffer};

use crate::facets::{total_duration_minutes, FilterFacets, ValueRange};

/// Comparator applied to the post-filter list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    PriceAsc,
    PriceDesc,
    DurationAsc,
    DurationDesc,
}

/// Derived facets plus the user's current selections. Selections reset to
/// "everything included" whenever the underlying offer list changes and
/// persist across sort-key changes.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub facets: FilterFacets,
    pub selected_airlines: BTreeSet<String>,
    pub selected_stops: BTreeSet<u32>,
    pub price_ceiling: f64,
    pub duration_ceiling: u32,
    pub sort: SortKey,
}

impl FilterState {
    /// Default state for a fresh offer list: all facet members selected and
    /// both ceilings at the observed maxima, never a degenerate zero-items
    /// selection. An empty list yields Empty ranges and zero ceilings.
    pub fn reset(offers: &[FlightOffer], dictionaries: &Dictionaries) -> Self {
        let facets = FilterFacets::derive(offers, dictionaries);
        let selected_airlines = facets.airlines.keys().cloned().collect();
        let selected_stops = facets.stop_counts.clone();
        let price_ceiling = match facets.price {
            ValueRange::Empty => 0.0,
            ValueRange::Bounded { max, .. } => max,
        };
        let duration_ceiling = match facets.duration {
            ValueRange::Empty => 0,
            ValueRange::Bounded { max, .. } => max,
        };
        Self {
            facets,
            selected_airlines,
            selected_stops,
            price_ceiling,
            duration_ceiling,
            sort: SortKey::PriceAsc,
        }
    }

    /// Keeps filter selections; only the comparator changes.
    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    pub fn set_airline(&mut self, code: &str, included: bool) {
        if included {
            self.selected_airlines.insert(code.to_string());
        } else {
            self.selected_airlines.remove(code);
        }
    }

    pub fn set_stops(&mut self, stops: u32, included: bool) {
        if included {
            self.selected_stops.insert(stops);
        } else {
            self.selected_stops.remove(&stops);
        }
    }

    /// Conjunction over price ceiling, duration ceiling, and per-itinerary
    /// airline and stop-count membership. An offer with any
    /// itinerary failing its check is excluded entirely.
    pub fn includes(&self, offer: &FlightOffer) -> bool {
        if offer.total_price() > self.price_ceiling {
            return false;
        }
        if total_duration_minutes(offer) > self.duration_ceiling {
            return false;
        }
        offer.itineraries.iter().all(|itinerary| {
            let airlines_ok = itinerary
                .segments
                .iter()
                .all(|segment| self.selected_airlines.contains(&segment.carrier_code));
            airlines_ok && self.selected_stops.contains(&itinerary.stop_count())
        })
    }
}

/// Filters then orders an offer list. The sort is stable: ties keep their
/// input relative order.
pub fn apply(offers: &[FlightOffer], state: &FilterState) -> Vec<FlightOffer> {
    let mut filtered: Vec<FlightOffer> = offers
        .iter()
        .filter(|offer| state.includes(offer))
        .cloned()
        .collect();

    match state.sort {
        SortKey::PriceAsc => {
            filtered.sort_by(|a, b| a.total_price().total_cmp(&b.total_price()));
        }
        SortKey::PriceDesc => {
            filtered.sort_by(|a, b| b.total_price().total_cmp(&a.total_price()));
        }
        SortKey::DurationAsc => {
            filtered.sort_by_key(total_duration_minutes);
        }
        SortKey::DurationDesc => {
            filtered.sort_by(|a, b| total_duration_minutes(b).cmp(&total_duration_minutes(a)));
        }
    }

    filtered
}
