use std::collections::{BTreeMap, BTreeSet};

use blueflights_core::offer::{Dictionaries, FlightOffer};

use crate::duration::parse_duration_minutes;

/// An observed numeric range. `Empty` replaces the NaN/zero sentinel guards
/// a range would otherwise need; consumers must handle both arms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueRange<T> {
    Empty,
    Bounded { min: T, max: T },
}

impl<T: PartialOrd + Copy> ValueRange<T> {
    pub fn observe(&mut self, value: T) {
        *self = match *self {
            ValueRange::Empty => ValueRange::Bounded {
                min: value,
                max: value,
            },
            ValueRange::Bounded { min, max } => ValueRange::Bounded {
                min: if value < min { value } else { min },
                max: if value > max { value } else { max },
            },
        };
    }

    pub fn max(&self) -> Option<T> {
        match *self {
            ValueRange::Empty => None,
            ValueRange::Bounded { max, .. } => Some(max),
        }
    }

    pub fn min(&self) -> Option<T> {
        match *self {
            ValueRange::Empty => None,
            ValueRange::Bounded { min, .. } => Some(min),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ValueRange::Empty)
    }
}

/// Total duration of an offer: the sum of its itinerary durations, in minutes.
pub fn total_duration_minutes(offer: &FlightOffer) -> u32 {
    offer
        .itineraries
        .iter()
        .map(|itinerary| parse_duration_minutes(&itinerary.duration))
        .sum()
}

/// Filterable dimensions derived from one offer list.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterFacets {
    /// Carrier code -> display label (dictionary name, or the code itself).
    pub airlines: BTreeMap<String, String>,
    /// Distinct per-itinerary stop counts present in the list.
    pub stop_counts: BTreeSet<u32>,
    pub price: ValueRange<f64>,
    pub duration: ValueRange<u32>,
}

impl FilterFacets {
    pub fn empty() -> Self {
        Self {
            airlines: BTreeMap::new(),
            stop_counts: BTreeSet::new(),
            price: ValueRange::Empty,
            duration: ValueRange::Empty,
        }
    }

    /// One pass over the offer list.
    pub fn derive(offers: &[FlightOffer], dictionaries: &Dictionaries) -> Self {
        let mut facets = Self::empty();
        for offer in offers {
            for itinerary in &offer.itineraries {
                for segment in &itinerary.segments {
                    facets
                        .airlines
                        .entry(segment.carrier_code.clone())
                        .or_insert_with(|| {
                            dictionaries.carrier_name(&segment.carrier_code).to_string()
                        });
                }
                facets.stop_counts.insert(itinerary.stop_count());
            }
            facets.price.observe(offer.total_price());
            facets.duration.observe(total_duration_minutes(offer));
        }
        facets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::tests::{dictionaries, offer};

    #[test]
    fn test_value_range_observe() {
        let mut range = ValueRange::Empty;
        assert!(range.is_empty());
        range.observe(5.0);
        range.observe(2.0);
        range.observe(9.0);
        assert_eq!(range, ValueRange::Bounded { min: 2.0, max: 9.0 });
        assert_eq!(range.max(), Some(9.0));
    }

    #[test]
    fn test_derive_collects_all_dimensions() {
        let offers = vec![
            offer("1", "5000.00", &[(&["AI"], "PT2H0M")]),
            offer("2", "7000.00", &[(&["6E", "6E"], "PT5H30M")]),
        ];
        let facets = FilterFacets::derive(&offers, &dictionaries());

        assert_eq!(facets.airlines.len(), 2);
        assert_eq!(facets.airlines["AI"], "AIR INDIA");
        // Not in the dictionary: label falls back to the raw code.
        assert_eq!(facets.airlines["6E"], "6E");
        assert_eq!(
            facets.stop_counts.iter().copied().collect::<Vec<_>>(),
            vec![0, 1]
        );
        assert_eq!(
            facets.price,
            ValueRange::Bounded {
                min: 5000.0,
                max: 7000.0
            }
        );
        assert_eq!(
            facets.duration,
            ValueRange::Bounded { min: 120, max: 330 }
        );
    }

    #[test]
    fn test_derive_empty_list() {
        let facets = FilterFacets::derive(&[], &Dictionaries::default());
        assert!(facets.airlines.is_empty());
        assert!(facets.stop_counts.is_empty());
        assert!(facets.price.is_empty());
        assert!(facets.duration.is_empty());
    }

    #[test]
    fn test_stop_counts_are_per_itinerary_not_summed() {
        // One stop outbound, one stop return: facet is {1}, never {2}.
        let offers = vec![offer(
            "1",
            "9000.00",
            &[(&["AI", "AI"], "PT6H0M"), (&["AI", "AI"], "PT6H30M")],
        )];
        let facets = FilterFacets::derive(&offers, &Dictionaries::default());
        assert_eq!(
            facets.stop_counts.iter().copied().collect::<Vec<_>>(),
            vec![1]
        );
    }
}
