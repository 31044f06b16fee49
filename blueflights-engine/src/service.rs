use std::sync::Arc;

use tokio::sync::Mutex;

use blueflights_core::place::{FieldRole, Place};
use blueflights_core::repository::{LocationLookup, RecentSelectionsRepository};

use crate::autocomplete::{AutocompleteField, DEBOUNCE};

/// Async driver for one autocomplete field: owns the state machine, runs the
/// debounce timers, and persists the recency list.
///
/// Each edit spawns a sleep task carrying its generation id. When the sleep
/// elapses, the state machine decides whether that generation is still the
/// live intent; superseded timers fall through without touching the network.
pub struct AutocompleteService {
    field: Arc<Mutex<AutocompleteField>>,
    lookup: Arc<dyn LocationLookup>,
    recents: Arc<dyn RecentSelectionsRepository>,
}

impl AutocompleteService {
    /// Loads the persisted recency list for `role`; a load failure degrades
    /// to an empty list rather than blocking the field.
    pub async fn new(
        role: FieldRole,
        lookup: Arc<dyn LocationLookup>,
        recents: Arc<dyn RecentSelectionsRepository>,
    ) -> Self {
        let stored = match recents.load(role).await {
            Ok(places) => places,
            Err(e) => {
                tracing::warn!(role = ?role, error = %e, "failed to load recent selections");
                Vec::new()
            }
        };
        Self {
            field: Arc::new(Mutex::new(AutocompleteField::new(role, stored))),
            lookup,
            recents,
        }
    }

    pub async fn edit(&self, text: &str) {
        let generation = {
            let mut field = self.field.lock().await;
            field.edit(text)
        };
        let Some(generation) = generation else {
            return;
        };

        let field = Arc::clone(&self.field);
        let lookup = Arc::clone(&self.lookup);
        tokio::spawn(async move {
            tokio::time::sleep(DEBOUNCE).await;

            let keyword = {
                let mut field = field.lock().await;
                field.fire(generation)
            };
            let Some(keyword) = keyword else {
                return;
            };

            match lookup.search_locations(&keyword, None).await {
                Ok(places) => {
                    field.lock().await.complete(generation, places);
                }
                Err(e) => {
                    tracing::error!(keyword, error = %e, "location lookup failed");
                    field.lock().await.fail(generation);
                }
            }
        });
    }

    /// Commits a selection and persists the updated recency list. Returns the
    /// logical field value (the IATA code). Persistence is best-effort.
    pub async fn select(&self, place: Place) -> String {
        let (code, role, recents) = {
            let mut field = self.field.lock().await;
            let code = field.select(place);
            (code, field.role(), field.recents().to_vec())
        };
        if let Err(e) = self.recents.save(role, &recents).await {
            tracing::warn!(role = ?role, error = %e, "failed to persist recent selections");
        }
        code
    }

    pub async fn focus(&self) {
        self.field.lock().await.focus();
    }

    pub async fn dismiss(&self) {
        self.field.lock().await.dismiss();
    }

    /// Runs `f` against the current field state.
    pub async fn with_state<R>(&self, f: impl FnOnce(&AutocompleteField) -> R) -> R {
        let field = self.field.lock().await;
        f(&field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex as StdMutex;

    use blueflights_core::place::LocationCategory;
    use blueflights_core::UpstreamError;

    struct CountingLookup {
        calls: AtomicUsize,
        keywords: StdMutex<Vec<String>>,
    }

    impl CountingLookup {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                keywords: StdMutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LocationLookup for CountingLookup {
        async fn search_locations(
            &self,
            keyword: &str,
            _category: Option<LocationCategory>,
        ) -> Result<Vec<Place>, UpstreamError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.keywords.lock().unwrap().push(keyword.to_string());
            Ok(vec![Place {
                id: "ADEL".to_string(),
                name: "Indira Gandhi Intl".to_string(),
                iata_code: "DEL".to_string(),
                sub_type: LocationCategory::Airport,
                address: None,
            }])
        }
    }

    #[derive(Default)]
    struct MemoryRecents {
        saved: StdMutex<Vec<(FieldRole, Vec<Place>)>>,
    }

    #[async_trait]
    impl RecentSelectionsRepository for MemoryRecents {
        async fn load(
            &self,
            _role: FieldRole,
        ) -> Result<Vec<Place>, Box<dyn std::error::Error + Send + Sync>> {
            Ok(Vec::new())
        }

        async fn save(
            &self,
            role: FieldRole,
            places: &[Place],
        ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            self.saved.lock().unwrap().push((role, places.to_vec()));
            Ok(())
        }
    }

    async fn settle() {
        // Paused clock: the sleep advances virtual time; the yields let the
        // spawned lookup task run to completion.
        tokio::time::sleep(DEBOUNCE * 2).await;
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_edits_issue_exactly_one_lookup() {
        let lookup = Arc::new(CountingLookup::new());
        let recents = Arc::new(MemoryRecents::default());
        let service = AutocompleteService::new(
            FieldRole::Origin,
            lookup.clone() as Arc<dyn LocationLookup>,
            recents as Arc<dyn RecentSelectionsRepository>,
        )
        .await;

        service.edit("D").await;
        service.edit("DE").await;
        service.edit("DEL").await;
        settle().await;

        assert_eq!(lookup.calls.load(Ordering::SeqCst), 1);
        assert_eq!(*lookup.keywords.lock().unwrap(), vec!["DEL".to_string()]);
        service
            .with_state(|field| match field.dropdown() {
                crate::autocomplete::Dropdown::Candidates(places) => {
                    assert_eq!(places[0].iata_code, "DEL")
                }
                other => panic!("expected candidates, got {other:?}"),
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_edit_below_threshold_never_calls_out() {
        let lookup = Arc::new(CountingLookup::new());
        let recents = Arc::new(MemoryRecents::default());
        let service = AutocompleteService::new(
            FieldRole::Origin,
            lookup.clone() as Arc<dyn LocationLookup>,
            recents as Arc<dyn RecentSelectionsRepository>,
        )
        .await;

        service.edit("D").await;
        settle().await;
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_select_persists_recents_for_role() {
        let lookup = Arc::new(CountingLookup::new());
        let recents = Arc::new(MemoryRecents::default());
        let service = AutocompleteService::new(
            FieldRole::Destination,
            lookup as Arc<dyn LocationLookup>,
            recents.clone() as Arc<dyn RecentSelectionsRepository>,
        )
        .await;

        let code = service
            .select(Place {
                id: "ABOM".to_string(),
                name: "Chhatrapati Shivaji Intl".to_string(),
                iata_code: "BOM".to_string(),
                sub_type: LocationCategory::Airport,
                address: None,
            })
            .await;

        assert_eq!(code, "BOM");
        let saved = recents.saved.lock().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].0, FieldRole::Destination);
        assert_eq!(saved[0].1[0].iata_code, "BOM");
    }
}
