use std::time::Duration;

use blueflights_core::place::{FieldRole, Place};

/// Quiet interval a keyword must survive before a lookup fires.
pub const DEBOUNCE: Duration = Duration::from_millis(300);
/// Lookups are suppressed below this keyword length.
pub const MIN_KEYWORD_LEN: usize = 2;
/// Size of the per-field recency list.
pub const MAX_RECENTS: usize = 3;

/// What the dropdown should currently render.
#[derive(Debug, PartialEq)]
pub enum Dropdown<'a> {
    Hidden,
    /// Keyword below the lookup threshold, but prior selections exist.
    Recents(&'a [Place]),
    /// A lookup is scheduled or in flight and nothing has arrived yet.
    Loading,
    Candidates(&'a [Place]),
    /// A lookup completed with zero candidates; rendered explicitly rather
    /// than as an empty list.
    NoResults,
}

/// Per-field autocomplete state machine.
///
/// Timers live outside this type: `edit` hands back a generation id, the
/// caller sleeps the debounce interval and then offers the generation back via
/// `fire`. Only the newest generation is ever allowed to trigger a lookup, and
/// a completion is applied only while its generation is still current, so a
/// slow stale response can never overwrite a newer one.
#[derive(Debug)]
pub struct AutocompleteField {
    role: FieldRole,
    keyword: String,
    generation: u64,
    pending: Option<u64>,
    loading: bool,
    candidates: Option<Vec<Place>>,
    selection: Option<Place>,
    recents: Vec<Place>,
    open: bool,
}

impl AutocompleteField {
    pub fn new(role: FieldRole, recents: Vec<Place>) -> Self {
        let mut recents = recents;
        recents.truncate(MAX_RECENTS);
        Self {
            role,
            keyword: String::new(),
            generation: 0,
            pending: None,
            loading: false,
            candidates: None,
            selection: None,
            recents,
            open: false,
        }
    }

    pub fn role(&self) -> FieldRole {
        self.role
    }

    /// The raw text currently in the input.
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// The logical field value: the selected place's IATA code, if any.
    pub fn value(&self) -> Option<&str> {
        self.selection.as_ref().map(|p| p.iata_code.as_str())
    }

    pub fn recents(&self) -> &[Place] {
        &self.recents
    }

    /// Applies a keyword edit. Returns the generation to schedule a debounce
    /// timer for, or `None` when the keyword is below the lookup threshold.
    pub fn edit(&mut self, text: &str) -> Option<u64> {
        self.keyword = text.to_string();

        // Free-text edit away from the selected place's display string voids
        // the selection; the typed text is kept.
        if let Some(selection) = &self.selection {
            if text != selection.display() {
                self.selection = None;
            }
        }

        if self.keyword.chars().count() < MIN_KEYWORD_LEN {
            // Still counts as an edit: an in-flight lookup for the previous
            // keyword must not repopulate the field it just cleared.
            self.generation += 1;
            self.pending = None;
            self.loading = false;
            self.candidates = None;
            self.open = false;
            return None;
        }

        self.generation += 1;
        self.pending = Some(self.generation);
        self.open = true;
        Some(self.generation)
    }

    /// Called when a debounce timer elapses. Yields the keyword to look up
    /// only if no newer edit superseded this timer.
    pub fn fire(&mut self, generation: u64) -> Option<String> {
        if self.pending == Some(generation) && generation == self.generation {
            self.pending = None;
            self.loading = true;
            Some(self.keyword.clone())
        } else {
            None
        }
    }

    /// Applies lookup results; a stale generation is discarded outright.
    pub fn complete(&mut self, generation: u64, places: Vec<Place>) -> bool {
        if generation != self.generation {
            tracing::debug!(
                generation,
                current = self.generation,
                "discarding stale autocomplete response"
            );
            return false;
        }
        self.loading = false;
        self.candidates = Some(places);
        self.open = true;
        true
    }

    pub fn fail(&mut self, generation: u64) {
        if generation == self.generation {
            self.loading = false;
        }
    }

    /// Commits a selection: display text goes into the input, the IATA code
    /// becomes the logical value (returned), the dropdown closes, and the
    /// recency list is updated.
    pub fn select(&mut self, place: Place) -> String {
        self.keyword = place.display();
        self.open = false;
        self.pending = None;

        self.recents.retain(|p| p.iata_code != place.iata_code);
        self.recents.insert(0, place.clone());
        self.recents.truncate(MAX_RECENTS);

        let code = place.iata_code.clone();
        self.selection = Some(place);
        code
    }

    pub fn focus(&mut self) {
        if self.keyword.chars().count() >= MIN_KEYWORD_LEN {
            self.open = true;
        } else if !self.recents.is_empty() {
            self.candidates = None;
            self.open = true;
        }
    }

    /// Pointer interaction outside the field; keyword and selection are left
    /// untouched.
    pub fn dismiss(&mut self) {
        self.open = false;
    }

    pub fn dropdown(&self) -> Dropdown<'_> {
        if !self.open {
            return Dropdown::Hidden;
        }
        if self.keyword.chars().count() < MIN_KEYWORD_LEN {
            return if self.recents.is_empty() {
                Dropdown::Hidden
            } else {
                Dropdown::Recents(&self.recents)
            };
        }
        match &self.candidates {
            None => Dropdown::Loading,
            Some(places) if places.is_empty() => Dropdown::NoResults,
            Some(places) => Dropdown::Candidates(places),
        }
    }
}
