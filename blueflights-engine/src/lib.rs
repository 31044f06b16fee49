pub mod autocomplete;
pub mod duration;
pub mod facets;
pub mod filter;
pub mod service;

pub use autocomplete::{AutocompleteField, Dropdown, DEBOUNCE, MAX_RECENTS, MIN_KEYWORD_LEN};
pub use facets::{FilterFacets, ValueRange};
pub use filter::{apply, FilterState, SortKey};
pub use service::AutocompleteService;
