use super::sections::Section;
use crate::{
    core::{
        ApiError,
        Drink,
    },
    filters::{
        FilterKind,
        FilterResponses,
    },
};

/// Lifecycle of a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Empty,
    Loading { initial: bool },
    PartialCatalog,
    Exhausted,
}

/// One-shot notifications for the front end.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogEvent {
    /// Some facet requests failed; the loaded ones are still usable.
    FiltersDegraded { loaded: Vec<FilterKind>, missing: Vec<FilterKind> },
    /// A page failed. Automatic pagination is halted until a retry.
    LoadingError { letter: char, error: ApiError },
    PageLoaded { letter: char, count: usize },
    Exhausted,
}

impl CatalogEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            CatalogEvent::FiltersDegraded { .. } => "filters_degraded",
            CatalogEvent::LoadingError { .. } => "loading_error",
            CatalogEvent::PageLoaded { .. } => "page_loaded",
            CatalogEvent::Exhausted => "exhausted",
        }
    }
}

/// State published after every change.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSnapshot {
    pub state: LoadState,
    pub sections: Vec<Section>,
    pub visible_ids: Vec<String>,
    pub total_drinks: usize,
    pub cursor: usize,
}

impl Default for CatalogSnapshot {
    fn default() -> Self {
        Self {
            state: LoadState::Empty,
            sections: vec![Section::Loader],
            visible_ids: Vec::new(),
            total_drinks: 0,
            cursor: 0,
        }
    }
}

/// Completion of a spawned fetch, applied by the catalog owner.
#[derive(Debug)]
pub(crate) enum FetchOutcome {
    Facets(FilterResponses),
    Page { letter: char, result: Result<Vec<Drink>, ApiError> },
}
