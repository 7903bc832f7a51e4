use thiserror::Error;

use super::{
    Filter,
    FilterKind,
};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorError {
    #[error("no value selected for {}", .0.display_name())]
    EmptyFacet(FilterKind),
}

/// Counter and bulk-toggle label for a facet header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderState {
    pub selected: usize,
    pub total: usize,
    /// When true the bulk toggle reads "deselect all".
    pub all_selected: bool,
}

/// Edits a detached copy of the catalog's filters.
///
/// Nothing reaches the catalog until [`FilterEditor::apply`] hands back the
/// edited set, so the visible list stays put while the user is toggling.
#[derive(Debug, Clone)]
pub struct FilterEditor {
    filters: Vec<Filter>,
}

impl FilterEditor {
    pub fn new(filters: Vec<Filter>) -> Self {
        Self { filters }
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn filter(&self, kind: FilterKind) -> Option<&Filter> {
        self.filters.iter().find(|f| f.kind() == kind)
    }

    fn filter_mut(&mut self, kind: FilterKind) -> Option<&mut Filter> {
        self.filters.iter_mut().find(|f| f.kind() == kind)
    }

    pub fn toggle_value(&mut self, kind: FilterKind, value: &str) -> bool {
        self.filter_mut(kind).map(|f| f.toggle_value(value)).unwrap_or(false)
    }

    pub fn toggle_all(&mut self, kind: FilterKind) -> bool {
        match self.filter_mut(kind) {
            Some(filter) => {
                filter.toggle_all();
                true
            }
            None => false,
        }
    }

    /// A facet with nothing selected can never match, so applying is
    /// blocked until every facet has at least one value.
    pub fn can_apply(&self) -> bool {
        self.filters.iter().all(Filter::has_selection)
    }

    pub fn apply(&self) -> Result<Vec<Filter>, EditorError> {
        if let Some(empty) = self.filters.iter().find(|f| !f.has_selection()) {
            return Err(EditorError::EmptyFacet(empty.kind()));
        }
        Ok(self.filters.clone())
    }

    pub fn header(&self, kind: FilterKind) -> Option<HeaderState> {
        self.filter(kind).map(|f| HeaderState {
            selected: f.selected_values().len(),
            total: f.all_values().len(),
            all_selected: f.is_complete(),
        })
    }
}
