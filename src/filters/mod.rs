use std::collections::HashSet;

use serde::{
    Deserialize,
    Serialize,
};

use crate::core::{
    ApiError,
    Drink,
};

pub mod editor;

pub use editor::{
    EditorError,
    FilterEditor,
    HeaderState,
};

/// One filterable dimension of a drink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Alcoholic,
    Category,
    Glass,
    Ingredients,
}

impl FilterKind {
    pub const ALL: [FilterKind; 4] =
        [FilterKind::Alcoholic, FilterKind::Category, FilterKind::Glass, FilterKind::Ingredients];

    /// Query parameter used by `list.php`.
    pub fn query_key(&self) -> &'static str {
        match self {
            FilterKind::Alcoholic => "a",
            FilterKind::Category => "c",
            FilterKind::Glass => "g",
            FilterKind::Ingredients => "i",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FilterKind::Alcoholic => "Alcoholic",
            FilterKind::Category => "Categories",
            FilterKind::Glass => "Glass",
            FilterKind::Ingredients => "Ingredients",
        }
    }

    /// The drink field(s) this facet is matched against.
    pub fn values_of<'a>(&self, drink: &'a Drink) -> &'a [String] {
        match self {
            FilterKind::Alcoholic => std::slice::from_ref(&drink.alcoholic),
            FilterKind::Category => std::slice::from_ref(&drink.category),
            FilterKind::Glass => std::slice::from_ref(&drink.glass),
            FilterKind::Ingredients => &drink.ingredients,
        }
    }
}

/// A facet with its universe of values and the user's current selection.
///
/// `selected_values` is always a subset of `all_values`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    kind: FilterKind,
    all_values: Vec<String>,
    selected_values: Vec<String>,
}

impl Filter {
    /// Sorted, de-duplicated values, all selected.
    pub fn new(kind: FilterKind, mut values: Vec<String>) -> Self {
        values.retain(|v| !v.trim().is_empty());
        values.sort();
        values.dedup();
        Self { kind, selected_values: values.clone(), all_values: values }
    }

    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    pub fn all_values(&self) -> &[String] {
        &self.all_values
    }

    pub fn selected_values(&self) -> &[String] {
        &self.selected_values
    }

    pub fn is_selected(&self, value: &str) -> bool {
        self.selected_values.iter().any(|v| v == value)
    }

    pub fn is_complete(&self) -> bool {
        self.selected_values.len() == self.all_values.len()
    }

    pub fn has_selection(&self) -> bool {
        !self.selected_values.is_empty()
    }

    /// Replaces the selection, keeping only values the facet knows about.
    pub fn with_selected<S: AsRef<str>>(mut self, values: &[S]) -> Self {
        self.selected_values = self
            .all_values
            .iter()
            .filter(|v| values.iter().any(|s| s.as_ref() == v.as_str()))
            .cloned()
            .collect();
        self
    }

    /// Removes `value` if selected, appends it otherwise. Unknown values are
    /// ignored and yield `false`.
    pub fn toggle_value(&mut self, value: &str) -> bool {
        if !self.all_values.iter().any(|v| v == value) {
            return false;
        }
        match self.selected_values.iter().position(|v| v == value) {
            Some(index) => {
                self.selected_values.remove(index);
            }
            None => self.selected_values.push(value.to_string()),
        }
        true
    }

    pub fn toggle_all(&mut self) {
        if self.selected_values.len() < self.all_values.len() {
            self.selected_values = self.all_values.clone();
        } else {
            self.selected_values.clear();
        }
    }

    pub fn matches(&self, drink: &Drink) -> bool {
        self.kind.values_of(drink).iter().any(|value| {
            self.selected_values.iter().any(|selected| eq_ignore_case(selected, value))
        })
    }
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b) || a.to_lowercase() == b.to_lowercase()
}

/// A drink is visible when every facet matches it.
pub fn matches_all(filters: &[Filter], drink: &Drink) -> bool {
    filters.iter().all(|filter| filter.matches(drink))
}

/// Indices of the drinks passing every filter, in catalog order.
pub fn visible_indices(drinks: &[Drink], filters: &[Filter]) -> Vec<usize> {
    let selections: Vec<(FilterKind, HashSet<String>)> = filters
        .iter()
        .map(|f| (f.kind(), f.selected_values().iter().map(|v| v.to_lowercase()).collect()))
        .collect();

    drinks
        .iter()
        .enumerate()
        .filter(|(_, drink)| {
            selections.iter().all(|(kind, selected)| {
                kind.values_of(drink).iter().any(|value| selected.contains(&value.to_lowercase()))
            })
        })
        .map(|(index, _)| index)
        .collect()
}

/// Raw results of the four facet requests.
#[derive(Debug, Clone)]
pub struct FilterResponses {
    pub category: Result<Vec<String>, ApiError>,
    pub alcoholic: Result<Vec<String>, ApiError>,
    pub ingredients: Result<Vec<String>, ApiError>,
    pub glass: Result<Vec<String>, ApiError>,
}

impl FilterResponses {
    fn get(&self, kind: FilterKind) -> &Result<Vec<String>, ApiError> {
        match kind {
            FilterKind::Alcoholic => &self.alcoholic,
            FilterKind::Category => &self.category,
            FilterKind::Glass => &self.glass,
            FilterKind::Ingredients => &self.ingredients,
        }
    }

    /// Filters for the facets that loaded, in [`FilterKind::ALL`] order, and
    /// the kinds that did not. A facet without a single usable value counts
    /// as missing, since it could never match a drink.
    pub fn into_filters(self) -> (Vec<Filter>, Vec<FilterKind>) {
        let mut filters = Vec::new();
        let mut missing = Vec::new();
        for kind in FilterKind::ALL {
            match self.get(kind) {
                Ok(values) => {
                    let filter = Filter::new(kind, values.clone());
                    if filter.all_values().is_empty() {
                        missing.push(kind);
                    } else {
                        filters.push(filter);
                    }
                }
                Err(_) => missing.push(kind),
            }
        }
        (filters, missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        drink,
        margarita,
    };

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_new_sorts_and_selects_everything() {
        let values = strings(&["Shot glass", "Beer mug", "Shot glass", ""]);
        let filter = Filter::new(FilterKind::Glass, values);
        assert_eq!(filter.all_values(), &strings(&["Beer mug", "Shot glass"])[..]);
        assert_eq!(filter.selected_values(), filter.all_values());
        assert!(filter.is_complete());
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let filter = Filter::new(FilterKind::Ingredients, strings(&["tequila"]));
        assert!(filter.matches(&margarita()));

        let filter = Filter::new(FilterKind::Category, strings(&["ORDINARY DRINK"]));
        assert!(filter.matches(&margarita()));

        let filter = Filter::new(FilterKind::Glass, strings(&["Highball glass"]));
        assert!(!filter.matches(&margarita()));
    }

    #[test]
    fn test_and_across_facets_or_within() {
        let drinks = vec![
            drink("1", "Margarita", "Ordinary Drink", "Alcoholic", "Cocktail glass", &["Tequila"]),
            drink("2", "Lemonade", "Soft Drink", "Non alcoholic", "Highball glass", &["Lemon"]),
            drink("3", "Paloma", "Cocktail", "Alcoholic", "Highball glass", &["Tequila"]),
        ];

        let filters = vec![
            Filter::new(FilterKind::Alcoholic, strings(&["Alcoholic", "Non alcoholic"])),
            Filter::new(FilterKind::Glass, strings(&["Highball glass", "Cocktail glass"]))
                .with_selected(&["Highball glass"]),
        ];
        assert_eq!(visible_indices(&drinks, &filters), vec![1, 2]);

        let filters = vec![
            Filter::new(FilterKind::Ingredients, strings(&["Tequila", "Lemon"]))
                .with_selected(&["Tequila"]),
            Filter::new(FilterKind::Glass, strings(&["Highball glass"])),
        ];
        assert_eq!(visible_indices(&drinks, &filters), vec![2]);

        for (index, drink) in drinks.iter().enumerate() {
            assert_eq!(
                matches_all(&filters, drink),
                visible_indices(&drinks, &filters).contains(&index)
            );
        }
    }

    #[test]
    fn test_no_filters_shows_everything() {
        let drinks = vec![margarita()];
        assert_eq!(visible_indices(&drinks, &[]), vec![0]);
    }

    #[test]
    fn test_narrowing_never_grows_visible_set() {
        let drinks = vec![
            drink("1", "A", "Cocktail", "Alcoholic", "Cocktail glass", &["Gin"]),
            drink("2", "B", "Shot", "Alcoholic", "Shot glass", &["Vodka"]),
            drink("3", "C", "Cocktail", "Optional alcohol", "Cocktail glass", &["Rum", "Gin"]),
            drink("4", "D", "Punch", "Non alcoholic", "Punch bowl", &["Juice"]),
        ];
        let base = vec![
            Filter::new(FilterKind::Category, strings(&["Cocktail", "Shot", "Punch"])),
            Filter::new(FilterKind::Ingredients, strings(&["Gin", "Vodka", "Rum", "Juice"])),
        ];
        let before = visible_indices(&drinks, &base).len();

        let subsets: [&[&str]; 4] = [&["Gin"], &["Vodka", "Rum"], &["Juice"], &[]];
        for subset in subsets {
            let mut narrowed = base.clone();
            narrowed[1] = narrowed[1].clone().with_selected(subset);
            assert!(visible_indices(&drinks, &narrowed).len() <= before);
        }
    }

    #[test]
    fn test_toggle_value_twice_restores_selection() {
        let original = Filter::new(FilterKind::Alcoholic, strings(&["Alcoholic", "Non alcoholic"]));
        let mut filter = original.clone();

        assert!(filter.toggle_value("Alcoholic"));
        assert!(!filter.is_selected("Alcoholic"));
        assert!(filter.toggle_value("Alcoholic"));

        let mut before: Vec<_> = original.selected_values().to_vec();
        let mut after: Vec<_> = filter.selected_values().to_vec();
        before.sort();
        after.sort();
        assert_eq!(before, after);
    }

    #[test]
    fn test_toggle_unknown_value_is_ignored() {
        let mut filter = Filter::new(FilterKind::Glass, strings(&["Shot glass"]));
        assert!(!filter.toggle_value("Bucket"));
        assert_eq!(filter.selected_values(), &strings(&["Shot glass"])[..]);
    }

    #[test]
    fn test_toggle_all_selects_or_clears() {
        let mut filter = Filter::new(FilterKind::Glass, strings(&["A", "B"])).with_selected(&["A"]);
        filter.toggle_all();
        assert!(filter.is_complete());
        filter.toggle_all();
        assert!(!filter.has_selection());
    }

    #[test]
    fn test_responses_keep_successful_facets() {
        let responses = FilterResponses {
            category: Ok(strings(&["Cocktail"])),
            alcoholic: Err(ApiError::InvalidData),
            ingredients: Ok(strings(&["Gin"])),
            glass: Err(ApiError::DecodingError),
        };
        let (filters, missing) = responses.into_filters();
        let kinds: Vec<_> = filters.iter().map(Filter::kind).collect();
        assert_eq!(kinds, vec![FilterKind::Category, FilterKind::Ingredients]);
        assert_eq!(missing, vec![FilterKind::Alcoholic, FilterKind::Glass]);
    }

    #[test]
    fn test_facets_without_values_count_as_missing() {
        let responses = FilterResponses {
            category: Ok(Vec::new()),
            alcoholic: Ok(strings(&["", "  "])),
            ingredients: Ok(strings(&["Gin"])),
            glass: Ok(strings(&["Shot glass"])),
        };
        let (filters, missing) = responses.into_filters();
        let kinds: Vec<_> = filters.iter().map(Filter::kind).collect();
        assert_eq!(kinds, vec![FilterKind::Glass, FilterKind::Ingredients]);
        assert_eq!(missing, vec![FilterKind::Alcoholic, FilterKind::Category]);
    }
}
