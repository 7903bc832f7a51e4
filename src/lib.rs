//! Front-end agnostic core of a cocktail browser backed by TheCocktailDB.
//!
//! [`catalog::CatalogLoader`] pages through the drink listing, loads the four
//! filter facets and keeps a filtered view plus the section layout a list UI
//! renders. [`filters::FilterEditor`] edits a detached copy of the filters,
//! [`api::images::ImageCache`] fetches thumbnails once per URL and
//! [`preferences`] persists theme and language.

pub mod api;
pub mod catalog;
pub mod core;
pub mod filters;
pub mod persistence;
pub mod preferences;
pub mod tracing_setup;

#[cfg(test)]
mod test_support;

pub use crate::{
    api::{
        images::{
            ImageCache,
            ImageProvider,
            ImagesManager,
        },
        NetworkManager,
        NetworkProvider,
    },
    catalog::{
        CatalogEvent,
        CatalogLoader,
        CatalogSnapshot,
        LoadState,
        Section,
    },
    core::{
        ApiConfig,
        ApiError,
        Drink,
        ShakeItError,
    },
    filters::{
        Filter,
        FilterEditor,
        FilterKind,
    },
    preferences::{
        JsonPreferencesStore,
        MemoryPreferencesStore,
        PreferencesStore,
        Theme,
    },
};
