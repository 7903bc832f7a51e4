use std::sync::Arc;

use shakeit::{
    api::images::{
        ImageCache,
        ImagesManager,
    },
    catalog::CatalogEvent,
    preferences::{
        resolve_language,
        system_language,
    },
    tracing_setup,
    ApiConfig,
    CatalogLoader,
    JsonPreferencesStore,
    NetworkManager,
    PreferencesStore,
    Section,
    ShakeItError,
};
use tracing::{
    info,
    warn,
};

/// Loads the first page of the catalog and prints what a list screen would
/// show. An optional argument searches the loaded drinks by name.
#[tokio::main]
async fn main() -> Result<(), ShakeItError> {
    tracing_setup::init_tracing();

    let config = ApiConfig::from_env()?;
    let preferences = JsonPreferencesStore::open_default();
    let language =
        resolve_language(preferences.language().as_deref(), system_language().as_deref());
    info!(theme = preferences.theme().name(), language, "preferences loaded");

    let network = Arc::new(NetworkManager::new(&config)?);
    let images = ImageCache::new(ImagesManager::new(&config)?);
    let mut loader = CatalogLoader::new(network);
    let mut events = loader.events();

    loader.first_load();
    while loader.is_loading() {
        if !loader.next_update().await {
            break;
        }
    }

    while let Ok(event) = events.try_recv() {
        match event {
            CatalogEvent::LoadingError { letter, error } => {
                warn!(%letter, %error, "loading failed, run again to retry")
            }
            CatalogEvent::FiltersDegraded { missing, .. } => {
                warn!(?missing, "some filters are unavailable")
            }
            other => info!(event = other.event_type(), "catalog event"),
        }
    }

    println!("Sections: {:?}", loader.sections());

    if loader.sections().contains(&Section::Filters) {
        for filter in loader.filters() {
            println!("{}: {} values", filter.kind().display_name(), filter.all_values().len());
        }
    }

    let query = std::env::args().nth(1);
    let drinks: Vec<_> = match query.as_deref() {
        Some(query) => loader.search(query).into_iter().map(|d| d.id.clone()).collect(),
        None => loader.visible_drinks().map(|d| d.id.clone()).collect(),
    };

    let urls: Vec<String> =
        drinks.iter().filter_map(|id| loader.drink(id)).map(|d| d.image_url.clone()).collect();
    let cached = images.prefetch(&urls).await;
    info!(cached, requested = urls.len(), "thumbnails prefetched");

    for id in &drinks {
        if let Err(error) = loader.load_image(id, &images).await {
            warn!(%id, %error, "thumbnail unavailable");
        }
        if let Some(drink) = loader.drink(id) {
            let image = drink.image_data().map(|data| data.len()).unwrap_or_default();
            println!("{} [{}] ({} bytes)", drink.name, drink.ingredients_summary(), image);
            println!("    {}", drink.instruction_text(language));
        }
    }

    Ok(())
}
