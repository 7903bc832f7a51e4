use std::{
    collections::HashMap,
    sync::{
        Arc,
        Mutex,
        PoisonError,
    },
};

use async_trait::async_trait;
use reqwest::{
    Client,
    Url,
};
use tokio::sync::OnceCell;
use tracing::debug;

use crate::core::{
    http,
    ApiConfig,
    ApiError,
    ShakeItError,
};

#[async_trait]
pub trait ImageProvider: Send + Sync + 'static {
    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, ApiError>;
}

pub struct ImagesManager {
    client: Client,
}

impl ImagesManager {
    pub fn new(config: &ApiConfig) -> Result<Self, ShakeItError> {
        Ok(Self { client: http::http_client(config)? })
    }
}

#[async_trait]
impl ImageProvider for ImagesManager {
    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let url = Url::parse(url).map_err(|_| ApiError::InvalidUrl)?;
        http::get_bytes(&self.client, url).await
    }
}

type Slot = Arc<OnceCell<Arc<Vec<u8>>>>;

/// Process-lifetime image cache keyed by URL.
///
/// Unbounded, no eviction. Concurrent requests for one URL wait on a single
/// download; a failed download leaves the slot empty so the next request
/// tries again.
pub struct ImageCache<P> {
    provider: P,
    slots: Mutex<HashMap<String, Slot>>,
}

impl<P: ImageProvider> ImageCache<P> {
    pub fn new(provider: P) -> Self {
        Self { provider, slots: Mutex::new(HashMap::new()) }
    }

    fn slot(&self, url: &str) -> Slot {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.entry(url.to_string()).or_default().clone()
    }

    pub async fn fetch(&self, url: &str) -> Result<Arc<Vec<u8>>, ApiError> {
        let slot = self.slot(url);
        if let Some(data) = slot.get() {
            debug!(url, "image cache hit");
            return Ok(data.clone());
        }

        let data = slot
            .get_or_try_init(|| async {
                debug!(url, "image download");
                self.provider.fetch_image(url).await.map(Arc::new)
            })
            .await?;
        Ok(data.clone())
    }

    pub fn cached(&self, url: &str) -> Option<Arc<Vec<u8>>> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.get(url).and_then(|slot| slot.get().cloned())
    }

    pub fn len(&self) -> usize {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.values().filter(|slot| slot.initialized()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Downloads every URL concurrently and returns how many are now cached.
    pub async fn prefetch<I, S>(&self, urls: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let urls: Vec<S> = urls.into_iter().collect();
        let fetches = urls.iter().map(|url| self.fetch(url.as_ref()));
        let results = futures::future::join_all(fetches).await;
        results.iter().filter(|result| result.is_ok()).count()
    }
}
