use std::sync::Arc;

use tokio::{
    sync::{
        broadcast,
        watch,
    },
    task::{
        Id,
        JoinError,
        JoinSet,
    },
};
use tracing::{
    debug,
    info,
    warn,
};

use crate::{
    api::{
        images::{
            ImageCache,
            ImageProvider,
        },
        NetworkProvider,
    },
    core::{
        ApiError,
        Drink,
    },
    filters::{
        visible_indices,
        Filter,
        FilterKind,
        FilterResponses,
    },
};

pub mod events;
pub mod pagination;
pub mod sections;

pub use events::{
    CatalogEvent,
    CatalogSnapshot,
    LoadState,
};
use events::FetchOutcome;
pub use pagination::{
    PaginationCursor,
    PAGE_KEYS,
};
pub use sections::{
    derive_sections,
    Section,
};

const EVENT_CAPACITY: usize = 64;

/// Accumulates drinks page by page and keeps the filtered view, the section
/// list and the observers in sync with it.
///
/// Fetches run on the tokio runtime inside a [`JoinSet`] owned by the loader,
/// so dropping the loader aborts anything still in flight. Their results are
/// only applied when the owner drains them through [`CatalogLoader::next_update`],
/// [`CatalogLoader::poll_updates`] or [`CatalogLoader::run_until_idle`];
/// snapshots and events are published from that same call.
pub struct CatalogLoader<N: NetworkProvider> {
    network: Arc<N>,
    drinks: Vec<Drink>,
    filters: Vec<Filter>,
    visible: Vec<usize>,
    sections: Vec<Section>,
    cursor: PaginationCursor,
    started: bool,
    page_task: Option<(Id, char)>,
    facets_task: Option<Id>,
    halted: bool,
    tasks: JoinSet<FetchOutcome>,
    snapshot_tx: watch::Sender<CatalogSnapshot>,
    events_tx: broadcast::Sender<CatalogEvent>,
}

impl<N: NetworkProvider> CatalogLoader<N> {
    pub fn new(network: Arc<N>) -> Self {
        let (snapshot_tx, _) = watch::channel(CatalogSnapshot::default());
        let (events_tx, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            network,
            drinks: Vec::new(),
            filters: Vec::new(),
            visible: Vec::new(),
            sections: derive_sections(false, false, false),
            cursor: PaginationCursor::default(),
            started: false,
            page_task: None,
            facets_task: None,
            halted: false,
            tasks: JoinSet::new(),
            snapshot_tx,
            events_tx,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<CatalogSnapshot> {
        self.snapshot_tx.subscribe()
    }

    pub fn events(&self) -> broadcast::Receiver<CatalogEvent> {
        self.events_tx.subscribe()
    }

    /// Starts the facet requests and the first page together. Returns
    /// immediately; must be called from within a tokio runtime. A page
    /// already requested through [`CatalogLoader::load_more`] is not
    /// requested again.
    pub fn first_load(&mut self) {
        if self.started {
            debug!("first_load called twice, ignoring");
            return;
        }
        self.started = true;
        self.spawn_facets();
        self.request_page();
    }

    /// Requests the next page unless pagination is exhausted or a page is
    /// already in flight. Also clears a halt left by a failed page.
    pub fn load_more(&mut self) -> bool {
        self.request_page()
    }

    /// Re-requests the page that failed last. The cursor did not move on
    /// failure, so this is the same letter.
    pub fn retry(&mut self) -> bool {
        self.load_more()
    }

    /// Loads more when `row` is the last visible row (or past it).
    pub fn ask_for_new_drinks_if_needed(&mut self, row: usize) -> bool {
        if row.saturating_add(1) < self.visible.len() {
            return false;
        }
        self.load_more()
    }

    pub fn apply_filters(&mut self, filters: Vec<Filter>) {
        info!(facets = filters.len(), "applying filters");
        self.filters = filters;
        self.refresh();
    }

    /// Waits for the next completed fetch and applies it. Returns `false`
    /// when nothing is in flight.
    pub async fn next_update(&mut self) -> bool {
        match self.tasks.join_next().await {
            Some(Ok(outcome)) => {
                self.apply(outcome);
                true
            }
            Some(Err(error)) => {
                self.task_failed(error);
                true
            }
            None => false,
        }
    }

    /// Applies every fetch that has already completed, without waiting.
    pub fn poll_updates(&mut self) -> usize {
        let mut applied = 0;
        while let Some(joined) = self.tasks.try_join_next() {
            match joined {
                Ok(outcome) => self.apply(outcome),
                Err(error) => self.task_failed(error),
            }
            applied += 1;
        }
        applied
    }

    /// Drains fetches, including pages requested automatically along the
    /// way, until nothing is left in flight.
    pub async fn run_until_idle(&mut self) {
        while self.next_update().await {}
    }

    pub fn drinks(&self) -> &[Drink] {
        &self.drinks
    }

    pub fn drink(&self, id: &str) -> Option<&Drink> {
        self.drinks.iter().find(|d| d.id == id)
    }

    pub fn visible_drinks(&self) -> impl Iterator<Item = &Drink> + '_ {
        self.visible.iter().map(|&index| &self.drinks[index])
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn cursor(&self) -> PaginationCursor {
        self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor.is_exhausted()
    }

    pub fn is_loading(&self) -> bool {
        self.page_task.is_some() || self.facets_task.is_some()
    }

    pub fn state(&self) -> LoadState {
        if self.cursor.is_exhausted() {
            LoadState::Exhausted
        } else if self.page_task.is_some() {
            LoadState::Loading { initial: self.cursor.index() == 0 && self.drinks.is_empty() }
        } else if self.cursor.index() == 0 && self.drinks.is_empty() {
            LoadState::Empty
        } else {
            LoadState::PartialCatalog
        }
    }

    /// Case-insensitive name search over everything loaded so far.
    pub fn search(&self, query: &str) -> Vec<&Drink> {
        let query = query.trim().to_lowercase();
        self.drinks
            .iter()
            .filter(|d| query.is_empty() || d.name.to_lowercase().contains(&query))
            .collect()
    }

    pub fn set_image_data(&mut self, id: &str, data: Arc<Vec<u8>>) -> bool {
        match self.drinks.iter_mut().find(|d| d.id == id) {
            Some(drink) => drink.set_image_data(data),
            None => false,
        }
    }

    /// Fetches the drink's thumbnail through `images` and stores it in the
    /// drink's image slot. `Ok(false)` for unknown ids or an already filled
    /// slot.
    pub async fn load_image<P: ImageProvider>(
        &mut self,
        id: &str,
        images: &ImageCache<P>,
    ) -> Result<bool, ApiError> {
        let Some(url) = self.drink(id).map(|d| d.image_url.clone()) else {
            return Ok(false);
        };
        let data = images.fetch(&url).await?;
        Ok(self.set_image_data(id, data))
    }

    fn spawn_facets(&mut self) {
        let network = self.network.clone();
        let handle = self.tasks.spawn(async move {
            let (category, alcoholic, ingredients, glass) = tokio::join!(
                network.facet_values(FilterKind::Category),
                network.facet_values(FilterKind::Alcoholic),
                network.facet_values(FilterKind::Ingredients),
                network.facet_values(FilterKind::Glass),
            );
            FetchOutcome::Facets(FilterResponses { category, alcoholic, ingredients, glass })
        });
        self.facets_task = Some(handle.id());
    }

    fn request_page(&mut self) -> bool {
        let Some(letter) = self.cursor.current() else {
            debug!("pagination exhausted, not requesting");
            return false;
        };
        if self.page_task.is_some() {
            debug!(%letter, "page already in flight");
            return false;
        }

        self.halted = false;

        let network = self.network.clone();
        let handle = self.tasks.spawn(async move {
            let result = network.drinks_starting_with(letter).await;
            FetchOutcome::Page { letter, result }
        });
        self.page_task = Some((handle.id(), letter));
        self.publish();
        true
    }

    fn apply(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Facets(responses) => {
                self.facets_task = None;
                let (filters, missing) = responses.into_filters();
                self.install_facets(filters, missing);
            }
            FetchOutcome::Page { letter, result: Ok(drinks) } => {
                self.page_task = None;
                let count = drinks.len();
                self.drinks.extend(drinks);
                self.cursor.advance();
                info!(%letter, count, total = self.drinks.len(), "page applied");
                self.emit(CatalogEvent::PageLoaded { letter, count });
                if self.cursor.is_exhausted() {
                    info!(total = self.drinks.len(), "catalog exhausted");
                    self.emit(CatalogEvent::Exhausted);
                }
                self.refresh();
            }
            FetchOutcome::Page { letter, result: Err(error) } => {
                self.page_task = None;
                self.page_failed(letter, error);
            }
        }
    }

    fn install_facets(&mut self, filters: Vec<Filter>, missing: Vec<FilterKind>) {
        if !missing.is_empty() {
            warn!(?missing, "some filters failed to load");
            let loaded = filters.iter().map(Filter::kind).collect();
            self.emit(CatalogEvent::FiltersDegraded { loaded, missing });
        }
        self.filters = filters;
        self.refresh();
    }

    fn page_failed(&mut self, letter: char, error: ApiError) {
        self.halted = true;
        warn!(%letter, %error, "page failed");
        self.emit(CatalogEvent::LoadingError { letter, error });
        self.publish();
    }

    /// A fetch task panicked or was cancelled; treated as a failure of the
    /// request it was running.
    fn task_failed(&mut self, error: JoinError) {
        warn!(%error, "catalog fetch task did not complete");
        let id = error.id();

        if let Some((_, letter)) = self.page_task.filter(|(page_id, _)| *page_id == id) {
            self.page_task = None;
            self.page_failed(letter, ApiError::InvalidData);
        } else if self.facets_task == Some(id) {
            self.facets_task = None;
            self.install_facets(Vec::new(), FilterKind::ALL.to_vec());
        } else {
            self.publish();
        }
    }

    fn refresh(&mut self) {
        self.visible = visible_indices(&self.drinks, &self.filters);
        self.sections = derive_sections(
            !self.filters.is_empty(),
            !self.visible.is_empty(),
            self.cursor.is_exhausted(),
        );
        self.publish();

        if self.started && self.visible.is_empty() && !self.cursor.is_exhausted() && !self.halted {
            debug!("nothing visible, requesting next page");
            self.request_page();
        }
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(CatalogSnapshot {
            state: self.state(),
            sections: self.sections.clone(),
            visible_ids: self.visible_drinks().map(|d| d.id.clone()).collect(),
            total_drinks: self.drinks.len(),
            cursor: self.cursor.index(),
        });
    }

    fn emit(&self, event: CatalogEvent) {
        // no subscribers is fine
        let _ = self.events_tx.send(event);
    }
}
