//! # Refetch Controller
//!
//! Owns the news query parameters and one [`StatePublisher`] per resource.
//!
//! ```text
//! FeedController
//! ├── transport: Arc<dyn Transport>
//! ├── params: Mutex<QueryParameters>     // category, start, end
//! ├── news: StatePublisher<Vec<NewsArticle>>
//! ├── ad: StatePublisher<Advertisement>
//! ├── threat: StatePublisher<ThreatScore>
//! └── in_flight: Mutex<Vec<AbortHandle>> // aborted on drop
//! ```
//!
//! Every trigger publishes `Loading` right away and spawns the fetch as its
//! own task. When the task finishes it settles with the generation it was
//! given; if another trigger happened meanwhile, the result is dropped.
//! Last trigger wins, regardless of which request finishes first.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;
use log::{debug, info};
use tokio::task::AbortHandle;

use crate::api::{Advertisement, NewsArticle, ThreatScore, Transport};
use crate::core::envelope::Envelope;
use crate::core::fetch::{fetch_ad, fetch_news, fetch_today_threat};
use crate::core::publisher::StatePublisher;
use crate::core::query::QueryParameters;

pub struct FeedController {
    transport: Arc<dyn Transport>,
    params: Mutex<QueryParameters>,
    news: StatePublisher<Vec<NewsArticle>>,
    ad: StatePublisher<Advertisement>,
    threat: StatePublisher<ThreatScore>,
    in_flight: Mutex<Vec<AbortHandle>>,
}

impl FeedController {
    /// Creates the controller and immediately starts the three initial
    /// fetches (news, ad, threat score). Must be called inside a Tokio runtime.
    pub fn new(transport: Arc<dyn Transport>, params: QueryParameters) -> Self {
        info!(
            "Feed controller starting via {} with {:?}",
            transport.name(),
            params
        );
        let controller = Self {
            transport,
            params: Mutex::new(params),
            news: StatePublisher::new("news"),
            ad: StatePublisher::new("ad"),
            threat: StatePublisher::new("today-threat"),
            in_flight: Mutex::new(Vec::new()),
        };
        controller.refresh_all();
        controller
    }

    pub fn news(&self) -> &StatePublisher<Vec<NewsArticle>> {
        &self.news
    }

    pub fn ad(&self) -> &StatePublisher<Advertisement> {
        &self.ad
    }

    pub fn threat_score(&self) -> &StatePublisher<ThreatScore> {
        &self.threat
    }

    /// Snapshot of the current news filters.
    pub fn params(&self) -> QueryParameters {
        self.lock_params().clone()
    }

    fn lock_params(&self) -> MutexGuard<'_, QueryParameters> {
        self.params.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Changes the category and refetches news. Dates are kept.
    pub fn set_category(&self, category: impl Into<String>) {
        let mut params = self.lock_params();
        params.category = category.into();
        info!("Category set to {:?}", params.category);
        self.spawn_news(&params);
    }

    /// Records both dates and refetches news. Category is kept.
    ///
    /// `start <= end` is not checked here; the server decides.
    pub fn set_date_range(&self, start: NaiveDate, end: NaiveDate) {
        let mut params = self.lock_params();
        params.start = Some(start);
        params.end = Some(end);
        info!("Date range set to {start}..{end}");
        self.spawn_news(&params);
    }

    pub fn refresh_news(&self) {
        let params = self.lock_params();
        self.spawn_news(&params);
    }

    pub fn refresh_ad(&self) {
        self.spawn_fetch(&self.ad, |transport| async move {
            fetch_ad(transport.as_ref()).await
        });
    }

    pub fn refresh_threat_score(&self) {
        self.spawn_fetch(&self.threat, |transport| async move {
            fetch_today_threat(transport.as_ref()).await
        });
    }

    /// Refetches all three resources. No ordering between them.
    pub fn refresh_all(&self) {
        self.refresh_news();
        self.refresh_ad();
        self.refresh_threat_score();
    }

    /// Callers hold the params lock, so generations follow parameter order.
    fn spawn_news(&self, params: &QueryParameters) {
        let params = params.clone();
        self.spawn_fetch(&self.news, |transport| async move {
            fetch_news(transport.as_ref(), &params).await
        });
    }

    fn spawn_fetch<T, F, Fut>(&self, publisher: &StatePublisher<T>, fetch: F)
    where
        T: Clone + Send + 'static,
        F: FnOnce(Arc<dyn Transport>) -> Fut,
        Fut: Future<Output = Envelope<T>> + Send + 'static,
    {
        let generation = publisher.begin();
        let publisher = publisher.clone();
        let request = fetch(Arc::clone(&self.transport));

        let handle = tokio::spawn(async move {
            let envelope = request.await;
            if !publisher.settle(generation, envelope) {
                debug!(
                    "{}: stale result of generation {} suppressed",
                    publisher.name(),
                    generation
                );
            }
        });

        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        in_flight.retain(|handle| !handle.is_finished());
        in_flight.push(handle.abort_handle());
    }
}

/// Error published for fetches cut short by dropping the controller.
pub const CANCELLED_MESSAGE: &str = "Fetch cancelled";

/// Aborts in-flight fetches. Any resource still loading settles with
/// [`CANCELLED_MESSAGE`], so cloned publishers never stay stuck on `Loading`.
impl Drop for FeedController {
    fn drop(&mut self) {
        let in_flight = self.in_flight.get_mut().unwrap_or_else(PoisonError::into_inner);
        for handle in in_flight.drain(..) {
            handle.abort();
        }
        self.news.abandon(CANCELLED_MESSAGE);
        self.ad.abandon(CANCELLED_MESSAGE);
        self.threat.abandon(CANCELLED_MESSAGE);
    }
}
