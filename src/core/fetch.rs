//! # Fetch Functions
//!
//! One async function per resource. Each issues exactly one transport call
//! and turns whatever happens into an [`Envelope`]; nothing escapes as an
//! error or a panic.

use log::{debug, warn};
use serde::de::DeserializeOwned;

use crate::api::{Advertisement, NewsArticle, Resource, ThreatScore, Transport, TransportError};
use crate::core::envelope::Envelope;
use crate::core::query::QueryParameters;

/// Fetches one resource and decodes it into `T`.
async fn fetch_resource<T: DeserializeOwned>(
    transport: &dyn Transport,
    resource: Resource,
    query: &[(&'static str, String)],
) -> Envelope<T> {
    let result = transport.get(resource, query).await.and_then(|body| {
        serde_json::from_value::<T>(body).map_err(|e| TransportError::Parse(e.to_string()))
    });

    match result {
        Ok(data) => {
            debug!("{} fetched via {}", resource.path(), transport.name());
            Envelope::success(data)
        }
        Err(e) => {
            warn!("{} fetch failed: {}", resource.path(), e);
            Envelope::error(e.message())
        }
    }
}

/// `GET /news` filtered by category and optional date range.
pub async fn fetch_news(
    transport: &dyn Transport,
    params: &QueryParameters,
) -> Envelope<Vec<NewsArticle>> {
    fetch_resource(transport, Resource::News, &params.to_query()).await
}

/// `GET /ad`
pub async fn fetch_ad(transport: &dyn Transport) -> Envelope<Advertisement> {
    fetch_resource(transport, Resource::Ad, &[]).await
}

/// `GET /today-threat`. What counts as "today" is up to the server.
pub async fn fetch_today_threat(transport: &dyn Transport) -> Envelope<ThreatScore> {
    fetch_resource(transport, Resource::TodayThreat, &[]).await
}
