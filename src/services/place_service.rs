use crate::api::google_places::GooglePlacesApi;
use crate::api::secrets::SecretsClient;
use crate::config::Config;
use crate::error::{LookupError, Result};
use crate::models::cache::CacheEntry;
use crate::models::event::InvocationEvent;
use crate::models::place::PlaceSummary;
use crate::utils::response::{HttpResponse, ResponseFormatter};
use reqwest::Client;
use serde::Serialize;
use serde_json::{json, Value};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, error, info};

const UPSTREAM_ERROR: &str = "Upstream error from Google Places";
const INTERNAL_ERROR: &str = "Internal Server Error";

#[derive(Serialize)]
struct UpstreamErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a Value>,
}

/// Serves the cached place summary, refreshing it from Google Places when stale.
///
/// One instance lives per execution context and owns that context's cache.
/// `handle` takes `&mut self`: invocations are assumed not to overlap within a
/// context, so the cache needs no lock. If the hosting model ever delivers
/// concurrent requests, the cache must move behind a mutex.
pub struct PlaceService {
    config: Config,
    places: GooglePlacesApi,
    secrets: SecretsClient,
    formatter: ResponseFormatter,
    cache: CacheEntry,
}

impl PlaceService {
    pub fn new(config: Config) -> Self {
        let client = Client::new();
        Self {
            places: GooglePlacesApi::new(client.clone(), config.places_api_url.clone()),
            secrets: SecretsClient::new(
                client,
                config.secrets_extension_url.clone(),
                config.region.clone(),
                config.session_token.clone(),
            ),
            formatter: ResponseFormatter::new(config.allowed_origin.clone(), config.cache_max_age),
            cache: CacheEntry::default(),
            config,
        }
    }

    pub fn cache(&self) -> &CacheEntry {
        &self.cache
    }

    pub async fn handle(&mut self, event: &InvocationEvent) -> HttpResponse {
        self.handle_at(event, unix_now()).await
    }

    /// Same as [`handle`](Self::handle) with `now` given in epoch seconds.
    pub async fn handle_at(&mut self, event: &InvocationEvent, now: u64) -> HttpResponse {
        if event.is_preflight() {
            return self.formatter.json(200, &json!({ "ok": true }));
        }

        match self.lookup(now).await {
            Ok(summary) => self.formatter.json(200, &summary),
            Err(e) => self.error_response(e),
        }
    }

    async fn lookup(&mut self, now: u64) -> Result<PlaceSummary> {
        let place_id = self
            .config
            .place_id
            .as_deref()
            .ok_or(LookupError::MissingPlaceId)?;

        if let Some(summary) = self.cache.fresh(now, self.config.cache_max_age) {
            debug!("Cache hit (age {}s)", now.saturating_sub(self.cache.timestamp));
            return Ok(summary.clone());
        }

        debug!("Cache miss, fetching place {}", place_id);
        let api_key = self.secrets.google_api_key(&self.config.secret_name).await?;
        let summary = self.places.fetch_place_summary(place_id, &api_key).await?;

        info!(
            "Fetched place {} with {} reviews",
            place_id,
            summary.reviews.as_array().map_or(0, Vec::len)
        );
        self.cache.store(now, summary.clone());
        Ok(summary)
    }

    fn error_response(&self, err: LookupError) -> HttpResponse {
        match err {
            LookupError::MissingPlaceId => self.formatter.error(500, &err.to_string()),
            LookupError::Upstream { status, .. } => self.formatter.json(
                502,
                &UpstreamErrorBody {
                    error: UPSTREAM_ERROR,
                    details: status.as_ref(),
                },
            ),
            other => {
                error!("Lambda error: {}", other);
                self.formatter.error(500, INTERNAL_ERROR)
            }
        }
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
