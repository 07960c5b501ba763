use crate::error::{LookupError, Result};
use crate::models::place::{PlaceDetailsResponse, PlaceSummary};
use reqwest::Client;
use tracing::{debug, error};

pub const DETAILS_PATH: &str = "/maps/api/place/details/json";
pub const FIELDS: &str = "name,rating,user_ratings_total,url,reviews";

pub struct GooglePlacesApi {
    client: Client,
    base_url: String,
}

impl GooglePlacesApi {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// One GET to the place details endpoint, no retry.
    ///
    /// The HTTP status is ignored; success is decided by the `status` field of
    /// the body. Anything but `"OK"` is logged in full and returned as
    /// [`LookupError::Upstream`].
    pub async fn fetch_place_summary(&self, place_id: &str, api_key: &str) -> Result<PlaceSummary> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), DETAILS_PATH);

        debug!("Sending place details request for {}", place_id);
        let response = self
            .client
            .get(&url)
            .query(&[("place_id", place_id), ("fields", FIELDS), ("key", api_key)])
            .send()
            .await?;

        let details = PlaceDetailsResponse(response.json().await?);

        if !details.is_ok() {
            error!("Google Places error: {}", details.0);
            return Err(LookupError::Upstream {
                status: details.status().cloned(),
                body: details.0,
            });
        }

        Ok(details.summary())
    }
}
