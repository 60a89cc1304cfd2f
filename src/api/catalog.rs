use crate::api::models::{SearchResponse, Session, Track};
use crate::api::{ensure_success, TrackCatalog, HTTP_CLIENT};
use crate::config::AppConfig;
use crate::diagnostics::{log_perf, now_ms};
use crate::error::StitchError;

/// Spotify Web API track search.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogClient {
    base_url: String,
}

impl CatalogClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            base_url: config.catalog_url.clone(),
        }
    }

    pub fn search_url(&self, query: &str) -> String {
        format!(
            "{}/v1/search?q={}&type=track",
            self.base_url,
            urlencoding::encode(query)
        )
    }
}

impl TrackCatalog for CatalogClient {
    async fn search_tracks(
        &self,
        session: &Session,
        query: &str,
    ) -> Result<Vec<Track>, StitchError> {
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let bearer = session.bearer()?;
        let started_at = now_ms();
        let response = HTTP_CLIENT
            .get(self.search_url(query))
            .header(reqwest::header::AUTHORIZATION, bearer)
            .send()
            .await?;
        let body = ensure_success(response)?.text().await?;
        let tracks = parse_search_response(&body)?;
        log_perf(
            "catalog.search",
            started_at,
            &format!("query={query:?} results={}", tracks.len()),
        );
        Ok(tracks)
    }
}

/// Pulls `tracks.items[]` out of a search payload.
pub fn parse_search_response(body: &str) -> Result<Vec<Track>, StitchError> {
    let parsed: SearchResponse = serde_json::from_str(body)?;
    parsed
        .tracks
        .map(|page| page.items)
        .ok_or_else(|| StitchError::Parse("search response has no `tracks` page".to_string()))
}
