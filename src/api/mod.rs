//! Clients for the track catalog and the stitch backend.

pub mod backend;
pub mod catalog;
pub mod models;

pub use backend::BackendClient;
pub use catalog::CatalogClient;
pub use models::*;

use crate::error::StitchError;
use once_cell::sync::Lazy;

pub(crate) static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

/// Free-text track lookup against the external catalog.
#[allow(async_fn_in_trait)]
pub trait TrackCatalog {
    /// The empty query yields an empty list without touching the network.
    async fn search_tracks(&self, session: &Session, query: &str)
        -> Result<Vec<Track>, StitchError>;
}

/// Membership and metadata operations on the stitch backend.
#[allow(async_fn_in_trait)]
pub trait StitchBackend {
    async fn list_songs(&self, stitch_id: &str) -> Result<Vec<MembershipRecord>, StitchError>;
    async fn add_song(&self, stitch_id: &str, track: &Track) -> Result<(), StitchError>;
    async fn delete_song(&self, song_id: &str) -> Result<(), StitchError>;
    async fn update_image(&self, stitch_id: &str, image_url: &str) -> Result<(), StitchError>;
    async fn rename_stitch(&self, stitch_id: &str, name: &str) -> Result<(), StitchError>;
    async fn logout(&self, refresh_token: &str) -> Result<(), StitchError>;
}

/// Maps a non-success status to `StitchError::Server`.
pub(crate) fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, StitchError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(StitchError::Server {
            status: status.as_u16(),
        })
    }
}
