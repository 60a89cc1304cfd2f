use crate::api::models::{
    ImageUpdate, LogoutRequest, MembershipRecord, NameUpdate, NewMembership, Track,
};
use crate::api::{ensure_success, StitchBackend, HTTP_CLIENT};
use crate::config::AppConfig;
use crate::diagnostics::{log_perf, now_ms};
use crate::error::StitchError;

/// Songs-in-stitch CRUD plus stitch metadata and logout.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendClient {
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            base_url: config.backend_url.clone(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn song_endpoint(&self, id: &str) -> String {
        self.endpoint(&format!("/song/{}", urlencoding::encode(id)))
    }
}

impl StitchBackend for BackendClient {
    async fn list_songs(&self, stitch_id: &str) -> Result<Vec<MembershipRecord>, StitchError> {
        let started_at = now_ms();
        let response = HTTP_CLIENT.get(self.song_endpoint(stitch_id)).send().await?;
        let body = ensure_success(response)?.text().await?;
        let records = parse_membership(&body)?;
        log_perf(
            "backend.list_songs",
            started_at,
            &format!("stitch={stitch_id} count={}", records.len()),
        );
        Ok(records)
    }

    async fn add_song(&self, stitch_id: &str, track: &Track) -> Result<(), StitchError> {
        let body = NewMembership::from_track(stitch_id, track);
        let response = HTTP_CLIENT
            .post(self.endpoint("/song/add"))
            .json(&body)
            .send()
            .await?;
        ensure_success(response)?;
        Ok(())
    }

    async fn delete_song(&self, song_id: &str) -> Result<(), StitchError> {
        let response = HTTP_CLIENT.delete(self.song_endpoint(song_id)).send().await?;
        ensure_success(response)?;
        Ok(())
    }

    async fn update_image(&self, stitch_id: &str, image_url: &str) -> Result<(), StitchError> {
        let response = HTTP_CLIENT
            .patch(self.endpoint("/stitch/image"))
            .json(&ImageUpdate {
                stitch_id,
                image_url,
            })
            .send()
            .await?;
        ensure_success(response)?;
        Ok(())
    }

    async fn rename_stitch(&self, stitch_id: &str, name: &str) -> Result<(), StitchError> {
        let response = HTTP_CLIENT
            .patch(self.endpoint("/stitch/name"))
            .json(&NameUpdate { stitch_id, name })
            .send()
            .await?;
        ensure_success(response)?;
        Ok(())
    }

    async fn logout(&self, refresh_token: &str) -> Result<(), StitchError> {
        let response = HTTP_CLIENT
            .delete(self.endpoint("/logout"))
            .json(&LogoutRequest {
                token: refresh_token,
            })
            .send()
            .await?;
        ensure_success(response)?;
        Ok(())
    }
}

/// Decodes the array returned by `GET /song/:stitchId`.
pub fn parse_membership(body: &str) -> Result<Vec<MembershipRecord>, StitchError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(body)?)
}
