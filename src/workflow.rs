//! Two-step commands: mutate, then refresh. Each step can be called on its own;
//! the caller sequences them through [`crate::composition::Composition`].

use crate::api::{MembershipRecord, Session, StitchBackend, Track, TrackCatalog};
use crate::composition::{cover_for, RefreshStep};
use crate::diagnostics::log_failure;
use crate::error::StitchError;

/// Result of one membership refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshOutcome {
    /// Set when the refresh carried a pending delete.
    pub deleted: Option<Result<(), StitchError>>,
    pub members: Result<Vec<MembershipRecord>, StitchError>,
    /// Cover pushed to the backend after a non-empty listing.
    pub cover: Option<String>,
}

pub async fn run_search<C: TrackCatalog>(
    catalog: &C,
    session: &Session,
    query: &str,
) -> Result<Vec<Track>, StitchError> {
    catalog.search_tracks(session, query).await
}

/// Issues the pending delete if there is one, then re-lists membership.
pub async fn run_refresh<B: StitchBackend>(
    backend: &B,
    stitch_id: &str,
    step: RefreshStep,
) -> RefreshOutcome {
    let deleted = match step {
        RefreshStep::Delete(song_id) => {
            let result = backend.delete_song(&song_id).await;
            if let Err(err) = &result {
                log_failure("song.delete", err);
            }
            Some(result)
        }
        RefreshStep::List => None,
    };

    let (members, cover) = list_members(backend, stitch_id).await;
    RefreshOutcome {
        deleted,
        members,
        cover,
    }
}

/// Lists membership and, when non-empty, pushes the first record's album
/// image as the stitch cover. A failed cover push is only logged.
pub async fn list_members<B: StitchBackend>(
    backend: &B,
    stitch_id: &str,
) -> (Result<Vec<MembershipRecord>, StitchError>, Option<String>) {
    let records = match backend.list_songs(stitch_id).await {
        Ok(records) => records,
        Err(err) => {
            log_failure("song.list", &err);
            return (Err(err), None);
        }
    };

    let cover = cover_for(&records);
    if let Some(image_url) = cover.as_deref() {
        if let Err(err) = backend.update_image(stitch_id, image_url).await {
            log_failure("stitch.image", &err);
        }
    }
    (Ok(records), cover)
}

pub async fn add_track<B: StitchBackend>(
    backend: &B,
    stitch_id: &str,
    track: &Track,
) -> Result<(), StitchError> {
    let result = backend.add_song(stitch_id, track).await;
    if let Err(err) = &result {
        log_failure("song.add", err);
    }
    result
}

/// Trims `name`; blank names are rejected without a request.
pub async fn rename<B: StitchBackend>(
    backend: &B,
    stitch_id: &str,
    name: &str,
) -> Option<String> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    match backend.rename_stitch(stitch_id, name).await {
        Ok(()) => Some(name.to_string()),
        Err(err) => {
            log_failure("stitch.rename", &err);
            None
        }
    }
}

/// Tells the backend to revoke the refresh token. Local credentials are the
/// caller's to clear, whatever this returns.
pub async fn logout<B: StitchBackend>(backend: &B, session: &Session) -> Result<(), StitchError> {
    let token = session.refresh_token.as_deref().unwrap_or_default();
    let result = backend.logout(token).await;
    if let Err(err) = &result {
        log_failure("logout", err);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{AlbumRef, Image};
    use crate::composition::{Composition, DeleteState, SearchStep};
    use crate::preview::{preview_element_id, PreviewController, PreviewSink};
    use std::cell::{Cell, RefCell};

    /// Same sequence the composition screen runs for one refresh.
    async fn refresh(backend: &FakeBackend, composition: &mut Composition) -> RefreshOutcome {
        let ticket = composition.begin_refresh();
        let outcome = run_refresh(backend, &ticket.stitch_id, ticket.step).await;
        composition.finish_refresh(ticket.seq, outcome.clone());
        outcome
    }

    /// Add, then refresh only if the add went through.
    async fn add(backend: &FakeBackend, composition: &mut Composition, track: &Track) -> bool {
        assert!(composition.begin_add());
        let stitch_id = composition.stitch().id.clone();
        let added = add_track(backend, &stitch_id, track).await.is_ok();
        composition.finish_add();
        if added {
            refresh(backend, composition).await;
        }
        added
    }

    #[derive(Default)]
    struct RecordingSink {
        stopped: RefCell<Vec<String>>,
    }

    impl PreviewSink<String> for RecordingSink {
        fn stop(&self, handle: &String) {
            self.stopped.borrow_mut().push(handle.clone());
        }
    }

    #[derive(Default)]
    struct FakeBackend {
        records: RefCell<Vec<MembershipRecord>>,
        calls: RefCell<Vec<String>>,
        next_id: Cell<u32>,
        fail_add: Cell<bool>,
        fail_delete: Cell<bool>,
        fail_image: Cell<bool>,
    }

    impl FakeBackend {
        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        fn log(&self, call: String) {
            self.calls.borrow_mut().push(call);
        }
    }

    impl StitchBackend for FakeBackend {
        async fn list_songs(&self, stitch_id: &str) -> Result<Vec<MembershipRecord>, StitchError> {
            self.log(format!("list {stitch_id}"));
            Ok(self
                .records
                .borrow()
                .iter()
                .filter(|r| r.stitch_id == stitch_id)
                .cloned()
                .collect())
        }

        async fn add_song(&self, stitch_id: &str, track: &Track) -> Result<(), StitchError> {
            self.log(format!("add {}", track.uri));
            if self.fail_add.get() {
                return Err(StitchError::Network("connection refused".into()));
            }
            let mut records = self.records.borrow_mut();
            if records
                .iter()
                .any(|r| r.stitch_id == stitch_id && r.uri == track.uri)
            {
                return Err(StitchError::Server { status: 409 });
            }
            self.next_id.set(self.next_id.get() + 1);
            let mut record = MembershipRecord {
                stitch_id: stitch_id.to_string(),
                ..MembershipRecord::default()
            };
            let copy = track.clone();
            record.id = self.next_id.get().to_string();
            record.uri = copy.uri;
            record.name = copy.name;
            record.album = copy.album;
            records.push(record);
            Ok(())
        }

        async fn delete_song(&self, song_id: &str) -> Result<(), StitchError> {
            self.log(format!("delete {song_id}"));
            if self.fail_delete.get() {
                return Err(StitchError::Server { status: 500 });
            }
            self.records.borrow_mut().retain(|r| r.id != song_id);
            Ok(())
        }

        async fn update_image(&self, stitch_id: &str, image_url: &str) -> Result<(), StitchError> {
            self.log(format!("image {stitch_id} {image_url}"));
            if self.fail_image.get() {
                return Err(StitchError::Server { status: 502 });
            }
            Ok(())
        }

        async fn rename_stitch(&self, stitch_id: &str, name: &str) -> Result<(), StitchError> {
            self.log(format!("rename {stitch_id} {name}"));
            Ok(())
        }

        async fn logout(&self, refresh_token: &str) -> Result<(), StitchError> {
            self.log(format!("logout {refresh_token}"));
            Err(StitchError::Network("offline".into()))
        }
    }

    struct FakeCatalog {
        results: Vec<Track>,
        requests: Cell<u32>,
    }

    impl TrackCatalog for FakeCatalog {
        async fn search_tracks(
            &self,
            _session: &Session,
            query: &str,
        ) -> Result<Vec<Track>, StitchError> {
            if query.is_empty() {
                return Ok(Vec::new());
            }
            self.requests.set(self.requests.get() + 1);
            Ok(self.results.clone())
        }
    }

    fn track(uri: &str, cover: &str) -> Track {
        Track {
            id: uri.to_string(),
            name: uri.to_string(),
            uri: uri.to_string(),
            album: AlbumRef {
                images: vec![Image {
                    url: cover.to_string(),
                    ..Image::default()
                }],
                ..AlbumRef::default()
            },
            ..Track::default()
        }
    }

    #[tokio::test]
    async fn add_then_list_contains_track_once() {
        let backend = FakeBackend::default();
        let mut composition = Composition::new("s1");
        let song = track("spotify:track:a", "A");

        assert!(add(&backend, &mut composition, &song).await);
        let count = |c: &Composition| c.members().iter().filter(|r| r.uri == song.uri).count();
        assert_eq!(count(&composition), 1);

        // The store rejects the duplicate; membership does not change.
        assert!(!add(&backend, &mut composition, &song).await);
        assert_eq!(count(&composition), 1);
        let (members, _) = list_members(&backend, "s1").await;
        assert_eq!(members.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn listing_pushes_first_album_image() {
        let backend = FakeBackend::default();
        backend.records.borrow_mut().push(MembershipRecord {
            id: "1".into(),
            stitch_id: "s1".into(),
            album: AlbumRef {
                images: vec![Image {
                    url: "X".into(),
                    ..Image::default()
                }],
                ..AlbumRef::default()
            },
            ..MembershipRecord::default()
        });

        let outcome = run_refresh(&backend, "s1", RefreshStep::List).await;
        assert_eq!(outcome.cover.as_deref(), Some("X"));
        assert_eq!(backend.calls(), vec!["list s1", "image s1 X"]);
    }

    #[tokio::test]
    async fn empty_listing_skips_cover_update() {
        let backend = FakeBackend::default();
        let outcome = run_refresh(&backend, "s1", RefreshStep::List).await;
        assert_eq!(outcome.members, Ok(Vec::new()));
        assert_eq!(outcome.cover, None);
        assert_eq!(backend.calls(), vec!["list s1"]);
    }

    #[tokio::test]
    async fn cover_push_failure_does_not_fail_refresh() {
        let backend = FakeBackend::default();
        backend.fail_image.set(true);
        add_track(&backend, "s1", &track("u1", "C")).await.unwrap();

        let outcome = run_refresh(&backend, "s1", RefreshStep::List).await;
        assert_eq!(outcome.members.unwrap().len(), 1);
        assert_eq!(outcome.cover.as_deref(), Some("C"));
    }

    #[tokio::test]
    async fn failed_add_does_not_refresh() {
        let backend = FakeBackend::default();
        backend.fail_add.set(true);
        let mut composition = Composition::new("s1");
        assert!(!add(&backend, &mut composition, &track("u1", "C")).await);
        assert_eq!(backend.calls(), vec!["add u1"]);
        assert!(composition.can_remove());
    }

    #[tokio::test]
    async fn remove_runs_delete_then_single_refresh() {
        let backend = FakeBackend::default();
        add_track(&backend, "s1", &track("u1", "A")).await.unwrap();
        add_track(&backend, "s1", &track("u2", "B")).await.unwrap();
        backend.calls.borrow_mut().clear();

        let mut composition = Composition::new("s1");
        assert!(composition.request_remove("1"));
        assert_eq!(composition.delete_state(), &DeleteState::Deleting("1".into()));

        refresh(&backend, &mut composition).await;

        assert_eq!(composition.delete_state(), &DeleteState::Idle);
        assert_eq!(backend.calls(), vec!["delete 1", "list s1", "image s1 B"]);
        let ids: Vec<_> = composition.members().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["2"]);
        assert_eq!(composition.stitch().image_url.as_deref(), Some("B"));
    }

    #[tokio::test]
    async fn failed_delete_still_clears_and_refreshes() {
        let backend = FakeBackend::default();
        backend.fail_delete.set(true);
        add_track(&backend, "s1", &track("u1", "A")).await.unwrap();
        backend.calls.borrow_mut().clear();

        let mut composition = Composition::new("s1");
        assert!(composition.request_remove("1"));
        let outcome = refresh(&backend, &mut composition).await;
        assert!(matches!(outcome.deleted, Some(Err(StitchError::Server { status: 500 }))));

        assert_eq!(composition.delete_state(), &DeleteState::Idle);
        assert_eq!(composition.members().len(), 1);
        assert_eq!(backend.calls(), vec!["delete 1", "list s1", "image s1 A"]);
    }

    #[tokio::test]
    async fn empty_query_issues_no_request() {
        let catalog = FakeCatalog {
            results: vec![track("u1", "A")],
            requests: Cell::new(0),
        };
        let session = Session::new("token", "refresh");
        let mut composition = Composition::new("s1");

        if let SearchStep::Issue { seq, query } = composition.begin_search("abc") {
            let result = run_search(&catalog, &session, &query).await;
            composition.finish_search(seq, result);
        }
        assert_eq!(composition.candidates().len(), 1);

        assert_eq!(composition.begin_search(""), SearchStep::Cleared);
        assert!(composition.candidates().is_empty());
        assert_eq!(catalog.requests.get(), 1);
    }

    #[tokio::test]
    async fn whitespace_query_is_sent_as_typed() {
        let catalog = FakeCatalog {
            results: vec![track("u1", "A")],
            requests: Cell::new(0),
        };
        let session = Session::new("token", "refresh");
        let mut composition = Composition::new("s1");

        let SearchStep::Issue { seq, query } = composition.begin_search("  ") else {
            panic!("expected a request");
        };
        let result = run_search(&catalog, &session, &query).await;
        assert!(composition.finish_search(seq, result));
        assert_eq!(catalog.requests.get(), 1);
        assert_eq!(composition.candidates().len(), 1);
    }

    #[tokio::test]
    async fn removing_the_playing_row_stops_it_even_if_delete_fails() {
        let backend = FakeBackend::default();
        backend.fail_delete.set(true);
        let mut composition = Composition::new("s1");
        assert!(add(&backend, &mut composition, &track("u7", "A")).await);
        let record_id = composition.members()[0].id.clone();

        let sink = RecordingSink::default();
        let mut preview = PreviewController::new();
        let member = preview_element_id("member", &record_id);
        let candidate = preview_element_id("candidate", "b");
        preview.play(member.clone(), &sink);

        // Same order as the screen: mark pending, silence the row, then refresh.
        assert!(composition.request_remove(record_id.clone()));
        assert!(preview.stop_if(&member, &sink));
        refresh(&backend, &mut composition).await;
        assert_eq!(composition.members()[0].id, record_id);

        preview.play(candidate.clone(), &sink);
        assert_eq!(*sink.stopped.borrow(), vec![member]);
        assert_eq!(preview.current(), Some(&candidate));
    }

    #[tokio::test]
    async fn rename_trims_and_skips_blank() {
        let backend = FakeBackend::default();
        assert_eq!(rename(&backend, "s1", "  Road trip ").await.as_deref(), Some("Road trip"));
        assert_eq!(rename(&backend, "s1", "   ").await, None);
        assert_eq!(backend.calls(), vec!["rename s1 Road trip"]);
    }

    #[tokio::test]
    async fn logout_sends_refresh_token_and_reports_failure() {
        let backend = FakeBackend::default();
        let session = Session::new("access", "refresh-123");
        assert!(logout(&backend, &session).await.is_err());
        assert_eq!(backend.calls(), vec!["logout refresh-123"]);
    }
}
