//! Composition screen state: candidates, membership, and the pending-delete cycle.
//!
//! Everything here is synchronous. Network work lives in [`crate::workflow`];
//! the screen feeds its results back in through the `finish_*` methods.

use crate::api::{MembershipRecord, Stitch, Track};
use crate::diagnostics::log_failure;
use crate::error::StitchError;
use crate::workflow::RefreshOutcome;

/// Candidates shown under the search box.
pub const CANDIDATE_LIMIT: usize = 3;

/// Monotonic search sequence; only the latest issued request may land.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchFence {
    latest: u64,
}

impl SearchFence {
    pub fn issue(&mut self) -> u64 {
        self.latest = self.latest.saturating_add(1);
        self.latest
    }

    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.latest
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchStep {
    /// Blank query: candidates were cleared, no request to make.
    Cleared,
    Issue { seq: u64, query: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeleteState {
    #[default]
    Idle,
    Deleting(String),
}

/// What the next membership refresh has to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshStep {
    Delete(String),
    List,
}

/// Ticket for one membership refresh, issued when its listing goes out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshTicket {
    pub seq: u64,
    pub stitch_id: String,
    pub step: RefreshStep,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    stitch: Stitch,
    candidates: Vec<Track>,
    members: Vec<MembershipRecord>,
    delete_state: DeleteState,
    pending_adds: u32,
    fence: SearchFence,
    refresh_fence: SearchFence,
    last_applied_refresh: u64,
    // Tickets at or below this were issued for a previous stitch.
    refresh_floor: u64,
    finalized: bool,
}

impl Composition {
    pub fn new(stitch_id: impl Into<String>) -> Self {
        Self {
            stitch: Stitch::new(stitch_id),
            candidates: Vec::new(),
            members: Vec::new(),
            delete_state: DeleteState::Idle,
            pending_adds: 0,
            fence: SearchFence::default(),
            refresh_fence: SearchFence::default(),
            last_applied_refresh: 0,
            refresh_floor: 0,
            finalized: false,
        }
    }

    pub fn stitch(&self) -> &Stitch {
        &self.stitch
    }

    pub fn candidates(&self) -> &[Track] {
        &self.candidates
    }

    pub fn members(&self) -> &[MembershipRecord] {
        &self.members
    }

    pub fn delete_state(&self) -> &DeleteState {
        &self.delete_state
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Switches to another stitch, dropping everything tied to the old one.
    /// Fences keep counting so late responses for the old stitch are ignored.
    /// Returns `false` when `stitch_id` is already the current stitch.
    pub fn retarget(&mut self, stitch_id: &str) -> bool {
        if self.stitch.id == stitch_id {
            return false;
        }
        self.stitch = Stitch::new(stitch_id);
        self.candidates.clear();
        self.members.clear();
        self.delete_state = DeleteState::Idle;
        self.pending_adds = 0;
        self.finalized = false;
        self.fence.issue();
        self.refresh_floor = self.refresh_fence.latest;
        self.last_applied_refresh = self.refresh_fence.latest;
        true
    }

    /// Every keystroke lands here. Only the empty string skips the request;
    /// anything else goes out as typed. Clearing also advances the fence so
    /// an in-flight response cannot repopulate the list.
    pub fn begin_search(&mut self, raw_query: &str) -> SearchStep {
        let seq = self.fence.issue();
        if raw_query.is_empty() {
            self.candidates.clear();
            return SearchStep::Cleared;
        }
        SearchStep::Issue {
            seq,
            query: raw_query.to_string(),
        }
    }

    /// Returns `false` when the response was superseded and dropped.
    pub fn finish_search(&mut self, seq: u64, result: Result<Vec<Track>, StitchError>) -> bool {
        if !self.fence.is_current(seq) {
            return false;
        }
        match result {
            Ok(mut tracks) => {
                tracks.truncate(CANDIDATE_LIMIT);
                self.candidates = tracks;
            }
            Err(err) => {
                log_failure("catalog.search", &err);
                self.candidates.clear();
            }
        }
        true
    }

    /// Adds and deletes never overlap: adding waits for `Idle`.
    pub fn can_add(&self) -> bool {
        !self.finalized && self.delete_state == DeleteState::Idle
    }

    pub fn can_remove(&self) -> bool {
        !self.finalized && self.delete_state == DeleteState::Idle && self.pending_adds == 0
    }

    pub fn begin_add(&mut self) -> bool {
        if !self.can_add() {
            return false;
        }
        self.pending_adds += 1;
        true
    }

    pub fn finish_add(&mut self) {
        self.pending_adds = self.pending_adds.saturating_sub(1);
    }

    /// Moves to `Deleting`. Refused while an add or another delete is in flight.
    pub fn request_remove(&mut self, song_id: impl Into<String>) -> bool {
        if !self.can_remove() {
            return false;
        }
        let song_id = song_id.into();
        if song_id.is_empty() {
            return false;
        }
        self.delete_state = DeleteState::Deleting(song_id);
        true
    }

    pub fn refresh_step(&self) -> RefreshStep {
        match &self.delete_state {
            DeleteState::Deleting(song_id) => RefreshStep::Delete(song_id.clone()),
            DeleteState::Idle => RefreshStep::List,
        }
    }

    pub fn begin_refresh(&mut self) -> RefreshTicket {
        RefreshTicket {
            seq: self.refresh_fence.issue(),
            stitch_id: self.stitch.id.clone(),
            step: self.refresh_step(),
        }
    }

    /// Applies a completed refresh. A finished delete returns to `Idle`
    /// whether or not the server accepted it. Membership from a listing
    /// older than the last one applied is dropped.
    pub fn finish_refresh(&mut self, seq: u64, outcome: RefreshOutcome) {
        if seq <= self.refresh_floor {
            return;
        }
        if outcome.deleted.is_some() {
            self.delete_state = DeleteState::Idle;
        }
        if seq <= self.last_applied_refresh {
            return;
        }
        if let Ok(records) = outcome.members {
            self.last_applied_refresh = seq;
            self.members = records;
            if let Some(cover) = outcome.cover {
                self.stitch.image_url = Some(cover);
            }
        }
    }

    pub fn apply_rename(&mut self, name: &str) {
        self.stitch.name = name.to_string();
    }

    /// Terminal: no further mutation is accepted after this.
    pub fn finalize(&mut self) -> bool {
        if self.finalized {
            return false;
        }
        self.finalized = true;
        true
    }
}

/// Album image of the first record, in server order.
pub fn cover_for(records: &[MembershipRecord]) -> Option<String> {
    records
        .first()
        .and_then(|record| record.album.cover_url())
        .map(str::to_string)
}
