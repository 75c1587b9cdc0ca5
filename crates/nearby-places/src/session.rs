//! Search session: keeps the latest committed results and refuses stale ones.
//!
//! Every search takes a [`SearchTicket`] from [`SearchSession::begin`]. A
//! ticket can only be committed while it is the most recently issued one,
//! so a slow response from a superseded search never replaces the results
//! of a newer search.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::client::PlacesClient;
use crate::error::PlacesError;
use crate::search::{run_search, SearchOutcome, SearchRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket {
    seq: u64,
}

impl SearchTicket {
    #[must_use]
    pub fn seq(self) -> u64 {
        self.seq
    }
}

/// Immutable view of one committed search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSnapshot {
    pub seq: u64,
    pub request: SearchRequest,
    pub outcome: SearchOutcome,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommitResult {
    Applied(Arc<SearchSnapshot>),
    /// A newer search was started (or the session cleared) after this ticket.
    Stale { ticket: u64, latest: u64 },
}

#[derive(Debug, Default)]
struct SessionState {
    committed_seq: u64,
    snapshot: Option<Arc<SearchSnapshot>>,
}

#[derive(Debug, Default)]
pub struct SearchSession {
    issued: AtomicU64,
    state: Mutex<SessionState>,
}

impl SearchSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new search, superseding any search still in flight.
    pub fn begin(&self) -> SearchTicket {
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        SearchTicket { seq }
    }

    /// Install `outcome` if `ticket` is still the latest search.
    pub fn commit(
        &self,
        ticket: SearchTicket,
        request: SearchRequest,
        outcome: SearchOutcome,
    ) -> CommitResult {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let latest = self.issued.load(Ordering::SeqCst);

        if ticket.seq != latest || ticket.seq <= state.committed_seq {
            tracing::warn!(
                ticket = ticket.seq,
                latest,
                committed = state.committed_seq,
                "discarding stale search response"
            );
            return CommitResult::Stale {
                ticket: ticket.seq,
                latest,
            };
        }

        let snapshot = Arc::new(SearchSnapshot {
            seq: ticket.seq,
            request,
            outcome,
        });
        state.committed_seq = ticket.seq;
        state.snapshot = Some(Arc::clone(&snapshot));
        CommitResult::Applied(snapshot)
    }

    /// Begin, run, and commit one search.
    ///
    /// # Errors
    ///
    /// Returns any error from [`run_search`]; nothing is committed then and
    /// the previous snapshot stays in place.
    pub async fn search(
        &self,
        client: &PlacesClient,
        request: SearchRequest,
    ) -> Result<CommitResult, PlacesError> {
        let ticket = self.begin();
        let outcome = run_search(client, &request).await?;
        Ok(self.commit(ticket, request, outcome))
    }

    /// Latest committed search, if any.
    #[must_use]
    pub fn snapshot(&self) -> Option<Arc<SearchSnapshot>> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .snapshot
            .clone()
    }

    /// Drop current results and invalidate every outstanding ticket.
    pub fn clear(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        state.committed_seq = seq;
        state.snapshot = None;
    }
}
