use std::sync::Mutex;

use crate::application::ports::repository_content::RepositoryContentPort;
use crate::application::services::explorer::{
    Completion, Explorer, ExplorerView, Ticket, lock_explorer,
};
use crate::application::use_cases::contents::get_file::GetFile;
use crate::application::use_cases::contents::list_contents::ListContents;
use crate::domain::repository::config::RepositoryConfig;

/// Ticket of a request in flight. Dropping it without [`InFlight::finish`]
/// (the caller's future was cancelled) abandons the request so the explorer
/// does not stay busy.
struct InFlight<'a> {
    explorer: &'a Mutex<Explorer>,
    ticket: Option<Ticket>,
}

impl<'a> InFlight<'a> {
    fn new(explorer: &'a Mutex<Explorer>, ticket: Ticket) -> Self {
        Self {
            explorer,
            ticket: Some(ticket),
        }
    }

    fn path(&self) -> &str {
        self.ticket.as_ref().map(|t| t.path.as_str()).unwrap_or("")
    }

    fn finish(mut self) -> Option<Ticket> {
        self.ticket.take()
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if let Some(ticket) = self.ticket.take() {
            if lock_explorer(self.explorer).abandon(&ticket) == Completion::Applied {
                tracing::debug!(path = %ticket.path, "explorer_request_cancelled");
            }
        }
    }
}

/// Fetch the listing for `ticket` and fold the result into the explorer. The
/// lock is released while the request is in flight so a newer submit can
/// supersede it.
pub async fn run_listing<C: RepositoryContentPort + ?Sized>(
    contents: &C,
    explorer: &Mutex<Explorer>,
    cfg: &RepositoryConfig,
    ticket: Ticket,
) -> ExplorerView {
    let pending = InFlight::new(explorer, ticket);
    let result = ListContents { contents }.execute(cfg, pending.path()).await;
    let mut state = lock_explorer(explorer);
    if let Some(ticket) = pending.finish() {
        if state.complete_listing(&ticket, result) == Completion::Stale {
            tracing::debug!(path = %ticket.path, "explorer_listing_superseded");
        }
    }
    state.view()
}

pub async fn run_preview<C: RepositoryContentPort + ?Sized>(
    contents: &C,
    explorer: &Mutex<Explorer>,
    cfg: &RepositoryConfig,
    ticket: Ticket,
) -> ExplorerView {
    let pending = InFlight::new(explorer, ticket);
    let result = GetFile { contents }.execute(cfg, pending.path()).await;
    let mut state = lock_explorer(explorer);
    if let Some(ticket) = pending.finish() {
        if state.complete_preview(&ticket, result) == Completion::Stale {
            tracing::debug!(path = %ticket.path, "explorer_preview_superseded");
        }
    }
    state.view()
}
