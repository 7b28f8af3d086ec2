//! Path-driven repository explorer.
//!
//! The state machine is I/O free: every operation that needs the network hands
//! out a [`Ticket`] and the caller reports the outcome through one of the
//! `complete_*` methods. Each new request bumps the generation counter, so a
//! completion carrying an older ticket is dropped (last request wins).

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::application::errors::SyncError;
use crate::application::services::codec::{self, ContentFormatError, DecodedContent};
use crate::domain::repository::config::{ConfigIncomplete, trim_slashes};
use crate::domain::repository::content::{RemoteEntry, RepositoryContents};

pub const CANCELLED_MESSAGE: &str = "request cancelled";

/// Lock the shared explorer. Critical sections never await, so a plain mutex
/// is enough and it can also be taken from `Drop`.
pub fn lock_explorer(shared: &Mutex<Explorer>) -> MutexGuard<'_, Explorer> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

fn parent_dir(path: &str) -> &str {
    path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplorerPhase {
    Idle,
    Listing,
    Listed,
    PreviewLoading,
    Previewing,
    Failed,
}

impl ExplorerPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExplorerPhase::Idle => "idle",
            ExplorerPhase::Listing => "listing",
            ExplorerPhase::Listed => "listed",
            ExplorerPhase::PreviewLoading => "preview_loading",
            ExplorerPhase::Previewing => "previewing",
            ExplorerPhase::Failed => "failed",
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, ExplorerPhase::Listing | ExplorerPhase::PreviewLoading)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewBody {
    Image { src: String },
    Text { text: String },
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub name: String,
    pub path: String,
    pub html_url: Option<String>,
    pub body: PreviewBody,
}

impl Preview {
    /// Decode the inline content of an individually fetched file.
    pub fn from_entry(entry: &RemoteEntry) -> Result<Self, ContentFormatError> {
        let body = match entry.content.as_deref() {
            None => PreviewBody::Empty,
            Some(raw) => match codec::decode(raw, codec::extension_of(&entry.name))? {
                DecodedContent::Image { data_uri } => PreviewBody::Image { src: data_uri },
                DecodedContent::Text(text) => PreviewBody::Text { text },
                DecodedContent::Empty => PreviewBody::Empty,
            },
        };
        Ok(Self {
            name: entry.name.clone(),
            path: entry.path.clone(),
            html_url: entry.links.html_url.clone(),
            body,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Directory(Ticket),
    File(Ticket),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// A newer request superseded this one; the result was discarded.
    Stale,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ExplorerError {
    #[error("another request is still in flight")]
    Busy,
    #[error("no entry at '{0}' in the current listing")]
    UnknownEntry(String),
    #[error("nothing to retry")]
    NothingToRetry,
    #[error(transparent)]
    ConfigIncomplete(#[from] ConfigIncomplete),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerView {
    pub phase: ExplorerPhase,
    pub current_path: String,
    pub last_attempted: Option<String>,
    pub entries: Vec<RemoteEntry>,
    pub preview: Option<Preview>,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Explorer {
    phase: ExplorerPhase,
    // Settled phase to fall back to when an in-flight request is abandoned.
    resume: ExplorerPhase,
    generation: u64,
    current_path: String,
    last_attempted: Option<String>,
    entries: Vec<RemoteEntry>,
    preview: Option<Preview>,
    error: Option<String>,
}

impl Default for Explorer {
    fn default() -> Self {
        Self::new()
    }
}

impl Explorer {
    pub fn new() -> Self {
        Self {
            phase: ExplorerPhase::Idle,
            resume: ExplorerPhase::Idle,
            generation: 0,
            current_path: String::new(),
            last_attempted: None,
            entries: Vec::new(),
            preview: None,
            error: None,
        }
    }

    pub fn phase(&self) -> ExplorerPhase {
        self.phase
    }

    pub fn view(&self) -> ExplorerView {
        ExplorerView {
            phase: self.phase,
            current_path: self.current_path.clone(),
            last_attempted: self.last_attempted.clone(),
            entries: self.entries.clone(),
            preview: self.preview.clone(),
            error: self.error.clone(),
        }
    }

    fn issue(&mut self, busy: ExplorerPhase, path: &str) -> Ticket {
        if !self.phase.is_busy() {
            self.resume = self.phase;
        }
        self.phase = busy;
        self.generation += 1;
        self.last_attempted = Some(path.to_string());
        self.error = None;
        Ticket {
            generation: self.generation,
            path: path.to_string(),
        }
    }

    fn is_current(&self, ticket: &Ticket) -> bool {
        ticket.generation == self.generation
    }

    /// User-initiated navigation. Always accepted; supersedes anything in flight.
    pub fn submit(&mut self, path: &str) -> Ticket {
        let path = trim_slashes(path.trim()).to_string();
        self.issue(ExplorerPhase::Listing, &path)
    }

    /// Open an entry of the current listing.
    pub fn select(&mut self, path: &str) -> Result<Selection, ExplorerError> {
        if self.phase.is_busy() {
            return Err(ExplorerError::Busy);
        }
        let entry = self
            .entries
            .iter()
            .find(|e| e.path == path)
            .cloned()
            .ok_or_else(|| ExplorerError::UnknownEntry(path.to_string()))?;
        if entry.is_dir() {
            Ok(Selection::Directory(self.submit(&entry.path)))
        } else {
            Ok(Selection::File(
                self.issue(ExplorerPhase::PreviewLoading, &entry.path),
            ))
        }
    }

    pub fn retry(&mut self) -> Result<Ticket, ExplorerError> {
        if self.phase != ExplorerPhase::Failed {
            return Err(ExplorerError::NothingToRetry);
        }
        let path = self
            .last_attempted
            .clone()
            .ok_or(ExplorerError::NothingToRetry)?;
        Ok(self.submit(&path))
    }

    /// Back to the unselected state; in-flight results become stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.phase = ExplorerPhase::Idle;
        self.resume = ExplorerPhase::Idle;
        self.current_path.clear();
        self.last_attempted = None;
        self.entries.clear();
        self.preview = None;
        self.error = None;
    }

    pub fn complete_listing(
        &mut self,
        ticket: &Ticket,
        result: Result<RepositoryContents, SyncError>,
    ) -> Completion {
        if !self.is_current(ticket) {
            return Completion::Stale;
        }
        match result {
            Ok(RepositoryContents::Listing(entries)) => {
                self.entries = entries;
                self.preview = None;
                self.current_path = ticket.path.clone();
                self.phase = ExplorerPhase::Listed;
            }
            Ok(RepositoryContents::SingleFile(entry)) => {
                self.entries.clear();
                self.current_path = parent_dir(&entry.path).to_string();
                self.show_preview(&entry);
            }
            Err(err) => self.fail(err.to_string()),
        }
        Completion::Applied
    }

    pub fn complete_preview(
        &mut self,
        ticket: &Ticket,
        result: Result<RemoteEntry, SyncError>,
    ) -> Completion {
        if !self.is_current(ticket) {
            return Completion::Stale;
        }
        match result {
            Ok(entry) => self.show_preview(&entry),
            Err(err) => self.fail(err.to_string()),
        }
        Completion::Applied
    }

    /// The request behind `ticket` was dropped before completing: go back to
    /// the phase the explorer was in before it, keeping entries and preview.
    pub fn abandon(&mut self, ticket: &Ticket) -> Completion {
        if !self.is_current(ticket) {
            return Completion::Stale;
        }
        self.generation += 1;
        self.phase = self.resume;
        if self.phase == ExplorerPhase::Failed {
            self.error = Some(CANCELLED_MESSAGE.to_string());
        }
        Completion::Applied
    }

    fn show_preview(&mut self, entry: &RemoteEntry) {
        match Preview::from_entry(entry) {
            Ok(preview) => {
                self.preview = Some(preview);
                self.phase = ExplorerPhase::Previewing;
            }
            Err(err) => self.fail(err.to_string()),
        }
    }

    fn fail(&mut self, message: String) {
        self.entries.clear();
        self.preview = None;
        self.error = Some(message);
        self.phase = ExplorerPhase::Failed;
    }
}
