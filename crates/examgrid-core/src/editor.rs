//! Owned editing state: snapshot cache, selection, reentrancy guard.
//!
//! The editor is the single place the snapshot cell is written and the
//! selection is mutated; callers drive it event by event on one
//! control flow. Nothing here talks to the network -- the editor turns
//! clicks into ready-to-send requests and the caller submits them,
//! refetching on success.

use crate::error::EditorError;
use crate::negotiate::{BatchMoveRequest, BatchTarget, UpdateRequest};
use crate::schedule::{SlotKey, Snapshot};
use crate::selection::{ClickOutcome, Selection};

/// Interaction mode for the selection machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Single,
    Multi,
}

/// Client-side editing state for one schedule.
#[derive(Debug)]
pub struct Editor {
    cache: Option<Snapshot>,
    selection: Selection,
    /// Set while a mutation is being negotiated; guards re-entry and
    /// keeps selection and snapshot read-only until it resolves.
    in_flight: bool,
}

impl Editor {
    pub fn new() -> Self {
        Self {
            cache: None,
            selection: Selection::single(),
            in_flight: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.cache.as_ref()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn mode(&self) -> Mode {
        match self.selection {
            Selection::Single(_) => Mode::Single,
            Selection::Multi(_) => Mode::Multi,
        }
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Replace the cached snapshot wholesale and prune selection
    /// entries it invalidated. Returns how many were dropped.
    ///
    /// Rejected while a mutation is in flight: the snapshot and
    /// selection stay frozen until the negotiation resolves.
    pub fn install_snapshot(&mut self, snapshot: Snapshot) -> Result<usize, EditorError> {
        if self.in_flight {
            return Err(EditorError::Busy);
        }
        let pruned = self.selection.prune_stale(&snapshot);
        self.cache = Some(snapshot);
        Ok(pruned)
    }

    /// Switch interaction mode, discarding any current selection.
    pub fn set_mode(&mut self, mode: Mode) -> Result<(), EditorError> {
        if self.in_flight {
            return Err(EditorError::Busy);
        }
        if self.mode() == mode {
            return Ok(());
        }
        self.selection = match mode {
            Mode::Single => Selection::single(),
            Mode::Multi => Selection::multi(),
        };
        Ok(())
    }

    /// Advance the selection machine on a slot click.
    ///
    /// Rejected while a mutation is in flight: operator input must not
    /// race a pending negotiation.
    pub fn click(&mut self, key: &SlotKey) -> Result<ClickOutcome, EditorError> {
        if self.in_flight {
            return Err(EditorError::Busy);
        }
        let snapshot = self.cache.as_ref().ok_or(EditorError::NoSnapshot)?;
        Ok(self.selection.click(key, snapshot))
    }

    pub fn clear_selection(&mut self) -> Result<(), EditorError> {
        if self.in_flight {
            return Err(EditorError::Busy);
        }
        self.selection.clear();
        Ok(())
    }

    /// Build a move/swap request from a click outcome, or `None` for
    /// outcomes that only changed selection state.
    pub fn update_request(outcome: &ClickOutcome) -> Option<UpdateRequest> {
        match outcome {
            ClickOutcome::Move { source, target } => {
                Some(UpdateRequest::moving(source, target.clone()))
            }
            ClickOutcome::Swap { source, target } => Some(UpdateRequest::swapping(source, target)),
            _ => None,
        }
    }

    /// Build the batch payload from the current multi selection.
    pub fn batch_request(&self, target: BatchTarget) -> Result<BatchMoveRequest, EditorError> {
        match &self.selection {
            Selection::Single(_) => Err(EditorError::WrongMode { expected: "multi" }),
            Selection::Multi(set) if set.is_empty() => Err(EditorError::EmptySelection),
            Selection::Multi(set) => Ok(BatchMoveRequest::from_selection(set, target)),
        }
    }

    /// Mark a mutation as started. Fails if one is already pending so
    /// two negotiations can never be in flight at once.
    pub fn begin_mutation(&mut self) -> Result<(), EditorError> {
        if self.in_flight {
            return Err(EditorError::Busy);
        }
        self.in_flight = true;
        Ok(())
    }

    /// Resolve the pending mutation. On success the selection is
    /// cleared; on failure it is left exactly as it was.
    pub fn finish_mutation(&mut self, succeeded: bool) {
        self.in_flight = false;
        if succeeded {
            self.selection.clear();
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}
