//! # Examgrid Core Library
//!
//! Client-side core for inspecting and manually adjusting a computed
//! exam timetable served by a scheduling backend. The CLI binary is a
//! thin layer over this library.
//!
//! ## Architecture
//!
//! - **Schedule model**: slot addressing plus an occupancy index built
//!   once per snapshot; the snapshot is replaced wholesale on every
//!   refetch, never patched.
//! - **Selection machine**: single select-then-act and multi
//!   select-then-batch-act modes as one tagged type.
//! - **Editor**: owned application state with a reentrancy guard so no
//!   two mutations are ever negotiated concurrently.
//! - **Negotiation**: move/swap/batch-move payloads and the two-tier
//!   conflict classification (hard block vs overridable warning).
//! - **API client**: reqwest client for the backend; collaborating
//!   endpoints (upload, solve, config, results, export) are opaque
//!   success/failure signals.
//! - **Grid**: pure projection of (snapshot, selection) into cells.

pub mod api;
pub mod config;
pub mod editor;
pub mod error;
pub mod grid;
pub mod negotiate;
pub mod schedule;
pub mod selection;

pub use api::{ApiClient, ResultFile};
pub use config::ClientConfig;
pub use editor::{Editor, Mode};
pub use error::{ApiError, ConfigError, CoreError, EditorError, ModelError};
pub use grid::{Cell, CellState, GridView, ShiftColumn};
pub use negotiate::{
    classify, BatchItem, BatchMoveRequest, BatchOutcome, BatchResponse, BatchTarget,
    ConflictDetail, UpdateAction, UpdateRequest,
};
pub use schedule::{ExamGroup, SlotKey, Snapshot};
pub use selection::{ClickOutcome, Selected, Selection};
