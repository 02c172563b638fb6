//! Mutation requests and conflict classification.
//!
//! Move and swap are plain request/acknowledge exchanges; a batch move
//! is a two-phase negotiation. The backend's rejection is classified
//! into exactly one outcome:
//!
//! - hard conflict (`CONFLICT_SHIFT`): a student would sit two exams
//!   in the same shift. Physically impossible, never overridable.
//! - soft conflict (`WARNING_SAME_DAY` with `can_force`): a student
//!   would sit two exams on the same day in different shifts.
//!   Tolerable policy-wise; the operator may confirm and retry the
//!   identical request with `force` set.
//!
//! Classification never re-issues anything: a soft conflict carries
//! the ready-to-send retry request and the caller decides.

use serde::{Deserialize, Serialize};

use crate::schedule::{ExamGroup, SlotKey};
use crate::selection::Selected;

pub const CONFLICT_SHIFT: &str = "CONFLICT_SHIFT";
pub const WARNING_SAME_DAY: &str = "WARNING_SAME_DAY";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateAction {
    Move,
    Swap,
}

/// Single move/swap payload for `POST /api/schedule/update`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateRequest {
    pub action: UpdateAction,
    /// The group being relocated, at its current placement.
    pub source: ExamGroup,
    /// Destination slot. For a swap this is the other group's slot;
    /// the backend exchanges both atomically.
    pub target: SlotKey,
}

impl UpdateRequest {
    pub fn moving(source: &Selected, target: SlotKey) -> Self {
        Self {
            action: UpdateAction::Move,
            source: source.group.clone(),
            target,
        }
    }

    pub fn swapping(source: &Selected, target: &Selected) -> Self {
        Self {
            action: UpdateAction::Swap,
            source: source.group.clone(),
            target: target.key.clone(),
        }
    }
}

/// One moving group, identified for the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchItem {
    pub course: String,
    pub group: u32,
}

/// Common destination for a batch move. Room assignment within the
/// shift is the backend's decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchTarget {
    pub day: String,
    pub shift: u32,
}

/// Payload for `POST /api/schedule/batch-update`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchMoveRequest {
    pub items: Vec<BatchItem>,
    pub target: BatchTarget,
    pub force: bool,
}

impl BatchMoveRequest {
    pub fn new(items: Vec<BatchItem>, target: BatchTarget) -> Self {
        Self {
            items,
            target,
            force: false,
        }
    }

    /// Build the payload from a multi-mode selection.
    pub fn from_selection(selected: &[Selected], target: BatchTarget) -> Self {
        let items = selected
            .iter()
            .map(|s| BatchItem {
                course: s.group.course.clone(),
                group: s.group.group,
            })
            .collect();
        Self::new(items, target)
    }

    /// The identical request with the override flag set.
    pub fn forced(&self) -> Self {
        Self {
            force: true,
            ..self.clone()
        }
    }
}

/// Per-student obstruction row reported by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictDetail {
    pub student: String,
    pub moving_course: String,
    pub moving_group: u32,
    pub conflict_course: String,
    pub conflict_group: u32,
    /// Present only for same-day conflicts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflict_shift: Option<u32>,
}

/// Raw batch-update response body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BatchResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub can_force: bool,
    #[serde(default)]
    pub conflict_details: Vec<ConflictDetail>,
}

/// Classified result of one batch-move attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome {
    Success(String),
    /// Same-shift double-booking; terminates the operation.
    HardConflict {
        error: String,
        details: Vec<ConflictDetail>,
    },
    /// Same-day repetition; the caller may submit `retry` after the
    /// operator confirms.
    SoftConflict {
        error: String,
        details: Vec<ConflictDetail>,
        retry: BatchMoveRequest,
    },
    /// Unstructured rejection, shown verbatim.
    Rejected(String),
}

/// Classify a batch-update response against the request that produced
/// it. A `CONFLICT_SHIFT` rejection is hard regardless of `can_force`;
/// a `WARNING_SAME_DAY` without `can_force` degrades to a plain
/// rejection.
pub fn classify(request: &BatchMoveRequest, response: BatchResponse) -> BatchOutcome {
    if response.success {
        return BatchOutcome::Success(
            response
                .message
                .unwrap_or_else(|| "schedule updated".to_string()),
        );
    }
    let error = response
        .error
        .unwrap_or_else(|| "unknown error".to_string());
    match response.error_type.as_deref() {
        Some(CONFLICT_SHIFT) => BatchOutcome::HardConflict {
            error,
            details: response.conflict_details,
        },
        Some(WARNING_SAME_DAY) if response.can_force => BatchOutcome::SoftConflict {
            error,
            details: response.conflict_details,
            retry: request.forced(),
        },
        _ => BatchOutcome::Rejected(error),
    }
}
