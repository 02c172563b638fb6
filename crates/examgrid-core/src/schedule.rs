//! Timetable data model: slot addressing and schedule snapshots.
//!
//! A [`Snapshot`] is the full picture of one computed timetable: the
//! grid dimensions (days, shifts, rooms) plus the flat list of placed
//! exam groups. It is immutable until replaced wholesale by a fresh
//! fetch; occupancy is derived from the placements through an index
//! built once at construction, never stored independently.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Addressable grid cell: one room in one shift of one exam day.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotKey {
    pub day: String,
    pub shift: u32,
    pub room: String,
}

impl SlotKey {
    pub fn new(day: impl Into<String>, shift: u32, room: impl Into<String>) -> Self {
        Self {
            day: day.into(),
            shift,
            room: room.into(),
        }
    }
}

impl std::fmt::Display for SlotKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} shift {} room {}", self.day, self.shift, self.room)
    }
}

/// An exam group placed somewhere in the timetable.
///
/// Identity is (course, group); a valid snapshot holds at most one
/// placement per identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamGroup {
    /// Course code, e.g. "MATH101".
    pub course: String,
    /// Group / section number within the course.
    pub group: u32,
    pub day: String,
    pub shift: u32,
    /// Empty or missing means the backend left the room unassigned.
    #[serde(default)]
    pub room: Option<String>,
}

impl ExamGroup {
    /// The slot this group occupies, or `None` while its room is
    /// unassigned. An unassigned placement occupies no grid cell.
    pub fn slot_key(&self) -> Option<SlotKey> {
        let room = self.room.as_deref()?.trim();
        if room.is_empty() {
            return None;
        }
        Some(SlotKey::new(self.day.clone(), self.shift, room))
    }

    /// Same (course, group) identity, regardless of current location.
    pub fn same_identity(&self, other: &ExamGroup) -> bool {
        self.course == other.course && self.group == other.group
    }
}

impl std::fmt::Display for ExamGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} group {}", self.course, self.group)
    }
}

/// Immutable-until-replaced picture of the whole timetable.
///
/// Days are chronological as supplied by the backend; shifts and rooms
/// keep the backend's display order. The snapshot never reorders.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    days: Vec<String>,
    shifts: Vec<u32>,
    rooms: Vec<String>,
    placements: Vec<ExamGroup>,
    /// Occupancy index keyed by slot, one generation per snapshot.
    index: HashMap<SlotKey, usize>,
}

impl Snapshot {
    /// Build a snapshot, indexing occupancy by slot.
    ///
    /// Rejects two placements sharing a (day, shift, room) key. The
    /// dimension lists are display data supplied by the backend and
    /// are not cross-checked against the placements here.
    pub fn new(
        days: Vec<String>,
        shifts: Vec<u32>,
        rooms: Vec<String>,
        placements: Vec<ExamGroup>,
    ) -> Result<Self, ModelError> {
        let mut index = HashMap::with_capacity(placements.len());
        for (i, placement) in placements.iter().enumerate() {
            let Some(key) = placement.slot_key() else {
                continue; // Unassigned room, occupies nothing.
            };
            if index.insert(key.clone(), i).is_some() {
                return Err(ModelError::DuplicatePlacement {
                    day: key.day,
                    shift: key.shift,
                    room: key.room,
                });
            }
        }
        Ok(Self {
            days,
            shifts,
            rooms,
            placements,
            index,
        })
    }

    /// The exam group occupying a slot, if any. O(1).
    pub fn occupant_at(&self, key: &SlotKey) -> Option<&ExamGroup> {
        self.index.get(key).map(|&i| &self.placements[i])
    }

    /// Locate a placement by (course, group) identity.
    pub fn find_group(&self, course: &str, group: u32) -> Option<&ExamGroup> {
        self.placements
            .iter()
            .find(|p| p.course == course && p.group == group)
    }

    pub fn days(&self) -> &[String] {
        &self.days
    }

    pub fn shifts(&self) -> &[u32] {
        &self.shifts
    }

    pub fn rooms(&self) -> &[String] {
        &self.rooms
    }

    pub fn placements(&self) -> &[ExamGroup] {
        &self.placements
    }

    pub fn has_day(&self, day: &str) -> bool {
        self.days.iter().any(|d| d == day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(course: &str, group_no: u32, day: &str, shift: u32, room: &str) -> ExamGroup {
        ExamGroup {
            course: course.to_string(),
            group: group_no,
            day: day.to_string(),
            shift,
            room: Some(room.to_string()),
        }
    }

    fn two_room_snapshot() -> Snapshot {
        Snapshot::new(
            vec!["D1".into()],
            vec![1],
            vec!["Room1".into(), "Room2".into()],
            vec![group("A", 1, "D1", 1, "Room1")],
        )
        .unwrap()
    }

    #[test]
    fn occupant_at_matches_exactly_one_slot() {
        let snap = two_room_snapshot();
        let found = snap.occupant_at(&SlotKey::new("D1", 1, "Room1")).unwrap();
        assert_eq!(found.course, "A");
        assert!(snap.occupant_at(&SlotKey::new("D1", 1, "Room2")).is_none());
    }

    #[test]
    fn duplicate_placement_is_rejected() {
        let result = Snapshot::new(
            vec!["D1".into()],
            vec![1],
            vec!["Room1".into()],
            vec![
                group("A", 1, "D1", 1, "Room1"),
                group("B", 2, "D1", 1, "Room1"),
            ],
        );
        assert!(matches!(
            result,
            Err(ModelError::DuplicatePlacement { ref room, .. }) if room == "Room1"
        ));
    }

    #[test]
    fn unassigned_room_occupies_no_slot() {
        let mut unplaced = group("C", 3, "D1", 1, "");
        unplaced.room = Some("  ".to_string());
        let snap = Snapshot::new(
            vec!["D1".into()],
            vec![1],
            vec!["Room1".into()],
            vec![unplaced.clone(), group("A", 1, "D1", 1, "Room1")],
        )
        .unwrap();
        assert!(unplaced.slot_key().is_none());
        assert_eq!(snap.placements().len(), 2);
        assert_eq!(
            snap.occupant_at(&SlotKey::new("D1", 1, "Room1")).unwrap().course,
            "A"
        );
    }

    #[test]
    fn wire_record_without_room_deserializes() {
        let parsed: ExamGroup =
            serde_json::from_str(r#"{"course":"PHY201","group":2,"day":"D2","shift":3}"#).unwrap();
        assert_eq!(parsed.room, None);
        assert!(parsed.slot_key().is_none());
    }

    #[test]
    fn find_group_by_identity() {
        let snap = two_room_snapshot();
        assert!(snap.find_group("A", 1).is_some());
        assert!(snap.find_group("A", 2).is_none());
    }
}
