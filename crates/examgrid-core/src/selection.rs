//! Operator selection state machine.
//!
//! Two interaction modes share one tagged type so every handler is
//! forced to treat both:
//!
//! ```text
//! Single: Idle -> Armed -> Idle   (re-click, success, or cancel)
//! Multi:  set grows/shrinks per toggle until batch-move or clear
//! ```
//!
//! Only occupied slots are selectable as sources; clicking an empty
//! slot with nothing armed never changes the selection. Selection is
//! transient client state with no backend counterpart.

use crate::schedule::{ExamGroup, SlotKey, Snapshot};

/// One selected source slot together with the group that occupied it
/// at selection time.
#[derive(Debug, Clone, PartialEq)]
pub struct Selected {
    pub key: SlotKey,
    pub group: ExamGroup,
}

/// Current selection, tagged by interaction mode.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// At most one armed source slot.
    Single(Option<Selected>),
    /// Unordered set with set semantics keyed by [`SlotKey`].
    Multi(Vec<Selected>),
}

/// What a click resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// Occupied slot became the armed source (single mode).
    Armed,
    /// The armed slot was re-clicked; back to idle.
    Disarmed,
    /// Slot toggled in or out of the multi set.
    Toggled { selected: bool },
    /// Empty slot with nothing armed; no state change.
    Ignored,
    /// Armed source plus a different empty target: a move attempt.
    /// The armed selection is consumed; a cancelled confirmation
    /// leaves the machine idle, never stuck armed.
    Move { source: Selected, target: SlotKey },
    /// Armed source plus a different occupied target: a swap attempt.
    Swap { source: Selected, target: Selected },
}

impl Selection {
    pub fn single() -> Self {
        Selection::Single(None)
    }

    pub fn multi() -> Self {
        Selection::Multi(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Selection::Single(slot) => slot.is_none(),
            Selection::Multi(set) => set.is_empty(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Selection::Single(slot) => usize::from(slot.is_some()),
            Selection::Multi(set) => set.len(),
        }
    }

    pub fn contains(&self, key: &SlotKey) -> bool {
        match self {
            Selection::Single(slot) => slot.as_ref().is_some_and(|s| s.key == *key),
            Selection::Multi(set) => set.iter().any(|s| s.key == *key),
        }
    }

    pub fn clear(&mut self) {
        match self {
            Selection::Single(slot) => *slot = None,
            Selection::Multi(set) => set.clear(),
        }
    }

    /// The armed single-mode source, if any.
    pub fn armed(&self) -> Option<&Selected> {
        match self {
            Selection::Single(slot) => slot.as_ref(),
            Selection::Multi(_) => None,
        }
    }

    /// The multi-mode set, in toggle order.
    pub fn multi_items(&self) -> &[Selected] {
        match self {
            Selection::Single(_) => &[],
            Selection::Multi(set) => set,
        }
    }

    /// Advance the machine on a slot click.
    ///
    /// Occupancy is resolved against `snapshot` at click time; the
    /// occupant is captured into the selection so a later mutation
    /// request carries exactly what the operator saw.
    pub fn click(&mut self, key: &SlotKey, snapshot: &Snapshot) -> ClickOutcome {
        let occupant = snapshot.occupant_at(key).cloned();
        match self {
            Selection::Single(slot) => match (slot.take(), occupant) {
                (None, Some(group)) => {
                    *slot = Some(Selected {
                        key: key.clone(),
                        group,
                    });
                    ClickOutcome::Armed
                }
                (None, None) => ClickOutcome::Ignored,
                (Some(source), _) if source.key == *key => ClickOutcome::Disarmed,
                (Some(source), Some(group)) => ClickOutcome::Swap {
                    source,
                    target: Selected {
                        key: key.clone(),
                        group,
                    },
                },
                (Some(source), None) => ClickOutcome::Move {
                    source,
                    target: key.clone(),
                },
            },
            Selection::Multi(set) => {
                if let Some(pos) = set.iter().position(|s| s.key == *key) {
                    set.remove(pos);
                    ClickOutcome::Toggled { selected: false }
                } else if let Some(group) = occupant {
                    set.push(Selected {
                        key: key.clone(),
                        group,
                    });
                    ClickOutcome::Toggled { selected: true }
                } else {
                    ClickOutcome::Ignored
                }
            }
        }
    }

    /// Drop entries whose slot no longer resolves to the same group
    /// in the given snapshot. Returns how many were dropped so the
    /// caller can surface a staleness notice.
    pub fn prune_stale(&mut self, snapshot: &Snapshot) -> usize {
        let fresh = |s: &Selected| {
            snapshot
                .occupant_at(&s.key)
                .is_some_and(|g| g.same_identity(&s.group))
        };
        match self {
            Selection::Single(slot) => {
                if slot.as_ref().is_some_and(|s| !fresh(s)) {
                    *slot = None;
                    1
                } else {
                    0
                }
            }
            Selection::Multi(set) => {
                let before = set.len();
                set.retain(fresh);
                before - set.len()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::Snapshot;

    fn group(course: &str, group_no: u32, day: &str, shift: u32, room: &str) -> ExamGroup {
        ExamGroup {
            course: course.to_string(),
            group: group_no,
            day: day.to_string(),
            shift,
            room: Some(room.to_string()),
        }
    }

    fn snapshot() -> Snapshot {
        Snapshot::new(
            vec!["D1".into(), "D2".into()],
            vec![1, 2],
            vec!["Room1".into(), "Room2".into(), "Room3".into()],
            vec![
                group("A", 1, "D1", 1, "Room1"),
                group("B", 2, "D1", 1, "Room2"),
                group("C", 1, "D2", 2, "Room1"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn single_idle_to_armed_on_occupied_click() {
        let snap = snapshot();
        let mut sel = Selection::single();
        let outcome = sel.click(&SlotKey::new("D1", 1, "Room1"), &snap);
        assert_eq!(outcome, ClickOutcome::Armed);
        assert_eq!(sel.armed().unwrap().group.course, "A");
    }

    #[test]
    fn single_idle_ignores_empty_click() {
        let snap = snapshot();
        let mut sel = Selection::single();
        assert_eq!(
            sel.click(&SlotKey::new("D1", 1, "Room3"), &snap),
            ClickOutcome::Ignored
        );
        assert!(sel.is_empty());
    }

    #[test]
    fn single_reclick_disarms() {
        let snap = snapshot();
        let mut sel = Selection::single();
        let key = SlotKey::new("D1", 1, "Room1");
        sel.click(&key, &snap);
        assert_eq!(sel.click(&key, &snap), ClickOutcome::Disarmed);
        assert!(sel.is_empty());
    }

    #[test]
    fn single_armed_plus_empty_target_is_move() {
        let snap = snapshot();
        let mut sel = Selection::single();
        sel.click(&SlotKey::new("D1", 1, "Room1"), &snap);
        let outcome = sel.click(&SlotKey::new("D1", 1, "Room3"), &snap);
        match outcome {
            ClickOutcome::Move { source, target } => {
                assert_eq!(source.group.course, "A");
                assert_eq!(target, SlotKey::new("D1", 1, "Room3"));
            }
            other => panic!("expected Move, got {other:?}"),
        }
        // Armed state is consumed by the attempt.
        assert!(sel.is_empty());
    }

    #[test]
    fn single_armed_plus_occupied_target_is_swap() {
        let snap = snapshot();
        let mut sel = Selection::single();
        sel.click(&SlotKey::new("D1", 1, "Room1"), &snap);
        let outcome = sel.click(&SlotKey::new("D1", 1, "Room2"), &snap);
        match outcome {
            ClickOutcome::Swap { source, target } => {
                assert_eq!(source.group.course, "A");
                assert_eq!(target.group.course, "B");
            }
            other => panic!("expected Swap, got {other:?}"),
        }
        assert!(sel.is_empty());
    }

    #[test]
    fn multi_toggle_and_untoggle() {
        let snap = snapshot();
        let mut sel = Selection::multi();
        let key = SlotKey::new("D1", 1, "Room1");
        assert_eq!(sel.click(&key, &snap), ClickOutcome::Toggled { selected: true });
        assert_eq!(sel.len(), 1);
        assert_eq!(sel.click(&key, &snap), ClickOutcome::Toggled { selected: false });
        assert!(sel.is_empty());
    }

    #[test]
    fn multi_ignores_empty_slot() {
        let snap = snapshot();
        let mut sel = Selection::multi();
        assert_eq!(
            sel.click(&SlotKey::new("D2", 2, "Room3"), &snap),
            ClickOutcome::Ignored
        );
        assert!(sel.is_empty());
    }

    #[test]
    fn multi_never_holds_duplicate_keys() {
        let snap = snapshot();
        let mut sel = Selection::multi();
        let key = SlotKey::new("D1", 1, "Room1");
        sel.click(&key, &snap);
        sel.click(&SlotKey::new("D1", 1, "Room2"), &snap);
        sel.click(&key, &snap); // removes, not duplicates
        assert_eq!(sel.len(), 1);
        assert!(!sel.contains(&key));
    }

    #[test]
    fn prune_drops_entry_whose_occupant_changed() {
        let snap = snapshot();
        let mut sel = Selection::multi();
        sel.click(&SlotKey::new("D1", 1, "Room1"), &snap);
        sel.click(&SlotKey::new("D1", 1, "Room2"), &snap);

        // Refreshed snapshot: "A" moved away, "X" now sits in Room1.
        let refreshed = Snapshot::new(
            vec!["D1".into()],
            vec![1],
            vec!["Room1".into(), "Room2".into()],
            vec![
                group("X", 9, "D1", 1, "Room1"),
                group("B", 2, "D1", 1, "Room2"),
            ],
        )
        .unwrap();

        assert_eq!(sel.prune_stale(&refreshed), 1);
        assert_eq!(sel.len(), 1);
        assert!(sel.contains(&SlotKey::new("D1", 1, "Room2")));
    }

    #[test]
    fn prune_keeps_fresh_single_selection() {
        let snap = snapshot();
        let mut sel = Selection::single();
        sel.click(&SlotKey::new("D1", 1, "Room1"), &snap);
        assert_eq!(sel.prune_stale(&snap), 0);
        assert!(sel.armed().is_some());
    }
}

#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use super::*;
    use crate::schedule::Snapshot;

    fn snapshot() -> Snapshot {
        let rooms: Vec<String> = (1..=3).map(|r| format!("Room{r}")).collect();
        let mut placements = Vec::new();
        // Occupy shift 1 fully, leave shift 2 empty.
        for (i, room) in rooms.iter().enumerate() {
            placements.push(ExamGroup {
                course: format!("C{i}"),
                group: 1,
                day: "D1".into(),
                shift: 1,
                room: Some(room.clone()),
            });
        }
        Snapshot::new(vec!["D1".into()], vec![1, 2], rooms, placements).unwrap()
    }

    fn key_strategy() -> impl Strategy<Value = SlotKey> {
        (1u32..=2, 1u32..=3).prop_map(|(shift, r)| SlotKey::new("D1", shift, format!("Room{r}")))
    }

    proptest! {
        /// Toggling the same slot twice is an involution on membership.
        #[test]
        fn multi_double_toggle_restores_membership(
            setup in proptest::collection::vec(key_strategy(), 0..8),
            key in key_strategy(),
        ) {
            let snap = snapshot();
            let mut sel = Selection::multi();
            for k in &setup {
                sel.click(k, &snap);
            }
            let before: Vec<SlotKey> = sel.multi_items().iter().map(|s| s.key.clone()).collect();
            sel.click(&key, &snap);
            sel.click(&key, &snap);
            let after: Vec<SlotKey> = sel.multi_items().iter().map(|s| s.key.clone()).collect();
            // Set membership is unchanged (order within the set may differ).
            prop_assert_eq!(before.len(), after.len());
            for k in &before {
                prop_assert!(after.contains(k));
            }
        }

        /// Clicking an empty slot never changes either mode's selection.
        #[test]
        fn empty_click_is_a_no_op(
            setup in proptest::collection::vec(key_strategy(), 0..8),
            r in 1u32..=3,
        ) {
            let snap = snapshot();
            let empty = SlotKey::new("D1", 2, format!("Room{r}"));
            prop_assume!(snap.occupant_at(&empty).is_none());

            let mut multi = Selection::multi();
            for k in &setup {
                multi.click(k, &snap);
            }
            let before = multi.clone();
            multi.click(&empty, &snap);
            prop_assert_eq!(before, multi);

            let mut single = Selection::single();
            single.click(&empty, &snap);
            prop_assert!(single.is_empty());
        }
    }
}
