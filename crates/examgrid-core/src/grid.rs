//! Pure projection of (snapshot, selection) into renderable cells.
//!
//! The view is re-derived from state on every call and holds nothing
//! of its own; rendering it twice yields the same value. Presentation
//! ephemera such as scroll offsets belong to the caller.

use crate::schedule::{ExamGroup, SlotKey, Snapshot};
use crate::selection::Selection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Empty,
    Occupied,
    Selected,
}

/// One room cell within a shift column.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub room: String,
    pub state: CellState,
    pub occupant: Option<ExamGroup>,
}

/// All room cells of one shift on the viewed day.
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftColumn {
    pub shift: u32,
    pub cells: Vec<Cell>,
}

/// Renderable grid for a single day.
#[derive(Debug, Clone, PartialEq)]
pub struct GridView {
    pub day: String,
    pub columns: Vec<ShiftColumn>,
}

impl GridView {
    /// Project one day of the snapshot through the selection.
    pub fn project(snapshot: &Snapshot, selection: &Selection, day: &str) -> GridView {
        let columns = snapshot
            .shifts()
            .iter()
            .map(|&shift| ShiftColumn {
                shift,
                cells: snapshot
                    .rooms()
                    .iter()
                    .map(|room| {
                        let key = SlotKey::new(day, shift, room.clone());
                        let occupant = snapshot.occupant_at(&key).cloned();
                        let state = if selection.contains(&key) {
                            CellState::Selected
                        } else if occupant.is_some() {
                            CellState::Occupied
                        } else {
                            CellState::Empty
                        };
                        Cell {
                            room: room.clone(),
                            state,
                            occupant,
                        }
                    })
                    .collect(),
            })
            .collect();
        GridView {
            day: day.to_string(),
            columns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> Snapshot {
        Snapshot::new(
            vec!["D1".into()],
            vec![1, 2],
            vec!["Room1".into(), "Room2".into()],
            vec![ExamGroup {
                course: "A".into(),
                group: 1,
                day: "D1".into(),
                shift: 1,
                room: Some("Room1".into()),
            }],
        )
        .unwrap()
    }

    #[test]
    fn projects_empty_occupied_and_selected_states() {
        let snap = snapshot();
        let mut sel = Selection::multi();
        sel.click(&SlotKey::new("D1", 1, "Room1"), &snap);

        let view = GridView::project(&snap, &sel, "D1");
        assert_eq!(view.columns.len(), 2);

        let shift1 = &view.columns[0];
        assert_eq!(shift1.cells[0].state, CellState::Selected);
        assert_eq!(shift1.cells[0].occupant.as_ref().unwrap().course, "A");
        assert_eq!(shift1.cells[1].state, CellState::Empty);

        let shift2 = &view.columns[1];
        assert!(shift2.cells.iter().all(|c| c.state == CellState::Empty));
    }

    #[test]
    fn projection_is_idempotent() {
        let snap = snapshot();
        let sel = Selection::single();
        let first = GridView::project(&snap, &sel, "D1");
        let second = GridView::project(&snap, &sel, "D1");
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_day_renders_all_empty() {
        let snap = snapshot();
        let view = GridView::project(&snap, &Selection::single(), "D9");
        assert!(view
            .columns
            .iter()
            .flat_map(|c| &c.cells)
            .all(|c| c.state == CellState::Empty));
    }
}
