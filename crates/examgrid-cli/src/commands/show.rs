use examgrid_core::{GridView, Selection};

use super::{api_client, render_grid, runtime};

pub fn run(day: &str) -> Result<(), Box<dyn std::error::Error>> {
    let api = api_client()?;
    let rt = runtime()?;
    let snapshot = rt.block_on(api.fetch_snapshot())?;

    if !snapshot.has_day(day) {
        eprintln!(
            "note: day '{day}' is not in the schedule (known days: {})",
            snapshot.days().join(", ")
        );
    }

    let view = GridView::project(&snapshot, &Selection::single(), day);
    print!("{}", render_grid(&view));
    Ok(())
}
