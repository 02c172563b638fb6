pub mod backend;
pub mod config;
pub mod edit;
pub mod mutate;
pub mod show;

use std::io::{BufRead, Write};

use examgrid_core::{ApiClient, ClientConfig, ConflictDetail, GridView};

/// Backend client from the local client config.
pub fn api_client() -> Result<ApiClient, Box<dyn std::error::Error>> {
    let config = ClientConfig::load_or_default();
    Ok(ApiClient::from_config(&config)?)
}

/// One runtime per command invocation; every call is driven to
/// completion before the next, so no two requests ever overlap.
pub fn runtime() -> Result<tokio::runtime::Runtime, Box<dyn std::error::Error>> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}

/// Ask the operator a yes/no question on stdin.
pub fn confirm(prompt: &str) -> bool {
    print!("{prompt} [y/N] ");
    let _ = std::io::stdout().flush();
    let mut line = String::new();
    if std::io::stdin().lock().read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Per-student conflict rows, one line each.
pub fn format_conflicts(details: &[ConflictDetail]) -> String {
    details
        .iter()
        .map(|d| {
            let mut line = format!(
                "  student {}: moving {} group {} vs {} group {}",
                d.student, d.moving_course, d.moving_group, d.conflict_course, d.conflict_group
            );
            if let Some(shift) = d.conflict_shift {
                line.push_str(&format!(" (shift {shift})"));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Text rendering of a projected grid: one column block per shift.
pub fn render_grid(view: &GridView) -> String {
    use examgrid_core::CellState;

    let mut out = format!("Day {}\n", view.day);
    for column in &view.columns {
        out.push_str(&format!("Shift {}\n", column.shift));
        for cell in &column.cells {
            let marker = match cell.state {
                CellState::Selected => "*",
                CellState::Occupied => "#",
                CellState::Empty => ".",
            };
            match &cell.occupant {
                Some(group) => out.push_str(&format!(
                    "  [{marker}] {:<12} {} group {}\n",
                    cell.room, group.course, group.group
                )),
                None => out.push_str(&format!("  [{marker}] {:<12} -\n", cell.room)),
            }
        }
    }
    out
}
