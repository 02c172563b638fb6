//! Interactive editing session.
//!
//! Reads slot clicks from stdin and drives the selection machine the
//! same way a pointer-driven UI would: occupied slots arm or toggle,
//! a second click resolves to a move or swap, multi mode accumulates
//! a set for a batch move.

use std::io::{BufRead, Write};

use examgrid_core::{
    ApiClient, BatchTarget, ClickOutcome, Editor, GridView, Mode, SlotKey, UpdateAction,
};
use tokio::runtime::Runtime;

use super::mutate::negotiate_batch;
use super::{api_client, confirm, render_grid, runtime};

const HELP: &str = "\
commands:
  day DAY            choose the day to view
  mode single|multi  switch selection mode (clears selection)
  click SHIFT ROOM   click a slot on the viewed day
  batch DAY SHIFT    batch-move the multi selection
  clear              clear the selection
  show               re-render the grid
  quit               leave the editor";

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let api = api_client()?;
    let rt = runtime()?;

    let mut editor = Editor::new();
    let snapshot = rt.block_on(api.fetch_snapshot())?;
    editor.install_snapshot(snapshot)?;
    println!(
        "loaded schedule: {} day(s), {} placements",
        editor.snapshot().map_or(0, |s| s.days().len()),
        editor.snapshot().map_or(0, |s| s.placements().len())
    );
    println!("{HELP}");

    let mut day: Option<String> = None;
    let stdin = std::io::stdin();
    loop {
        print!("> ");
        let _ = std::io::stdout().flush();
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            continue;
        };
        let args: Vec<&str> = parts.collect();

        let result = match command {
            "day" => set_day(&mut day, &editor, &args),
            "mode" => set_mode(&mut editor, &args),
            "click" => handle_click(&mut editor, &api, &rt, day.as_deref(), &args),
            "batch" => handle_batch(&mut editor, &api, &rt, &args),
            "clear" => {
                editor.clear_selection()?;
                println!("selection cleared");
                Ok(())
            }
            "show" => {
                show(&editor, day.as_deref());
                Ok(())
            }
            "help" => {
                println!("{HELP}");
                Ok(())
            }
            "quit" | "exit" => break,
            other => {
                println!("unknown command '{other}' (try 'help')");
                Ok(())
            }
        };
        if let Err(e) = result {
            println!("error: {e}");
        }
    }
    Ok(())
}

fn set_day(
    day: &mut Option<String>,
    editor: &Editor,
    args: &[&str],
) -> Result<(), Box<dyn std::error::Error>> {
    let [chosen] = args else {
        return Err("usage: day DAY".into());
    };
    if let Some(snapshot) = editor.snapshot() {
        if !snapshot.has_day(chosen) {
            println!(
                "note: '{chosen}' is not a known day ({})",
                snapshot.days().join(", ")
            );
        }
    }
    *day = Some(chosen.to_string());
    show(editor, day.as_deref());
    Ok(())
}

fn set_mode(editor: &mut Editor, args: &[&str]) -> Result<(), Box<dyn std::error::Error>> {
    match args {
        ["single"] => editor.set_mode(Mode::Single)?,
        ["multi"] => editor.set_mode(Mode::Multi)?,
        _ => return Err("usage: mode single|multi".into()),
    }
    println!("mode set");
    Ok(())
}

fn handle_click(
    editor: &mut Editor,
    api: &ApiClient,
    rt: &Runtime,
    day: Option<&str>,
    args: &[&str],
) -> Result<(), Box<dyn std::error::Error>> {
    let [shift, room] = args else {
        return Err("usage: click SHIFT ROOM".into());
    };
    let day = day.ok_or("choose a day first (day DAY)")?;
    let shift: u32 = shift.parse().map_err(|_| "shift must be a number")?;
    let key = SlotKey::new(day, shift, *room);

    let outcome = editor.click(&key)?;
    match &outcome {
        ClickOutcome::Armed => println!("armed {key}"),
        ClickOutcome::Disarmed => println!("deselected"),
        ClickOutcome::Toggled { selected: true } => {
            println!("selected ({} total)", editor.selection().len())
        }
        ClickOutcome::Toggled { selected: false } => {
            println!("removed ({} total)", editor.selection().len())
        }
        ClickOutcome::Ignored => println!("empty slot; nothing to select"),
        ClickOutcome::Move { .. } | ClickOutcome::Swap { .. } => {}
    }

    let Some(request) = Editor::update_request(&outcome) else {
        return Ok(());
    };

    let verb = match request.action {
        UpdateAction::Move => format!("Move {} to {}?", request.source, request.target),
        UpdateAction::Swap => format!("Swap {} into {}?", request.source, request.target),
    };
    if !confirm(&verb) {
        // Cancelled confirmation leaves the machine idle, not armed.
        println!("cancelled");
        return Ok(());
    }

    editor.begin_mutation()?;
    let submitted = rt.block_on(api.submit_update(&request));
    match submitted {
        Ok(message) => {
            editor.finish_mutation(true);
            println!("{message}");
            refresh(editor, api, rt)?;
        }
        Err(e) => {
            editor.finish_mutation(false);
            println!("error: {e}");
        }
    }
    Ok(())
}

fn handle_batch(
    editor: &mut Editor,
    api: &ApiClient,
    rt: &Runtime,
    args: &[&str],
) -> Result<(), Box<dyn std::error::Error>> {
    let [day, shift] = args else {
        return Err("usage: batch DAY SHIFT".into());
    };
    let target = BatchTarget {
        day: day.to_string(),
        shift: shift.parse().map_err(|_| "shift must be a number")?,
    };
    let request = editor.batch_request(target)?;

    editor.begin_mutation()?;
    let moved = negotiate_batch(api, rt, request, false);
    match moved {
        Ok(true) => {
            editor.finish_mutation(true);
            refresh(editor, api, rt)?;
        }
        Ok(false) => editor.finish_mutation(false),
        Err(e) => {
            editor.finish_mutation(false);
            return Err(e);
        }
    }
    Ok(())
}

/// Refetch after a successful mutation; selection staleness against
/// the fresh snapshot is reported, not silently swallowed.
fn refresh(
    editor: &mut Editor,
    api: &ApiClient,
    rt: &Runtime,
) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = rt.block_on(api.fetch_snapshot())?;
    let pruned = editor.install_snapshot(snapshot)?;
    if pruned > 0 {
        println!("note: {pruned} selected slot(s) changed on the server and were deselected");
    }
    Ok(())
}

fn show(editor: &Editor, day: Option<&str>) {
    let Some(snapshot) = editor.snapshot() else {
        println!("no schedule loaded");
        return;
    };
    let Some(day) = day else {
        println!("choose a day first (day DAY)");
        return;
    };
    let view = GridView::project(snapshot, editor.selection(), day);
    print!("{}", render_grid(&view));
    println!("{} selected", editor.selection().len());
}
