//! Direct move / swap / batch-move commands, plus the batch
//! negotiation driver shared with the interactive editor.

use clap::Args;
use examgrid_core::{
    ApiClient, BatchItem, BatchMoveRequest, BatchOutcome, BatchTarget, SlotKey, UpdateAction,
    UpdateRequest,
};
use tokio::runtime::Runtime;

use super::{api_client, confirm, format_conflicts, runtime};

#[derive(Args)]
pub struct MoveArgs {
    /// Course code of the group to move
    #[arg(long)]
    pub course: String,
    /// Group / section number
    #[arg(long)]
    pub group: u32,
    /// Destination day
    #[arg(long)]
    pub day: String,
    /// Destination shift
    #[arg(long)]
    pub shift: u32,
    /// Destination room
    #[arg(long)]
    pub room: String,
    /// Skip the confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct SwapArgs {
    /// Course code of the first group
    #[arg(long)]
    pub course: String,
    /// Group / section number of the first group
    #[arg(long)]
    pub group: u32,
    /// Course code of the group to swap with
    #[arg(long)]
    pub with_course: String,
    /// Group / section number of the group to swap with
    #[arg(long)]
    pub with_group: u32,
    /// Skip the confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct BatchMoveArgs {
    /// Groups to move, as COURSE:GROUP (repeatable)
    #[arg(long = "item", required = true)]
    pub items: Vec<String>,
    /// Destination day
    #[arg(long)]
    pub day: String,
    /// Destination shift
    #[arg(long)]
    pub shift: u32,
    /// Skip the intent confirmation prompt
    #[arg(long)]
    pub yes: bool,
    /// Submit with the override flag already set
    #[arg(long)]
    pub force: bool,
}

pub fn run_move(args: MoveArgs) -> Result<(), Box<dyn std::error::Error>> {
    let api = api_client()?;
    let rt = runtime()?;
    let snapshot = rt.block_on(api.fetch_snapshot())?;

    let source = snapshot
        .find_group(&args.course, args.group)
        .ok_or_else(|| format!("{} group {} is not in the schedule", args.course, args.group))?
        .clone();
    let target = SlotKey::new(args.day, args.shift, args.room);

    if let Some(occupant) = snapshot.occupant_at(&target) {
        return Err(format!(
            "target {target} is occupied by {occupant}; use `examgrid swap` to exchange slots"
        )
        .into());
    }

    if !args.yes && !confirm(&format!("Move {source} to {target}?")) {
        println!("cancelled");
        return Ok(());
    }

    let request = UpdateRequest {
        action: UpdateAction::Move,
        source,
        target,
    };
    let message = rt.block_on(api.submit_update(&request))?;
    println!("{message}");
    Ok(())
}

pub fn run_swap(args: SwapArgs) -> Result<(), Box<dyn std::error::Error>> {
    let api = api_client()?;
    let rt = runtime()?;
    let snapshot = rt.block_on(api.fetch_snapshot())?;

    let source = snapshot
        .find_group(&args.course, args.group)
        .ok_or_else(|| format!("{} group {} is not in the schedule", args.course, args.group))?
        .clone();
    let other = snapshot
        .find_group(&args.with_course, args.with_group)
        .ok_or_else(|| {
            format!(
                "{} group {} is not in the schedule",
                args.with_course, args.with_group
            )
        })?
        .clone();
    let target = other
        .slot_key()
        .ok_or_else(|| format!("{other} has no room assigned; nothing to swap into"))?;

    if !args.yes && !confirm(&format!("Swap {source} with {other}?")) {
        println!("cancelled");
        return Ok(());
    }

    let request = UpdateRequest {
        action: UpdateAction::Swap,
        source,
        target,
    };
    let message = rt.block_on(api.submit_update(&request))?;
    println!("{message}");
    Ok(())
}

pub fn run_batch_move(args: BatchMoveArgs) -> Result<(), Box<dyn std::error::Error>> {
    let items = args
        .items
        .iter()
        .map(|spec| parse_item(spec))
        .collect::<Result<Vec<_>, _>>()?;
    let target = BatchTarget {
        day: args.day,
        shift: args.shift,
    };
    let mut request = BatchMoveRequest::new(items, target);
    request.force = args.force;

    let api = api_client()?;
    let rt = runtime()?;
    negotiate_batch(&api, &rt, request, args.yes)?;
    Ok(())
}

/// COURSE:GROUP, e.g. MATH101:2.
fn parse_item(spec: &str) -> Result<BatchItem, Box<dyn std::error::Error>> {
    let (course, group) = spec
        .rsplit_once(':')
        .ok_or_else(|| format!("invalid item '{spec}', expected COURSE:GROUP"))?;
    Ok(BatchItem {
        course: course.to_string(),
        group: group
            .parse()
            .map_err(|_| format!("invalid group number in '{spec}'"))?,
    })
}

/// Drive one batch move through the two-phase protocol: intent
/// confirmation, first attempt, and at most one operator-approved
/// forced retry. Returns whether the schedule was changed.
pub fn negotiate_batch(
    api: &ApiClient,
    rt: &Runtime,
    request: BatchMoveRequest,
    assume_yes: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    if !request.force
        && !assume_yes
        && !confirm(&format!(
            "Move {} exam group(s) to {} shift {}?",
            request.items.len(),
            request.target.day,
            request.target.shift
        ))
    {
        println!("cancelled");
        return Ok(false);
    }

    match rt.block_on(api.submit_batch(&request))? {
        BatchOutcome::Success(message) => {
            println!("{message}");
            Ok(true)
        }
        BatchOutcome::HardConflict { error, details } => {
            println!("BLOCKED: {error}");
            println!("{}", format_conflicts(&details));
            println!("These groups cannot share the destination shift.");
            Ok(false)
        }
        BatchOutcome::SoftConflict {
            error,
            details,
            retry,
        } => {
            println!("WARNING: {error}");
            println!("{}", format_conflicts(&details));
            if !confirm("Proceed anyway?") {
                println!("cancelled");
                return Ok(false);
            }
            match rt.block_on(api.submit_batch(&retry))? {
                BatchOutcome::Success(message) => {
                    println!("{message}");
                    Ok(true)
                }
                BatchOutcome::HardConflict { error, details } => {
                    println!("BLOCKED: {error}");
                    println!("{}", format_conflicts(&details));
                    Ok(false)
                }
                BatchOutcome::SoftConflict { error, .. } | BatchOutcome::Rejected(error) => {
                    // A forced retry gets no second override.
                    println!("rejected: {error}");
                    Ok(false)
                }
            }
        }
        BatchOutcome::Rejected(error) => {
            println!("rejected: {error}");
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_item_accepts_course_and_group() {
        let item = parse_item("MATH101:2").unwrap();
        assert_eq!(item.course, "MATH101");
        assert_eq!(item.group, 2);
    }

    #[test]
    fn parse_item_rejects_bad_specs() {
        assert!(parse_item("MATH101").is_err());
        assert!(parse_item("MATH101:x").is_err());
    }
}
