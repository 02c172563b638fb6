//! Thin wrappers over the collaborating backend endpoints. These are
//! opaque success/failure signals; payload fields are summarized, not
//! interpreted.

use std::path::Path;

use super::{api_client, runtime};

const UPLOAD_KINDS: [&str; 4] = ["lhp", "data", "cfg", "sv"];

pub fn run_upload(kind: &str, file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if !UPLOAD_KINDS.contains(&kind) {
        return Err(format!(
            "unknown input kind '{kind}' (expected one of: {})",
            UPLOAD_KINDS.join(", ")
        )
        .into());
    }
    let api = api_client()?;
    let rt = runtime()?;
    let response = rt.block_on(api.upload(kind, file))?;
    let name = response["filename"].as_str().unwrap_or("uploaded");
    let size = response["size"].as_u64().unwrap_or(0);
    println!("uploaded {name} ({size} bytes)");
    Ok(())
}

pub fn run_solve() -> Result<(), Box<dyn std::error::Error>> {
    let api = api_client()?;
    let rt = runtime()?;
    println!("solving; this can take a while...");
    let response = rt.block_on(api.solve())?;
    println!(
        "solved: {} placements, result file {}",
        response["num_records"].as_u64().unwrap_or(0),
        response["result_file"].as_str().unwrap_or("?")
    );
    if let Some(violations) = response["num_violations"].as_u64() {
        if violations > 0 {
            println!("note: {violations} consecutive-day violation(s)");
        }
    }
    Ok(())
}

pub fn run_results() -> Result<(), Box<dyn std::error::Error>> {
    let api = api_client()?;
    let rt = runtime()?;
    let results = rt.block_on(api.list_results())?;
    if results.is_empty() {
        println!("no result files");
        return Ok(());
    }
    for file in results {
        let created = file
            .created_at()
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| file.created.clone());
        println!("{}  {:>10} B  {}", created, file.size, file.filename);
    }
    Ok(())
}

pub fn run_export_students() -> Result<(), Box<dyn std::error::Error>> {
    let api = api_client()?;
    let rt = runtime()?;
    let response = rt.block_on(api.export_students())?;
    match response["filename"].as_str() {
        Some(name) => println!("exported student roster: {name} (fetch it with 'download {name}')"),
        None => println!("exported student roster"),
    }
    Ok(())
}

pub fn run_files() -> Result<(), Box<dyn std::error::Error>> {
    let api = api_client()?;
    let rt = runtime()?;
    let response = rt.block_on(api.file_status())?;
    for kind in UPLOAD_KINDS {
        let entry = &response["files"][kind];
        if entry.is_null() {
            println!("{kind:<5} (not uploaded)");
        } else {
            println!(
                "{kind:<5} {}  {:>10} B  {}",
                entry["modified"].as_str().unwrap_or("?"),
                entry["size"].as_u64().unwrap_or(0),
                entry["filename"].as_str().unwrap_or("?")
            );
        }
    }
    Ok(())
}

pub fn run_download(
    filename: &str,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let api = api_client()?;
    let rt = runtime()?;
    let bytes = rt.block_on(api.download(filename))?;
    let path = output.map_or_else(|| Path::new(filename).to_path_buf(), Path::to_path_buf);
    std::fs::write(&path, &bytes)?;
    println!("saved {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}
