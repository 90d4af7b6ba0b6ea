//! Rewrite `tests/golden/*/expected_report.json` from the current decoder.
//!
//! Run from the repository root after an intentional output change and review
//! the diff before committing.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use sarsat_core::analyze_hex_file;

fn main() -> ExitCode {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run() -> Result<(), String> {
    let root = PathBuf::from("tests").join("golden");
    let entries =
        fs::read_dir(&root).map_err(|err| format!("failed to read {}: {}", root.display(), err))?;

    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| format!("failed to read entry: {}", err))?;
        let path = entry.path();
        if path.is_dir() && path.join("input.txt").exists() {
            dirs.push(path);
        }
    }
    dirs.sort();

    for dir in dirs {
        regenerate_one(&dir.join("input.txt"), &dir.join("expected_report.json"))?;
        eprintln!("regenerated {}", dir.display());
    }
    Ok(())
}

fn regenerate_one(input: &Path, output: &Path) -> Result<(), String> {
    let mut report = analyze_hex_file(input)
        .map_err(|err| format!("analysis failed for {}: {}", input.display(), err))?;
    // Keep fixtures portable across checkouts and platforms.
    report.input.path = input.to_string_lossy().replace('\\', "/");
    let mut json = serde_json::to_string_pretty(&report)
        .map_err(|err| format!("JSON serialization failed: {}", err))?;
    json.push('\n');
    fs::write(output, json)
        .map_err(|err| format!("failed to write {}: {}", output.display(), err))?;
    Ok(())
}
