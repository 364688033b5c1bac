//! Inspect command - summarize an extract without modifying it.

use std::path::PathBuf;

use colored::Colorize;
use serde_json::json;

use caseclean::Parser;

pub fn run(file: PathBuf, as_json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("Extract not found: {}", file.display()).into());
    }

    let (table, metadata) = Parser::new().parse_file(&file)?;

    let null_counts: Vec<(String, usize)> = table
        .headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.clone(), table.null_count(idx)))
        .collect();

    if as_json {
        let summary = json!({
            "file": metadata.file,
            "format": metadata.format,
            "hash": metadata.hash,
            "rows": metadata.row_count,
            "columns": metadata.column_count,
            "null_counts": null_counts
                .iter()
                .map(|(name, count)| json!({ "column": name, "nulls": count }))
                .collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!(
        "{} {} ({}, {} rows, {} columns)",
        "Extract".cyan().bold(),
        metadata.file.white().bold(),
        metadata.format,
        metadata.row_count,
        metadata.column_count
    );
    for (name, count) in null_counts {
        let count_text = if count > 0 {
            count.to_string().yellow().to_string()
        } else {
            count.to_string()
        };
        println!("  {name}: {count_text} null(s)");
    }

    Ok(())
}
