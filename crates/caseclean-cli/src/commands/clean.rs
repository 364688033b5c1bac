//! Clean command - run the full pipeline and export the cleaned table.

use std::path::PathBuf;

use colored::Colorize;

use caseclean::output::write_table;
use caseclean::{CleanReport, DataQualityChecks};

#[allow(clippy::too_many_arguments)]
pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    date_columns: Vec<String>,
    start_column: String,
    end_column: String,
    key_columns: Vec<String>,
    json: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("Extract not found: {}", file.display()).into());
    }

    let (mut dq, metadata) = DataQualityChecks::from_path_with_metadata(&file)?;

    if verbose {
        eprintln!(
            "{} {} ({} rows, {} columns, {})",
            "Loaded".cyan().bold(),
            metadata.file,
            metadata.row_count,
            metadata.column_count,
            metadata.format
        );
    }

    let date_refs: Vec<&str> = date_columns.iter().map(String::as_str).collect();
    let key_refs: Vec<&str> = key_columns.iter().map(String::as_str).collect();

    dq.validate_dates(&date_refs)?;
    dq.compute_delay(&start_column, &end_column)?;
    dq.impute_delays()?;
    dq.derive_keys(&key_refs)?;
    dq.remove_duplicates()?;

    let output_path = output.unwrap_or_else(|| {
        let stem = file.file_stem().unwrap_or_default().to_string_lossy();
        let ext = file
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_else(|| "csv".to_string());
        file.with_file_name(format!("{stem}_cleaned.{ext}"))
    });

    println!(
        "{}",
        render_report(dq.report(), dq.table().row_count(), json)?
    );

    let table = dq.into_table();
    write_table(&output_path, &table)?;

    // In JSON mode stdout carries only the report, so status goes to stderr.
    let written = format!("Cleaned table written to: {}", output_path.display());
    if json {
        eprintln!("{written}");
    } else {
        println!("{written}");
    }

    Ok(())
}

/// Render the cleaning report for stdout: pretty JSON or colored text.
fn render_report(
    report: &CleanReport,
    rows_remaining: usize,
    json: bool,
) -> Result<String, serde_json::Error> {
    if json {
        return serde_json::to_string_pretty(report);
    }

    let mut lines = Vec::with_capacity(report.steps.len() + 1);
    for step in &report.steps {
        lines.push(format!(
            "{} {}: {}",
            "Step".cyan().bold(),
            step.step.white().bold(),
            step.description
        ));
    }
    lines.push(format!(
        "{} {rows_remaining} rows remain",
        "Done.".green().bold()
    ));
    Ok(lines.join("\n"))
}
