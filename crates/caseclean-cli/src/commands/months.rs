//! Months command - print an inclusive reporting-month range.

use caseclean::calendar::{generate_month_list, last_day_of_month};

pub fn run(start: &str, end: &str) -> Result<(), Box<dyn std::error::Error>> {
    let months = generate_month_list(start, end)?;

    for first in &months {
        println!(
            "{}  ({} to {})",
            first.format("%Y-%m"),
            first.format("%Y-%m-%d"),
            last_day_of_month(*first)
        );
    }

    Ok(())
}
