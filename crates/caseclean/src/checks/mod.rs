//! Quality checks over an owned case-record table.

mod engine;
mod report;

pub use engine::{DELAY_COLUMN, DataQualityChecks, KEY_COLUMN};
pub use report::{CleanReport, StepChange};
