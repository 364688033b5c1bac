//! caseclean: data-quality gate for tabular case-record extracts.
//!
//! A raw extract goes in, a cleaned table comes out: named date columns
//! coerced to valid calendar dates, a whole-day processing delay derived
//! from a registration/receipt date pair, missing delays imputed from the
//! known ones, and exact-duplicate rows removed. The cleaned table has no
//! missing critical values and no duplicate rows, ready for downstream
//! reporting.
//!
//! # Example
//!
//! ```no_run
//! use caseclean::DataQualityChecks;
//!
//! let mut dq = DataQualityChecks::from_path("extract.csv").unwrap();
//! dq.validate_dates(&["registrationdate", "date_received_in_opg"]).unwrap();
//! dq.compute_delay("registrationdate", "date_received_in_opg").unwrap();
//! dq.impute_delays().unwrap();
//! dq.derive_keys(&["case_no", "unique_id"]).unwrap();
//! dq.remove_duplicates().unwrap();
//!
//! println!("{} clean rows", dq.table().row_count());
//! ```

pub mod calendar;
pub mod checks;
pub mod error;
pub mod input;
pub mod output;

pub use checks::{CleanReport, DELAY_COLUMN, DataQualityChecks, KEY_COLUMN, StepChange};
pub use error::{CleanError, Result};
pub use input::{DataTable, Parser, ParserConfig, SourceMetadata};
