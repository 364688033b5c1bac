//! Delimited-file writer for cleaned tables.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::{CleanError, Result};
use crate::input::DataTable;

/// Write a table to a file using the table's own delimiter.
pub fn write_table(path: impl AsRef<Path>, table: &DataTable) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| CleanError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    write_table_to(file, table, table.delimiter)
}

/// Write a table to any writer with an explicit delimiter.
pub fn write_table_to(writer: impl Write, table: &DataTable, delimiter: u8) -> Result<()> {
    let mut out = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    out.write_record(&table.headers)?;
    for row in &table.rows {
        out.write_record(row)?;
    }
    out.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let table = DataTable::new(
            vec!["case_no".to_string(), "delay_days".to_string()],
            vec![
                vec!["A1".to_string(), "31".to_string()],
                vec!["A2".to_string(), "4".to_string()],
            ],
            b',',
        );

        let mut buffer = Vec::new();
        write_table_to(&mut buffer, &table, b',').unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, "case_no,delay_days\nA1,31\nA2,4\n");
    }

    #[test]
    fn test_quoting_of_embedded_delimiter() {
        let table = DataTable::new(
            vec!["concern_type".to_string()],
            vec![vec!["Financial, Both".to_string()]],
            b',',
        );

        let mut buffer = Vec::new();
        write_table_to(&mut buffer, &table, b',').unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("\"Financial, Both\""));
    }
}
