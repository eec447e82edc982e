//! Delimited-table output.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use tracing::instrument;

use crate::domain::{FlatRecord, COLUMNS};

/// Write the header and one row per record as CSV.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn write<W: Write>(writer: W, records: &[FlatRecord]) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(COLUMNS)?;
    for record in records {
        writer.write_record(record.to_row())?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the table to a file, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to.
#[instrument(skip(records), fields(rows = records.len()))]
pub fn save(path: &Path, records: &[FlatRecord]) -> Result<(), csv::Error> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    write(BufWriter::new(file), records)
}

/// Read a table back into its text cells, header excluded.
///
/// # Errors
///
/// Returns an error if the input is not valid CSV.
pub fn read_rows<R: io::Read>(reader: R) -> Result<Vec<Vec<String>>, csv::Error> {
    csv::Reader::from_reader(reader)
        .records()
        .map(|row| row.map(|row| row.iter().map(ToString::to_string).collect()))
        .collect()
}
