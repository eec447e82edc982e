//! Aggregate binary output.
//!
//! The whole ordered sequence of flat records is encoded with
//! [borsh](https://borsh.io/). Each record is written positionally in
//! column order, with list-typed fields kept as lists. The sequence is
//! wrapped in a version tag so that the schema can evolve.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use borsh::{BorshDeserialize, BorshSerialize};
use tracing::instrument;

use crate::domain::FlatRecord;

#[derive(BorshSerialize)]
enum VersionRef<'a> {
    V1(&'a [FlatRecord]),
}

#[derive(BorshDeserialize)]
enum Version {
    V1(Vec<FlatRecord>),
}

/// Encode the records into `writer`.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn write<W: Write>(writer: W, records: &[FlatRecord]) -> io::Result<()> {
    borsh::to_writer(writer, &VersionRef::V1(records))
}

/// Encode the records into a file, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to.
#[instrument(skip(records), fields(records = records.len()))]
pub fn save(path: &Path, records: &[FlatRecord]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    write(&mut writer, records)?;
    writer.flush()
}

/// Decode a blob previously produced by [`write`].
///
/// # Errors
///
/// Returns an error if the bytes are not a valid blob.
pub fn decode(bytes: &[u8]) -> io::Result<Vec<FlatRecord>> {
    match borsh::from_slice::<Version>(bytes)? {
        Version::V1(records) => Ok(records),
    }
}

/// Read a blob file back into flat records.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid blob.
pub fn load(path: &Path) -> io::Result<Vec<FlatRecord>> {
    decode(&std::fs::read(path)?)
}
