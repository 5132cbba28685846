//! Snapshot loader: reads the published `data.json` (record array) and
//! optional `meta.json` documents from disk.
//!
//! Structurally invalid input is a hard failure: a snapshot that is not a
//! record array propagates an error to the caller rather than being coerced.
//! Business-level oddities (missing fields, zero values) are handled by the
//! serde defaults on [`Record`] and never fail here.

use crate::error::Result;
use crate::schema::{Record, SnapshotMetadata};
use log::{info, warn};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// A loaded snapshot: the record collection plus optional metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub records: Vec<Record>,
    pub metadata: Option<SnapshotMetadata>,
}

/// Deserializes a record array from a reader.
pub fn read_records<R: std::io::Read>(reader: R) -> Result<Vec<Record>> {
    let records: Vec<Record> = serde_json::from_reader(reader)?;
    Ok(records)
}

/// Loads a snapshot from `data_path`, plus metadata from `meta_path` when it
/// exists. A missing or unreadable metadata document is tolerated (the
/// dashboard derives what it needs from the records); a broken data document
/// is not.
pub fn load_snapshot<P: AsRef<Path>>(data_path: P, meta_path: P) -> Result<Snapshot> {
    let data_file = File::open(data_path.as_ref())?;
    let records = read_records(BufReader::new(data_file))?;
    info!(
        "Loaded {} records from {}",
        records.len(),
        data_path.as_ref().display()
    );

    let metadata = match File::open(meta_path.as_ref()) {
        Ok(file) => match serde_json::from_reader(BufReader::new(file)) {
            Ok(meta) => Some(meta),
            Err(e) => {
                warn!(
                    "Ignoring unparseable metadata at {}: {}",
                    meta_path.as_ref().display(),
                    e
                );
                None
            }
        },
        Err(_) => None,
    };

    Ok(Snapshot { records, metadata })
}
