use std::io;
use std::path::Path;

use csv::WriterBuilder;
use log::debug;

use crate::error::{RunError, RunResult};
use crate::matcher::MatchRecord;

pub const MATCH_HEADER: [&str; 5] = ["keyword", "start", "end", "link", "snippet"];
pub const UNMATCHED_HEADER: &str = "unmatched_keywords";

/**
Writes the match table to `csv_path`, replacing whatever was there.

The unmatched table is only written when there is something to list. A file
left at `unmatched_path` by an earlier run is removed in that case so it
cannot be mistaken for this run's output.

Each file is written independently, a failure on the second does not undo the
first.
*/
pub fn export(
    matches: &[MatchRecord],
    unmatched: &[String],
    csv_path: &Path,
    unmatched_path: &Path,
) -> RunResult<()> {
    write_matches(matches, csv_path).map_err(|source| RunError::ExportFailure {
        path: csv_path.to_path_buf(),
        source,
    })?;

    let unmatched_result = if unmatched.is_empty() {
        remove_stale(unmatched_path)
    } else {
        write_unmatched(unmatched, unmatched_path)
    };
    unmatched_result.map_err(|source| RunError::ExportFailure {
        path: unmatched_path.to_path_buf(),
        source,
    })
}

fn write_matches(matches: &[MatchRecord], path: &Path) -> io::Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record(MATCH_HEADER)?;
    for record in matches {
        writer.serialize(record)?;
    }
    writer.flush()
}

fn write_unmatched(unmatched: &[String], path: &Path) -> io::Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record([UNMATCHED_HEADER])?;
    for keyword in unmatched {
        writer.write_record([keyword])?;
    }
    writer.flush()
}

fn remove_stale(path: &Path) -> io::Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            debug!("Removed stale {path:?}");
            Ok(())
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err),
    }
}
