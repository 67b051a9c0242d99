//! Mapfile reading and writing
//!
//! The mapfile holds one `<git_id> <hg_id>` line per matched pair. One-sided
//! entries are never written.

use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::info;

use crate::error::SyncError;
use crate::model::CorrespondenceMap;

/// Write every matched pair in map order
pub fn write_mapfile<W: Write>(map: &CorrespondenceMap, mut writer: W) -> io::Result<usize> {
    let mut written = 0;
    for (primary, secondary) in map.matched_pairs() {
        writeln!(writer, "{} {}", primary.id, secondary.id)?;
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}

/// Render the mapfile into a string
pub fn render_mapfile(map: &CorrespondenceMap) -> String {
    map.matched_pairs()
        .map(|(primary, secondary)| format!("{} {}\n", primary.id, secondary.id))
        .collect()
}

/// Write the mapfile to `path`
///
/// The content goes to a temporary file in the same directory, which is
/// renamed over `path` once synced. Readers never see a half-written
/// mapfile, and the temporary file is removed if anything fails.
pub fn save_mapfile(map: &CorrespondenceMap, path: &Path) -> Result<usize, SyncError> {
    info!(path = %path.display(), "Saving map file");

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;

    let written = write_mapfile(map, io::BufWriter::new(&mut tmp))?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    Ok(written)
}

/// Parse mapfile text back into `(git_id, hg_id)` pairs
pub fn parse_mapfile(text: &str) -> Result<Vec<(String, String)>, SyncError> {
    let mut pairs = Vec::new();

    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let mut parts = line.split(' ');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(primary), Some(secondary), None) if !primary.is_empty() && !secondary.is_empty() => {
                pairs.push((primary.to_string(), secondary.to_string()));
            }
            _ => {
                return Err(SyncError::MalformedMapLine {
                    line: index + 1,
                    text: line.to_string(),
                });
            }
        }
    }

    Ok(pairs)
}
