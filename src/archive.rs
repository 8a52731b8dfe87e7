//! Read single entries out of zip archives.
//!
//! Office documents, EPUBs and plain `.zip` files all work; the entry name is
//! matched exactly, including its directory prefix (`word/media/image1.png`).

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use zip::ZipArchive;
use zip::result::ZipError;

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Not a valid zip archive: {0}")]
    Zip(#[from] ZipError),
    #[error("No entry named '{entry}' in {}", .archive.display())]
    EntryNotFound { entry: String, archive: PathBuf },
    #[error("Failed to read entry '{entry}': {source}")]
    Read {
        entry: String,
        source: std::io::Error,
    },
}

fn open(zip_path: &Path) -> Result<ZipArchive<File>, ArchiveError> {
    let file = File::open(zip_path).map_err(|source| ArchiveError::Open {
        path: zip_path.to_path_buf(),
        source,
    })?;
    Ok(ZipArchive::new(file)?)
}

/// Return the raw bytes of the entry named `entry_name`.
pub fn extract_entry(zip_path: &Path, entry_name: &str) -> Result<Vec<u8>, ArchiveError> {
    let mut archive = open(zip_path)?;
    let mut entry = match archive.by_name(entry_name) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => {
            return Err(ArchiveError::EntryNotFound {
                entry: entry_name.to_string(),
                archive: zip_path.to_path_buf(),
            });
        }
        Err(e) => return Err(e.into()),
    };

    // Header sizes come from the file, so the buffer grows with what is read
    let mut buf = Vec::new();
    entry
        .read_to_end(&mut buf)
        .map_err(|source| ArchiveError::Read {
            entry: entry_name.to_string(),
            source,
        })?;
    log::debug!(
        "extracted {} ({} bytes) from {}",
        entry_name,
        buf.len(),
        zip_path.display()
    );
    Ok(buf)
}

/// Entry names in archive order.
pub fn list_entries(zip_path: &Path) -> Result<Vec<String>, ArchiveError> {
    let archive = open(zip_path)?;
    Ok((0..archive.len())
        .filter_map(|i| archive.name_for_index(i).map(str::to_string))
        .collect())
}
