//! Plain-text file access for postcard lists
//!
//! Reads whole files into memory and writes text out in overwrite or
//! append mode. No locking, no encoding negotiation beyond UTF-8.

use crate::store::error::StoreResult;
use crate::store::types::WriteMode;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Read the full contents of a postcard file
pub fn read_text(path: &Path) -> StoreResult<String> {
    let text = std::fs::read_to_string(path)?;
    tracing::debug!("Read {} bytes from {:?}", text.len(), path);
    Ok(text)
}

/// Write `content` to `path`, creating the file if it does not exist
pub fn write_text(path: &Path, content: &str, mode: WriteMode) -> StoreResult<()> {
    // Create parent directory if needed
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = match mode {
        WriteMode::Overwrite => File::create(path)?,
        WriteMode::Append => OpenOptions::new().create(true).append(true).open(path)?,
    };

    let mut writer = BufWriter::new(file);
    writer.write_all(content.as_bytes())?;
    writer.flush()?;

    tracing::debug!("Wrote {} bytes to {:?} ({})", content.len(), path, mode);
    Ok(())
}
