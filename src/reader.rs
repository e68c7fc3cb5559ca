//! Opening and closing a book: restoring the saved line and recording progress.

use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::book::BookInfo;
use crate::catalog::{Catalog, UpsertOutcome};
use crate::last_file::LastFile;
use crate::record_store::RecordStore;

/// Makes a book path absolute against the current directory.
pub fn absolute_book_path(path: &Path) -> anyhow::Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("get current dir")?;
    Ok(cwd.join(path))
}

/// Line to show when `path` is opened with `total_lines` formatted lines.
///
/// The last-file record, rescaled to `total_lines`, wins for the book it names.
/// Other books resume from the catalog; a book seen nowhere opens at 0.
pub fn resume_position<S: RecordStore>(
    catalog: Option<&Catalog<S>>,
    last: &LastFile,
    path: &str,
    total_lines: usize,
) -> usize {
    let position = if last.path == path {
        last.position_for(total_lines)
    } else {
        catalog
            .and_then(|catalog| catalog.lookup(path))
            .map_or(0, |book| book.line_last)
    };
    clamp_position(position, total_lines)
}

fn clamp_position(position: usize, total_lines: usize) -> usize {
    position.min(total_lines.saturating_sub(1))
}

/// Result of closing a book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseReport {
    pub last_file_saved: bool,
    pub catalog: Option<UpsertOutcome>,
}

/// Saves the last-file record and, when a catalog is in use, the book's progress.
pub fn close_book<S: RecordStore>(
    data_dir: &Path,
    catalog: Option<&mut Catalog<S>>,
    path: &str,
    position: usize,
    total_lines: usize,
    info: &BookInfo,
) -> anyhow::Result<CloseReport> {
    let last = LastFile {
        path: path.to_owned(),
        position,
        length: total_lines,
    };
    let last_file_saved = last.save(data_dir).context("save last file info")?;

    let outcome = match catalog {
        Some(catalog) if !path.is_empty() && total_lines != 0 => {
            Some(catalog.upsert_progress(path, position, total_lines, info))
        }
        _ => None,
    };

    tracing::info!(
        book = %info.short_title(),
        position,
        total_lines,
        "closed book"
    );
    Ok(CloseReport {
        last_file_saved,
        catalog: outcome,
    })
}
