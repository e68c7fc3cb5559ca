use std::path::{Path, PathBuf};

use anyhow::Context as _;

pub const LAST_FILE_NAME: &str = "last";

/// The book that was open when the reader last closed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LastFile {
    pub path: String,
    pub position: usize,
    pub length: usize,
}

impl LastFile {
    pub fn location(data_dir: &Path) -> PathBuf {
        data_dir.join(LAST_FILE_NAME)
    }

    /// Reads `path`, `position` and `length` lines. Missing files and bad
    /// numbers read as empty values.
    pub fn read(data_dir: &Path) -> Self {
        let path = Self::location(data_dir);
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) => {
                tracing::debug!(path = %path.display(), ?err, "no last file info");
                return Self::default();
            }
        };
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Self {
        let mut lines = contents.lines().map(str::trim);
        let path = lines.next().unwrap_or_default().to_owned();
        let mut number = || lines.next().and_then(|line| line.parse().ok()).unwrap_or(0);
        let position = number();
        let length = number();
        Self {
            path,
            position,
            length,
        }
    }

    /// Writes the record; nothing is saved without a path and a length.
    pub fn save(&self, data_dir: &Path) -> anyhow::Result<bool> {
        if self.path.is_empty() || self.length == 0 {
            return Ok(false);
        }
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("create data dir: {}", data_dir.display()))?;
        let path = Self::location(data_dir);
        let contents = format!("{}\n{}\n{}\n", self.path, self.position, self.length);
        std::fs::write(&path, contents)
            .with_context(|| format!("write last file info: {}", path.display()))?;
        Ok(true)
    }

    /// Saved position translated to a book that now has `new_length` lines.
    pub fn position_for(&self, new_length: usize) -> usize {
        rescale_position(self.position, self.length, new_length)
    }
}

/// Maps a line position onto a re-wrapped book of a different length.
pub fn rescale_position(position: usize, old_length: usize, new_length: usize) -> usize {
    if old_length == 0 || old_length == new_length {
        return position;
    }
    let scaled = position as u128 * new_length as u128 / old_length as u128;
    usize::try_from(scaled).unwrap_or(usize::MAX)
}
