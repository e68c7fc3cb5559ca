use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// One entry of the reading-progress catalog.
///
/// Field names are serialized in PascalCase so catalogs written by older
/// termfb2-style readers load unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BookRecord {
    pub id: String,
    pub file_path: String,
    pub added: String,
    pub completed: String,
    pub line_last: usize,
    pub line_total: usize,

    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub sequence: String,
    pub language: String,
    pub genre: String,
}

impl BookRecord {
    /// Builds a fresh record for `file_path` with a new id and `added` stamped now.
    pub fn new(file_path: &str, info: &BookInfo, line_last: usize, line_total: usize) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            file_path: file_path.to_owned(),
            added: timestamp_now(),
            completed: String::new(),
            line_last,
            line_total,
            first_name: info.first_name.clone(),
            last_name: info.last_name.clone(),
            title: info.title.clone(),
            sequence: info.sequence.clone(),
            language: info.language.clone(),
            genre: info.genre.clone(),
        }
    }

    /// Share of the book read so far, truncated to a whole percent.
    #[must_use]
    pub fn percent_complete(&self) -> usize {
        if self.line_total == 0 {
            return 0;
        }
        let percent = self.line_last as u128 * 100 / self.line_total as u128;
        usize::try_from(percent).unwrap_or(usize::MAX)
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        !self.completed.is_empty()
    }

    /// `"Last, First"` as shown in the picker.
    #[must_use]
    pub fn author(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }
}

/// Descriptive metadata taken from a parsed document when its record is created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookInfo {
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub sequence: String,
    pub language: String,
    pub genre: String,
}

impl BookInfo {
    /// Short reader-window title: `"A.Asimov - Foundation"`.
    #[must_use]
    pub fn short_title(&self) -> String {
        let author = match self.first_name.chars().next() {
            Some(initial) => format!("{initial}.{}", self.last_name),
            None => self.last_name.clone(),
        };
        format!("{author} - {}", self.title)
    }
}

/// Current time as a fixed-width RFC 3339 string, so text order is time order.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
