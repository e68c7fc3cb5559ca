use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::record_store::LocalFsRecordStore;
use crate::sort::{SortField, SortMode};

pub const CONFIG_FILE_NAME: &str = "termshelf.conf";
pub const DATABASE_DIR_NAME: &str = "book.db";
const VENDOR_DIR: &str = ".rionnag";
const APP_DIR: &str = "termshelf";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    /// The options file lives next to the executable.
    pub portable: bool,
    pub use_db: bool,
    pub justify: bool,
    pub text_color: String,
    pub back_color: String,
    pub sort: SortMode,
}

impl Config {
    /// Resolves the data directory and reads its options file.
    pub fn load(data_dir_override: Option<&Path>) -> anyhow::Result<Self> {
        let (data_dir, portable) = match data_dir_override {
            Some(dir) => (dir.to_path_buf(), false),
            None => detect_data_dir()?,
        };
        let mut config = Self::with_defaults(data_dir, portable);

        let path = config.data_dir.join(CONFIG_FILE_NAME);
        match std::fs::read_to_string(&path) {
            Ok(contents) => config.apply_options(&contents),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no options file; using defaults");
            }
            Err(err) => {
                return Err(err).with_context(|| format!("read options: {}", path.display()));
            }
        }
        Ok(config)
    }

    pub fn with_defaults(data_dir: PathBuf, portable: bool) -> Self {
        Self {
            data_dir,
            portable,
            use_db: true,
            justify: false,
            text_color: "default".to_owned(),
            back_color: "default".to_owned(),
            sort: SortMode::default(),
        }
    }

    /// Applies `key = value` lines. Comments start with `#` or `/`; unknown
    /// keys and lines without `=` are skipped.
    pub fn apply_options(&mut self, contents: &str) {
        for line in contents.lines() {
            if line.starts_with('#') || line.starts_with('/') {
                continue;
            }
            let Some((name, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim();
            match name.trim().to_ascii_lowercase().as_str() {
                "usedb" => self.use_db = parse_flag(value),
                "justify" => self.justify = parse_flag(value),
                "textcolor" => self.text_color = value.to_owned(),
                "backcolor" => self.back_color = value.to_owned(),
                "sortfield" => self.sort.field = SortField::from_name_or_author(value),
                "sortascending" => self.sort.ascending = parse_flag(value),
                other => tracing::debug!(option = other, "ignoring unknown option"),
            }
        }
    }

    pub fn database_dir(&self) -> PathBuf {
        self.data_dir.join(DATABASE_DIR_NAME)
    }

    pub fn record_store(&self) -> LocalFsRecordStore {
        LocalFsRecordStore::new(self.database_dir())
    }
}

fn parse_flag(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("on") || value.eq_ignore_ascii_case("true")
}

/// Uses the executable's directory when an options file sits next to it,
/// otherwise `<home>/.rionnag/termshelf`.
fn detect_data_dir() -> anyhow::Result<(PathBuf, bool)> {
    if let Ok(exe) = std::env::current_exe()
        && let Some(bin_dir) = exe.parent()
        && bin_dir.join(CONFIG_FILE_NAME).is_file()
    {
        return Ok((bin_dir.to_path_buf(), true));
    }

    let home = match dirs::home_dir() {
        Some(home) => home,
        None => std::env::current_dir().context("determine home or current directory")?,
    };
    Ok((home.join(VENDOR_DIR).join(APP_DIR), false))
}
