use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::sort::SortField;

#[derive(Debug, Parser)]
#[command(author, version, about = "Reading-progress catalog for a terminal book reader")]
pub struct Cli {
    /// Directory holding the catalog, the options file and the last-file record.
    #[arg(long, global = true, env = "TERMSHELF_HOME")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the filtered and sorted book list.
    List(ListArgs),
    /// Print everything known about one book.
    Show(ShowArgs),
    /// Record the reading position of a book that was just closed.
    Close(CloseArgs),
    /// Print the line a book should be reopened at.
    Resume(ResumeArgs),
    /// Remove the book at a row of the filtered and sorted list.
    Delete(DeleteArgs),
    /// Print the effective configuration.
    Config,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ViewArgs {
    /// Case-insensitive text matched against authors, title, path and sequence.
    #[arg(long, default_value = "")]
    pub filter: String,

    /// Sort field (author, title, genre, added, completed, percent).
    #[arg(long, conflicts_with = "sort_column")]
    pub sort: Option<SortField>,

    /// Sort as the picker does when column N (0-based) is clicked.
    #[arg(long)]
    pub sort_column: Option<usize>,

    /// Sort in descending order.
    #[arg(long)]
    pub desc: bool,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub view: ViewArgs,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Book file path.
    pub path: PathBuf,
}

#[derive(Debug, Args)]
pub struct CloseArgs {
    /// Book file path.
    pub path: PathBuf,

    /// 0-based index of the top visible line.
    #[arg(long)]
    pub position: usize,

    /// Number of formatted lines in the book.
    #[arg(long)]
    pub total: usize,

    #[arg(long, default_value = "")]
    pub first_name: String,

    #[arg(long, default_value = "")]
    pub last_name: String,

    #[arg(long, default_value = "")]
    pub title: String,

    #[arg(long, default_value = "")]
    pub sequence: String,

    #[arg(long, default_value = "")]
    pub language: String,

    #[arg(long, default_value = "")]
    pub genre: String,
}

#[derive(Debug, Args)]
pub struct ResumeArgs {
    /// Book file path.
    pub path: PathBuf,

    /// Number of formatted lines the book has now.
    #[arg(long)]
    pub total: usize,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// 0-based row of the list produced by the same view options.
    pub index: usize,

    #[command(flatten)]
    pub view: ViewArgs,
}
