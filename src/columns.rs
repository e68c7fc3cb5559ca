use crate::book::BookRecord;
use crate::sort::{SortField, SortMode};

/// Columns of the book picker, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Author,
    Title,
    Done,
    Sequence,
    Genre,
    Added,
    Completed,
    FilePath,
}

impl Column {
    pub const ALL: [Column; 8] = [
        Self::Author,
        Self::Title,
        Self::Done,
        Self::Sequence,
        Self::Genre,
        Self::Added,
        Self::Completed,
        Self::FilePath,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Self::Author => "Author",
            Self::Title => "Title",
            Self::Done => "Done",
            Self::Sequence => "Sequence",
            Self::Genre => "Genre",
            Self::Added => "Added",
            Self::Completed => "Completed",
            Self::FilePath => "FilePath",
        }
    }

    pub fn text(self, book: &BookRecord) -> String {
        match self {
            Self::Author => book.author(),
            Self::Title => book.title.clone(),
            Self::Done => format!("{}%", book.percent_complete()),
            Self::Sequence => book.sequence.clone(),
            Self::Genre => book.genre.clone(),
            Self::Added => book.added.clone(),
            Self::Completed => book.completed.clone(),
            Self::FilePath => book.file_path.clone(),
        }
    }

    /// Sort field used when the picker sorts by this column.
    /// Columns without an own order fall back to author order.
    pub fn sort_field(self) -> SortField {
        match self {
            Self::Title => SortField::Title,
            Self::Done => SortField::Percent,
            Self::Genre => SortField::Genre,
            Self::Added => SortField::Added,
            Self::Completed => SortField::Completed,
            Self::Author | Self::Sequence | Self::FilePath => SortField::Author,
        }
    }
}

/// Sort mode for a click on column `index`. `None` direction means the
/// picker cleared its sort; that, like an unknown column, is author ascending.
pub fn sort_mode_for_column(index: usize, ascending: Option<bool>) -> SortMode {
    match (Column::ALL.get(index), ascending) {
        (Some(column), Some(ascending)) if *column != Column::FilePath => {
            SortMode::new(column.sort_field(), ascending)
        }
        _ => SortMode::default(),
    }
}

pub fn picker_title(filter: &str) -> String {
    format!("Book list [{filter}]")
}

/// One tab-separated picker row.
pub fn row_text(book: &BookRecord) -> String {
    Column::ALL
        .iter()
        .map(|column| column.text(book))
        .collect::<Vec<_>>()
        .join("\t")
}

pub fn header_text() -> String {
    Column::ALL
        .iter()
        .map(|column| column.header())
        .collect::<Vec<_>>()
        .join("\t")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BookRecord {
        BookRecord {
            id: "id-1".to_owned(),
            file_path: "/books/foundation.fb2".to_owned(),
            added: "2021-01-02T03:04:05Z".to_owned(),
            completed: String::new(),
            line_last: 50,
            line_total: 200,
            first_name: "Isaac".to_owned(),
            last_name: "Asimov".to_owned(),
            title: "Foundation".to_owned(),
            sequence: "Foundation 1".to_owned(),
            language: "en".to_owned(),
            genre: "sf".to_owned(),
        }
    }

    #[test]
    fn column_text() {
        let book = sample();
        assert_eq!(Column::Author.text(&book), "Asimov, Isaac");
        assert_eq!(Column::Done.text(&book), "25%");
        assert_eq!(Column::Completed.text(&book), "");
        assert_eq!(Column::FilePath.text(&book), "/books/foundation.fb2");

        let unread = BookRecord::default();
        assert_eq!(Column::Done.text(&unread), "0%");
    }

    #[test]
    fn row_text_joins_all_columns() {
        let row = row_text(&sample());
        assert_eq!(row.split('\t').count(), Column::ALL.len());
        assert!(row.starts_with("Asimov, Isaac\tFoundation\t25%\t"));
    }

    #[test]
    fn column_sort_mapping() {
        assert_eq!(
            sort_mode_for_column(2, Some(false)),
            SortMode::new(SortField::Percent, false)
        );
        assert_eq!(
            sort_mode_for_column(3, Some(false)),
            SortMode::new(SortField::Author, false)
        );
        assert_eq!(
            sort_mode_for_column(6, Some(true)),
            SortMode::new(SortField::Completed, true)
        );
        assert_eq!(sort_mode_for_column(1, None), SortMode::default());
        assert_eq!(sort_mode_for_column(7, Some(false)), SortMode::default());
        assert_eq!(sort_mode_for_column(42, Some(false)), SortMode::default());
    }

    #[test]
    fn title_shows_filter() {
        assert_eq!(picker_title(""), "Book list []");
        assert_eq!(picker_title("bell"), "Book list [bell]");
    }
}
