use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::book::BookRecord;

/// Primary key of the book list order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortField {
    #[default]
    Author,
    Title,
    Genre,
    Added,
    Completed,
    Percent,
}

impl SortField {
    pub const ALL: [SortField; 6] = [
        Self::Author,
        Self::Title,
        Self::Genre,
        Self::Added,
        Self::Completed,
        Self::Percent,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Author => "author",
            Self::Title => "title",
            Self::Genre => "genre",
            Self::Added => "added",
            Self::Completed => "completed",
            Self::Percent => "percent",
        }
    }

    /// Parses a field name, ordering unknown names by author/title/sequence.
    pub fn from_name_or_author(name: &str) -> Self {
        match name.parse() {
            Ok(field) => field,
            Err(_) => {
                tracing::debug!(field = name, "unrecognized sort field; using author order");
                Self::Author
            }
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SortField {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.name().eq_ignore_ascii_case(raw))
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "unsupported sort field: {raw}. expected one of: author, title, genre, added, completed, percent"
                )
            })
    }
}

/// Sort field plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortMode {
    pub field: SortField,
    pub ascending: bool,
}

impl Default for SortMode {
    fn default() -> Self {
        Self {
            field: SortField::Author,
            ascending: true,
        }
    }
}

impl SortMode {
    pub fn new(field: SortField, ascending: bool) -> Self {
        Self { field, ascending }
    }

    /// Total order for `a` and `b`; equal primary keys fall through to
    /// [`compare_author_title_sequence`].
    pub fn compare(&self, a: &BookRecord, b: &BookRecord) -> Ordering {
        let primary = match self.field {
            SortField::Author => Ordering::Equal,
            SortField::Title => a.title.cmp(&b.title),
            SortField::Genre => a.genre.cmp(&b.genre),
            SortField::Added => a.added.cmp(&b.added),
            SortField::Completed => a.completed.cmp(&b.completed),
            SortField::Percent => a.percent_complete().cmp(&b.percent_complete()),
        };
        let ordering = primary.then_with(|| compare_author_title_sequence(a, b));
        if self.ascending {
            ordering
        } else {
            ordering.reverse()
        }
    }

    /// Stable in-place sort: records comparing equal keep their current order.
    pub fn sort(&self, books: &mut [&BookRecord]) {
        books.sort_by(|a, b| self.compare(a, b));
    }
}

/// Last name, then first name, then title, then sequence; raw string order.
pub fn compare_author_title_sequence(a: &BookRecord, b: &BookRecord) -> Ordering {
    a.last_name
        .cmp(&b.last_name)
        .then_with(|| a.first_name.cmp(&b.first_name))
        .then_with(|| a.title.cmp(&b.title))
        .then_with(|| a.sequence.cmp(&b.sequence))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(last: &str, first: &str, title: &str) -> BookRecord {
        BookRecord {
            id: format!("{last}-{first}-{title}"),
            last_name: last.to_owned(),
            first_name: first.to_owned(),
            title: title.to_owned(),
            ..BookRecord::default()
        }
    }

    fn titles(books: &[&BookRecord]) -> Vec<String> {
        books.iter().map(|b| b.title.clone()).collect()
    }

    #[test]
    fn author_order_breaks_ties_by_title() {
        let records = [
            book("Bell", "Anna", "Z"),
            book("Asimov", "Isaac", "M"),
            book("Bell", "Anna", "A"),
        ];
        let mut view: Vec<&BookRecord> = records.iter().collect();
        SortMode::default().sort(&mut view);
        assert_eq!(titles(&view), vec!["M", "A", "Z"]);

        SortMode::new(SortField::Author, false).sort(&mut view);
        assert_eq!(titles(&view), vec!["Z", "A", "M"]);
    }

    #[test]
    fn first_name_and_sequence_break_later_ties() {
        let mut a = book("Bell", "Anna", "T");
        a.sequence = "2".to_owned();
        let mut b = book("Bell", "Anna", "T");
        b.sequence = "1".to_owned();
        let c = book("Bell", "Aaron", "T");

        assert_eq!(compare_author_title_sequence(&c, &a), Ordering::Less);
        assert_eq!(compare_author_title_sequence(&b, &a), Ordering::Less);
        assert_eq!(compare_author_title_sequence(&a, &a.clone()), Ordering::Equal);
    }

    #[test]
    fn percent_order_uses_truncated_percent() {
        let mut a = book("A", "", "a");
        a.line_last = 1;
        a.line_total = 3; // 33%
        let mut b = book("B", "", "b");
        b.line_last = 0;
        b.line_total = 0; // 0%
        let mut c = book("C", "", "c");
        c.line_last = 50;
        c.line_total = 200; // 25%

        let records = [a, b, c];
        let mut view: Vec<&BookRecord> = records.iter().collect();
        SortMode::new(SortField::Percent, true).sort(&mut view);
        assert_eq!(titles(&view), vec!["b", "c", "a"]);
    }

    #[test]
    fn equal_percent_falls_back_to_author() {
        let mut a = book("Zola", "", "a");
        a.line_last = 1;
        a.line_total = 4;
        let mut b = book("Austen", "", "b");
        b.line_last = 2;
        b.line_total = 8;

        let records = [a, b];
        let mut view: Vec<&BookRecord> = records.iter().collect();
        SortMode::new(SortField::Percent, true).sort(&mut view);
        assert_eq!(titles(&view), vec!["b", "a"]);
    }

    #[test]
    fn timestamps_sort_as_text_and_empty_completion_first() {
        let mut a = book("A", "", "a");
        a.added = "2021-05-01T10:00:00Z".to_owned();
        a.completed = "2021-06-01T10:00:00Z".to_owned();
        let mut b = book("B", "", "b");
        b.added = "2020-05-01T10:00:00Z".to_owned();
        let records = [a, b];

        let mut view: Vec<&BookRecord> = records.iter().collect();
        SortMode::new(SortField::Added, true).sort(&mut view);
        assert_eq!(titles(&view), vec!["b", "a"]);

        SortMode::new(SortField::Completed, false).sort(&mut view);
        assert_eq!(titles(&view), vec!["a", "b"]);
    }

    #[test]
    fn genre_and_title_primary_keys() {
        let mut a = book("A", "", "Zeta");
        a.genre = "prose".to_owned();
        let mut b = book("B", "", "Alpha");
        b.genre = "sf".to_owned();
        let records = [a, b];
        let mut view: Vec<&BookRecord> = records.iter().collect();

        SortMode::new(SortField::Title, true).sort(&mut view);
        assert_eq!(titles(&view), vec!["Alpha", "Zeta"]);
        SortMode::new(SortField::Genre, true).sort(&mut view);
        assert_eq!(titles(&view), vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn sort_is_stable_for_identical_keys() {
        let records = [
            BookRecord {
                id: "first".to_owned(),
                ..book("Bell", "Anna", "Same")
            },
            BookRecord {
                id: "second".to_owned(),
                ..book("Bell", "Anna", "Same")
            },
            book("Asimov", "Isaac", "Other"),
        ];
        let mut view: Vec<&BookRecord> = records.iter().collect();
        for mode in [
            SortMode::new(SortField::Title, true),
            SortMode::new(SortField::Percent, false),
            SortMode::default(),
        ] {
            mode.sort(&mut view);
            let ids: Vec<_> = view
                .iter()
                .filter(|b| b.title == "Same")
                .map(|b| b.id.as_str())
                .collect();
            assert_eq!(ids, vec!["first", "second"]);
        }
    }

    #[test]
    fn parse_field_names() {
        assert_eq!("title".parse::<SortField>().unwrap(), SortField::Title);
        assert_eq!(" Percent ".parse::<SortField>().unwrap(), SortField::Percent);
        let err = "size".parse::<SortField>().unwrap_err().to_string();
        assert!(err.contains("unsupported sort field"));
    }

    #[test]
    fn unknown_names_alias_to_author() {
        assert_eq!(SortField::from_name_or_author("bogus"), SortField::Author);
        assert_eq!(SortField::from_name_or_author("genre"), SortField::Genre);
    }
}
