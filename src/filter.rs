use crate::book::BookRecord;

/// Case-insensitive substring match over author names, title, path and sequence.
/// An empty filter matches everything.
#[must_use]
pub fn matches(book: &BookRecord, filter: &str) -> bool {
    if filter.is_empty() {
        return true;
    }
    let needle = filter.to_lowercase();
    matches_lowercase(book, &needle)
}

fn matches_lowercase(book: &BookRecord, needle: &str) -> bool {
    [
        &book.first_name,
        &book.last_name,
        &book.title,
        &book.file_path,
        &book.sequence,
    ]
    .into_iter()
    .any(|field| field.to_lowercase().contains(needle))
}

/// Records of `books` matching `filter`, in their original order.
pub fn apply<'a, I>(books: I, filter: &str) -> Vec<&'a BookRecord>
where
    I: IntoIterator<Item = &'a BookRecord>,
{
    let needle = filter.to_lowercase();
    books
        .into_iter()
        .filter(|book| needle.is_empty() || matches_lowercase(book, &needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(first: &str, last: &str, title: &str, path: &str, sequence: &str) -> BookRecord {
        BookRecord {
            first_name: first.to_owned(),
            last_name: last.to_owned(),
            title: title.to_owned(),
            file_path: path.to_owned(),
            sequence: sequence.to_owned(),
            genre: "sf_space".to_owned(),
            language: "en".to_owned(),
            ..BookRecord::default()
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(matches(&BookRecord::default(), ""));
    }

    #[test]
    fn matches_each_searchable_field_ignoring_case() {
        let b = book("Isaac", "Asimov", "Foundation", "/lib/f.fb2", "Galactic Empire");
        assert!(matches(&b, "isa"));
        assert!(matches(&b, "ASIM"));
        assert!(matches(&b, "undat"));
        assert!(matches(&b, "/LIB/"));
        assert!(matches(&b, "empire"));
        assert!(!matches(&b, "bell"));
    }

    #[test]
    fn genre_and_language_are_not_searched() {
        let b = book("Isaac", "Asimov", "Foundation", "/lib/f.fb2", "");
        assert!(!matches(&b, "sf_space"));
        assert!(!matches(&b, "en"));
    }

    #[test]
    fn non_ascii_filters_fold_case() {
        let b = book("Лев", "Толстой", "Война и мир", "/lib/w.fb2", "");
        assert!(matches(&b, "ТОЛСТ"));
        assert!(matches(&b, "война"));
    }

    #[test]
    fn apply_keeps_input_order() {
        let books = [
            book("Anna", "Bell", "Z", "/z.fb2", ""),
            book("Isaac", "Asimov", "M", "/m.fb2", ""),
            book("Anna", "Bell", "A", "/a.fb2", ""),
        ];
        let hits = apply(&books, "bell");
        let titles: Vec<_> = hits.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Z", "A"]);

        assert_eq!(apply(&books, "").len(), 3);
    }
}
