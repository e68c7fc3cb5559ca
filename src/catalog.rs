//! In-memory reading-progress catalog.
//!
//! Records live once in `books`, keyed by id. The master index, the master
//! list and the active view all refer to them by id, so an in-place update is
//! visible through every view at once.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::book::{BookInfo, BookRecord, timestamp_now};
use crate::error::{BoxError, CatalogError};
use crate::filter;
use crate::record_store::{BOOKS_COLLECTION, RecordStore};
use crate::sort::{SortField, SortMode};

/// What [`Catalog::upsert_progress`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
    /// Position and length match the stored ones; nothing was written.
    Unchanged,
}

pub struct Catalog<S> {
    store: S,
    books: HashMap<String, BookRecord>,
    by_path: HashMap<String, String>,
    master: Vec<String>,
    active: Vec<String>,
    filter: String,
    sort: SortMode,
}

impl<S: RecordStore> Catalog<S> {
    /// Reads every stored book. An undecodable document, or one without a
    /// unique id, fails the whole load.
    pub fn load(store: S) -> Result<Self, CatalogError> {
        let documents =
            store
                .read_all(BOOKS_COLLECTION)
                .map_err(|err| CatalogError::StoreUnavailable {
                    collection: BOOKS_COLLECTION.to_owned(),
                    source: err.into(),
                })?;

        let mut catalog = Self {
            store,
            books: HashMap::with_capacity(documents.len()),
            by_path: HashMap::with_capacity(documents.len()),
            master: Vec::with_capacity(documents.len()),
            active: Vec::new(),
            filter: String::new(),
            sort: SortMode::default(),
        };

        for document in &documents {
            let corrupt = |source: BoxError| CatalogError::DataCorruption {
                key: document.key.clone(),
                source,
            };
            let book: BookRecord =
                serde_json::from_slice(&document.data).map_err(|err| corrupt(err.into()))?;
            if book.id.is_empty() {
                return Err(corrupt("record has no id".into()));
            }
            if catalog.books.contains_key(&book.id) {
                return Err(corrupt(format!("id {} is used by another record", book.id).into()));
            }
            catalog.insert(book);
        }
        catalog.refresh();

        tracing::debug!(books = catalog.master.len(), "catalog loaded");
        Ok(catalog)
    }

    fn insert(&mut self, book: BookRecord) {
        // A second document for the same path replaces the first in every view.
        if let Some(previous) = self.by_path.insert(book.file_path.clone(), book.id.clone()) {
            tracing::warn!(path = %book.file_path, id = %previous, "duplicate catalog entry for path");
            self.books.remove(&previous);
            self.master.retain(|id| *id != previous);
        }
        self.master.push(book.id.clone());
        self.books.insert(book.id.clone(), book);
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort
    }

    /// Number of records in the catalog, filtered or not.
    pub fn len(&self) -> usize {
        self.master.len()
    }

    pub fn is_empty(&self) -> bool {
        self.master.is_empty()
    }

    /// All records in load order.
    pub fn books(&self) -> impl Iterator<Item = &BookRecord> + '_ {
        self.master.iter().filter_map(|id| self.books.get(id))
    }

    /// The filtered and sorted book list shown to the user.
    pub fn active(&self) -> impl Iterator<Item = &BookRecord> + '_ {
        self.active.iter().filter_map(|id| self.books.get(id))
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    pub fn active_at(&self, index: usize) -> Option<&BookRecord> {
        self.active.get(index).and_then(|id| self.books.get(id))
    }

    pub fn lookup(&self, path: &str) -> Option<&BookRecord> {
        self.by_path.get(path).and_then(|id| self.books.get(id))
    }

    /// Replaces the filter text and rebuilds the active view from the master list.
    pub fn set_filter(&mut self, text: &str) {
        if text == self.filter {
            return;
        }
        self.filter = text.to_owned();
        self.refresh();
    }

    pub fn set_sort_mode(&mut self, field: SortField, ascending: bool) {
        let mode = SortMode::new(field, ascending);
        if mode == self.sort {
            return;
        }
        self.sort = mode;
        self.resort();
    }

    /// Like [`Self::set_sort_mode`], ordering by author for unknown field names.
    pub fn set_sort_mode_by_name(&mut self, field: &str, ascending: bool) {
        self.set_sort_mode(SortField::from_name_or_author(field), ascending);
    }

    fn refresh(&mut self) {
        let view = filter::apply(self.books(), &self.filter);
        self.active = view.into_iter().map(|book| book.id.clone()).collect();
        self.resort();
    }

    fn resort(&mut self) {
        let books = &self.books;
        let mode = self.sort;
        self.active
            .sort_by(|a, b| match (books.get(a), books.get(b)) {
                (Some(a), Some(b)) => mode.compare(a, b),
                _ => Ordering::Equal,
            });
    }

    /// Records reading progress for `path`, creating the record on first close.
    ///
    /// The in-memory catalog is updated even when the durable write fails.
    pub fn upsert_progress(
        &mut self,
        path: &str,
        position: usize,
        total_lines: usize,
        info: &BookInfo,
    ) -> UpsertOutcome {
        let existing = self.by_path.get(path).and_then(|id| self.books.get_mut(id));
        let (outcome, id) = match existing {
            Some(book) => {
                if book.line_last == position && book.line_total == total_lines {
                    return UpsertOutcome::Unchanged;
                }
                book.line_last = position;
                book.line_total = total_lines;
                if total_lines.checked_sub(1) == Some(position) && !book.is_completed() {
                    book.completed = timestamp_now();
                    tracing::info!(path, "book completed");
                }
                (UpsertOutcome::Updated, book.id.clone())
            }
            None => {
                let book = BookRecord::new(path, info, position, total_lines);
                let id = book.id.clone();
                let visible = filter::matches(&book, &self.filter);
                self.insert(book);
                if visible {
                    self.active.push(id.clone());
                }
                (UpsertOutcome::Created, id)
            }
        };

        self.resort();
        if let Err(err) = self.persist(&id) {
            tracing::warn!(?err, "catalog write failed; keeping in-memory state");
        }
        tracing::debug!(path, position, total_lines, ?outcome, "progress recorded");
        outcome
    }

    fn persist(&self, id: &str) -> Result<(), CatalogError> {
        let failure = |source: BoxError| CatalogError::PersistenceFailure {
            op: "write",
            id: id.to_owned(),
            source,
        };
        let book = self
            .books
            .get(id)
            .ok_or_else(|| failure("record is not in the catalog".into()))?;
        let document = serde_json::to_vec_pretty(book).map_err(|err| failure(err.into()))?;
        self.store
            .write(BOOKS_COLLECTION, id, &document)
            .map_err(|err| failure(err.into()))
    }

    /// Removes the record shown at `index` of the active view.
    ///
    /// Out-of-range indices leave the catalog and the store untouched.
    pub fn delete_at(&mut self, index: usize) -> Option<BookRecord> {
        match self.try_delete_at(index) {
            Ok(book) => Some(book),
            Err(err) => {
                tracing::debug!(error = %err, "delete declined");
                None
            }
        }
    }

    pub fn try_delete_at(&mut self, index: usize) -> Result<BookRecord, CatalogError> {
        let len = self.active.len();
        let out_of_range = || CatalogError::OutOfRange { index, len };
        let id = self.active.get(index).ok_or_else(out_of_range)?.clone();
        let book = self.books.remove(&id).ok_or_else(out_of_range)?;
        self.active.remove(index);
        if let Err(err) = self.store.delete(BOOKS_COLLECTION, &id) {
            let err = CatalogError::PersistenceFailure {
                op: "delete",
                id: id.clone(),
                source: err.into(),
            };
            tracing::warn!(?err, "catalog delete failed; keeping in-memory state");
        }
        if let Some(position) = self.master.iter().position(|candidate| *candidate == id) {
            self.master.remove(position);
        }

        self.by_path.remove(&book.file_path);
        tracing::info!(path = %book.file_path, "book removed from catalog");
        Ok(book)
    }
}

impl<S> std::fmt::Debug for Catalog<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("books", &self.master.len())
            .field("active", &self.active.len())
            .field("filter", &self.filter)
            .field("sort", &self.sort)
            .finish()
    }
}
