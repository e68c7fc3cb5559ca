use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

/// Collection holding one document per known book.
pub const BOOKS_COLLECTION: &str = "books";

/// One raw document together with the id it is stored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDocument {
    pub key: String,
    pub data: Vec<u8>,
}

/// Document persistence addressed by collection name and record id.
pub trait RecordStore {
    /// Every document of `collection`. A collection that was never written is empty.
    fn read_all(&self, collection: &str) -> anyhow::Result<Vec<StoredDocument>>;
    /// Inserts or replaces one document.
    fn write(&self, collection: &str, id: &str, document: &[u8]) -> anyhow::Result<()>;
    fn delete(&self, collection: &str, id: &str) -> anyhow::Result<()>;
}

/// Stores each document as `<base_dir>/<collection>/<id>.json`.
#[derive(Debug, Clone)]
pub struct LocalFsRecordStore {
    base_dir: PathBuf,
}

impl LocalFsRecordStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn collection_dir(&self, collection: &str) -> PathBuf {
        self.base_dir.join(collection)
    }

    fn record_path(&self, collection: &str, id: &str) -> PathBuf {
        self.collection_dir(collection).join(format!("{id}.json"))
    }
}

impl RecordStore for LocalFsRecordStore {
    fn read_all(&self, collection: &str) -> anyhow::Result<Vec<StoredDocument>> {
        let dir = self.collection_dir(collection);
        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(err).with_context(|| format!("read collection dir: {}", dir.display()));
            }
        };

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.with_context(|| format!("read dir entry: {}", dir.display()))?;
            let path = entry.path();
            if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            let data =
                std::fs::read(&path).with_context(|| format!("read record: {}", path.display()))?;
            let key = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
            documents.push(StoredDocument { key, data });
        }
        Ok(documents)
    }

    fn write(&self, collection: &str, id: &str, document: &[u8]) -> anyhow::Result<()> {
        write_atomic(&self.record_path(collection, id), document)
    }

    fn delete(&self, collection: &str, id: &str) -> anyhow::Result<()> {
        let path = self.record_path(collection, id);
        std::fs::remove_file(&path).with_context(|| format!("remove record: {}", path.display()))
    }
}

fn write_atomic(path: &Path, data: &[u8]) -> anyhow::Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("path has no parent: {}", path.display()))?;
    std::fs::create_dir_all(parent)
        .with_context(|| format!("create parent dir: {}", parent.display()))?;

    let tmp_path = path.with_extension(format!("tmp.{}", uuid::Uuid::new_v4().simple()));
    std::fs::write(&tmp_path, data)
        .with_context(|| format!("write tmp: {}", tmp_path.display()))?;
    std::fs::rename(&tmp_path, path)
        .with_context(|| format!("rename tmp to final: {}", path.display()))?;
    Ok(())
}

/// In-process store; writes and deletes can be made to fail on demand.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    documents: RefCell<BTreeMap<(String, String), Vec<u8>>>,
    fail_writes: Cell<bool>,
    fail_deletes: Cell<bool>,
    writes: Cell<usize>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a document without counting it as a write.
    pub fn insert(&self, collection: &str, id: &str, document: impl Into<Vec<u8>>) {
        self.documents
            .borrow_mut()
            .insert((collection.to_owned(), id.to_owned()), document.into());
    }

    pub fn get(&self, collection: &str, id: &str) -> Option<Vec<u8>> {
        self.documents
            .borrow()
            .get(&(collection.to_owned(), id.to_owned()))
            .cloned()
    }

    pub fn contains(&self, collection: &str, id: &str) -> bool {
        self.get(collection, id).is_some()
    }

    pub fn len(&self, collection: &str) -> usize {
        self.documents
            .borrow()
            .keys()
            .filter(|(c, _)| c == collection)
            .count()
    }

    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }

    /// Successful writes since creation.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    pub fn set_fail_deletes(&self, fail: bool) {
        self.fail_deletes.set(fail);
    }
}

impl RecordStore for MemoryRecordStore {
    fn read_all(&self, collection: &str) -> anyhow::Result<Vec<StoredDocument>> {
        Ok(self
            .documents
            .borrow()
            .iter()
            .filter(|((c, _), _)| c == collection)
            .map(|((_, key), data)| StoredDocument {
                key: key.clone(),
                data: data.clone(),
            })
            .collect())
    }

    fn write(&self, collection: &str, id: &str, document: &[u8]) -> anyhow::Result<()> {
        if self.fail_writes.get() {
            anyhow::bail!("memory store rejects writes");
        }
        self.insert(collection, id, document);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn delete(&self, collection: &str, id: &str) -> anyhow::Result<()> {
        if self.fail_deletes.get() {
            anyhow::bail!("memory store rejects deletes");
        }
        self.documents
            .borrow_mut()
            .remove(&(collection.to_owned(), id.to_owned()))
            .map(|_| ())
            .ok_or_else(|| anyhow::anyhow!("no record {id} in {collection}"))
    }
}
