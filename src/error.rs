pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure classes of the catalog core.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// A stored document could not be decoded; the catalog cannot be trusted.
    #[error("book record {key:?} in the catalog is corrupt")]
    DataCorruption {
        key: String,
        #[source]
        source: BoxError,
    },

    #[error("read catalog collection {collection:?}")]
    StoreUnavailable {
        collection: String,
        #[source]
        source: BoxError,
    },

    /// A durable write or delete failed. The in-memory catalog stays authoritative.
    #[error("{op} book record {id}")]
    PersistenceFailure {
        op: &'static str,
        id: String,
        #[source]
        source: BoxError,
    },

    #[error("row {index} is outside the current book list (len {len})")]
    OutOfRange { index: usize, len: usize },
}

impl CatalogError {
    /// Fatal errors abort start-up; the rest are handled where they occur.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::DataCorruption { .. } | Self::StoreUnavailable { .. }
        )
    }
}
