//! Local mirror of one record collection.

use sceneflow_core::types::RecordId;
use sceneflow_store::change::Change;
use sceneflow_store::StoredRecord;

/// The local, ordered view of one collection: newest first, plus the
/// in-flight-load and last-error flags a view renders from.
///
/// A bulk load and the change stream may land in any order; the
/// operations here are id-keyed and idempotent, so every interleaving
/// converges to the same final sequence.
#[derive(Debug, Clone)]
pub struct CollectionStore<T> {
    records: Vec<T>,
    loading: bool,
    error: Option<String>,
}

impl<T: StoredRecord + Clone> CollectionStore<T> {
    /// An empty store in loading state, as a view first renders it.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            loading: true,
            error: None,
        }
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn get(&self, id: RecordId) -> Option<&T> {
        self.records.iter().find(|r| r.record_id() == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Mark a reload as started. Records stay visible while it runs.
    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    /// Replace the whole sequence with a fresh bulk-load result.
    pub fn load_succeeded(&mut self, records: Vec<T>) {
        self.records = records;
        self.loading = false;
        self.error = None;
    }

    /// Record a failed bulk load. Previously held records are kept, so a
    /// transient reload failure never blanks a populated view.
    pub fn load_failed(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    /// Fold one streamed change into the sequence.
    ///
    /// Inserts prepend unless the id is already present (the load and the
    /// stream can both deliver a freshly created record). Updates replace
    /// in place, keeping the record's position; an update for an id not
    /// held locally is dropped, since the in-flight load will carry the
    /// current state. Deletes for unknown ids are a no-op.
    pub fn apply(&mut self, change: Change<T>) {
        match change {
            Change::Insert(record) => {
                if self.get(record.record_id()).is_none() {
                    self.records.insert(0, record);
                }
            }
            Change::Update(record) => {
                if let Some(existing) = self
                    .records
                    .iter_mut()
                    .find(|r| r.record_id() == record.record_id())
                {
                    *existing = record;
                }
            }
            Change::Delete(id) => {
                self.records.retain(|r| r.record_id() != id);
            }
        }
    }
}

impl<T: StoredRecord + Clone> Default for CollectionStore<T> {
    fn default() -> Self {
        Self::new()
    }
}
