//! Row records, row collections and structural change detection.

use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use serde_json::{Map, Value};

/// Field name to value mapping for one row.
pub type Record = Map<String, Value>;

// =============================================================================
// Row
// =============================================================================

/// Shared handle to a record.
///
/// Rows compare and hash by identity: two handles are equal only when they
/// point at the same record. Field updates through [`Row::set`] or
/// [`Row::update`] change the record in place and are not structural.
#[derive(Debug, Clone)]
pub struct Row {
    inner: Arc<RwLock<Record>>,
}

impl Row {
    pub fn new(record: Record) -> Self {
        Self {
            inner: Arc::new(RwLock::new(record)),
        }
    }

    /// Build a row from a JSON object. Non-object values yield an empty row.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(record) => Self::new(record),
            _ => Self::new(Record::new()),
        }
    }

    /// Get a clone of one field.
    pub fn get(&self, field: &str) -> Option<Value> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.get(field).cloned())
    }

    /// Set one field in place.
    pub fn set(&self, field: impl Into<String>, value: Value) {
        if let Ok(mut guard) = self.inner.write() {
            guard.insert(field.into(), value);
        }
    }

    /// Update the record in place.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut Record),
    {
        if let Ok(mut guard) = self.inner.write() {
            f(&mut guard);
        }
    }

    /// Get a clone of the whole record.
    pub fn record(&self) -> Record {
        self.inner
            .read()
            .map(|g| g.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// True when both handles point at the same record.
    pub fn same(&self, other: &Row) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for Row {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl Eq for Row {}

impl Hash for Row {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.inner).hash(state);
    }
}

// =============================================================================
// RowCollection
// =============================================================================

/// Identity of a row collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollectionId(usize);

impl CollectionId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for CollectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__rows_{}", self.0)
    }
}

#[derive(Debug, Default)]
struct RowsInner {
    rows: Vec<Row>,
    version: u64,
}

/// Shared handle to an ordered row collection.
///
/// Cloning the handle shares the collection. [`RowCollection::new`] creates
/// a collection with a fresh identity. Adding or removing rows bumps the
/// structural version; editing a row's fields does not.
#[derive(Debug, Clone)]
pub struct RowCollection {
    id: CollectionId,
    inner: Arc<RwLock<RowsInner>>,
}

impl Default for RowCollection {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl FromIterator<Row> for RowCollection {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl RowCollection {
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            id: CollectionId::new(),
            inner: Arc::new(RwLock::new(RowsInner { rows, version: 0 })),
        }
    }

    pub fn id(&self) -> CollectionId {
        self.id
    }

    /// Structural version, bumped on every addition or removal.
    pub fn version(&self) -> u64 {
        self.inner.read().map(|g| g.version).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|g| g.rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get a row by index.
    pub fn get(&self, index: usize) -> Option<Row> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.rows.get(index).cloned())
    }

    /// Get all row handles in order.
    pub fn rows(&self) -> Vec<Row> {
        self.inner
            .read()
            .map(|g| g.rows.clone())
            .unwrap_or_default()
    }

    pub fn push(&self, row: Row) {
        self.mutate(|rows| rows.push(row));
    }

    /// Insert a row, clamping the index to the end of the collection.
    pub fn insert(&self, index: usize, row: Row) {
        self.mutate(|rows| {
            let index = index.min(rows.len());
            rows.insert(index, row);
        });
    }

    /// Remove the row at `index`.
    pub fn remove(&self, index: usize) -> Option<Row> {
        let mut removed = None;
        if let Ok(mut guard) = self.inner.write()
            && index < guard.rows.len()
        {
            removed = Some(guard.rows.remove(index));
            guard.version += 1;
        }
        removed
    }

    /// Keep only the rows matching `keep`. Bumps the version only when a
    /// row was dropped.
    pub fn retain<F>(&self, keep: F)
    where
        F: FnMut(&Row) -> bool,
    {
        if let Ok(mut guard) = self.inner.write() {
            let before = guard.rows.len();
            guard.rows.retain(keep);
            if guard.rows.len() != before {
                guard.version += 1;
            }
        }
    }

    pub fn clear(&self) {
        self.mutate(|rows| rows.clear());
    }

    /// True when both handles share the same collection.
    pub fn same(&self, other: &RowCollection) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    fn mutate<F>(&self, f: F)
    where
        F: FnOnce(&mut Vec<Row>),
    {
        if let Ok(mut guard) = self.inner.write() {
            f(&mut guard.rows);
            guard.version += 1;
        }
    }
}

// =============================================================================
// Change detection
// =============================================================================

/// How a row collection changed since the last check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// A different collection was supplied.
    Replaced,
    /// The same collection gained or lost rows.
    Structural,
}

/// Structural change reported by [`RowDiffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowsChange {
    pub kind: ChangeKind,
    pub collection: CollectionId,
    pub version: u64,
    pub len: usize,
    pub previous_len: usize,
}

#[derive(Debug)]
struct Baseline {
    collection: RowCollection,
    version: u64,
    len: usize,
}

/// Detects replacement of, or additions/removals within, a row collection.
///
/// Compares identity and the structural version stamp only; row contents are
/// never inspected.
#[derive(Debug, Default)]
pub struct RowDiffer {
    baseline: Option<Baseline>,
}

impl RowDiffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare `rows` with the baseline. On change, `rows` becomes the new
    /// baseline.
    pub fn diff(&mut self, rows: &RowCollection) -> Option<RowsChange> {
        let version = rows.version();
        let (kind, previous_len) = match &self.baseline {
            Some(base) if base.collection.same(rows) => {
                if base.version == version {
                    return None;
                }
                (ChangeKind::Structural, base.len)
            }
            Some(base) => (ChangeKind::Replaced, base.len),
            None => (ChangeKind::Replaced, 0),
        };

        let len = rows.len();
        self.baseline = Some(Baseline {
            collection: rows.clone(),
            version,
            len,
        });

        Some(RowsChange {
            kind,
            collection: rows.id(),
            version,
            len,
            previous_len,
        })
    }

    /// Forget the baseline so the next check reports a replacement.
    pub fn reset(&mut self) {
        self.baseline = None;
    }
}
