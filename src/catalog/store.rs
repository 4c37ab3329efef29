use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use super::record::{CategoryGroup, Record, RecordId, UNCATEGORIZED};

/// What: Error raised when the dataset cannot back a session.
///
/// Inputs: Generated by [`RecordStore::new`] and [`RecordStore::load_json`].
///
/// Output: Implements `Display`/`Error`; every variant is a fatal startup condition.
#[derive(Debug)]
pub enum CatalogError {
    /// The dataset file could not be read.
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The dataset file is not a JSON array of records.
    Parse {
        /// Path that was parsed.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
    /// The dataset contains no records.
    Empty,
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "could not read dataset {}: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "dataset {} is not a list of records: {source}", path.display())
            }
            Self::Empty => write!(f, "the record dataset is empty"),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Empty => None,
        }
    }
}

/// Immutable record collection for one session.
///
/// Holds records in dataset order, an id index and the derived category groups.
#[derive(Clone, Debug)]
pub struct RecordStore {
    /// Records in dataset order.
    records: Vec<Record>,
    /// Id to position in `records`.
    by_id: HashMap<RecordId, usize>,
    /// Category groups in first-seen order, uncategorized last.
    groups: Vec<CategoryGroup>,
}

impl RecordStore {
    /// What: Build a store from an externally supplied record sequence.
    ///
    /// Inputs:
    /// - `records`: Dataset in display order.
    ///
    /// Output:
    /// - `Ok(RecordStore)`; `Err(CatalogError::Empty)` when no records were supplied.
    ///
    /// Details:
    /// - Duplicate ids keep the first occurrence; later ones are dropped and logged.
    /// - Groups are built from members, so a category without records never exists.
    ///
    /// # Errors
    /// Returns [`CatalogError::Empty`] when `records` is empty.
    pub fn new(records: Vec<Record>) -> Result<Self, CatalogError> {
        if records.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut kept: Vec<Record> = Vec::with_capacity(records.len());
        let mut by_id: HashMap<RecordId, usize> = HashMap::with_capacity(records.len());
        for rec in records {
            if by_id.contains_key(&rec.id) {
                tracing::warn!(id = rec.id, "[Catalog] Dropping record with duplicate id");
                continue;
            }
            by_id.insert(rec.id, kept.len());
            kept.push(rec);
        }
        let groups = build_groups(&kept);
        tracing::debug!(
            records = kept.len(),
            categories = groups.len(),
            "[Catalog] Record store ready"
        );
        Ok(Self {
            records: kept,
            by_id,
            groups,
        })
    }

    /// What: Load the dataset from a JSON file holding an array of records.
    ///
    /// Inputs:
    /// - `path`: Dataset file.
    ///
    /// Output:
    /// - Populated store, or a [`CatalogError`] for unreadable, malformed or empty data.
    ///
    /// # Errors
    /// - [`CatalogError::Io`] when the file cannot be read.
    /// - [`CatalogError::Parse`] when it is not a JSON array of records.
    /// - [`CatalogError::Empty`] when the array holds no records.
    pub fn load_json(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let records: Vec<Record> =
            serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::info!(
            path = %path.display(),
            count = records.len(),
            "[Catalog] Loaded dataset"
        );
        Self::new(records)
    }

    /// Look up a record by id.
    #[must_use]
    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.by_id.get(&id).and_then(|&i| self.records.get(i))
    }

    /// Whether `id` names a known record.
    #[must_use]
    pub fn contains(&self, id: RecordId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always `false`; an empty store cannot be constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Category groups in first-seen order with the uncategorized bucket last.
    #[must_use]
    pub fn groups(&self) -> &[CategoryGroup] {
        &self.groups
    }

    /// What: Find the palette slot of a category by name.
    ///
    /// Inputs:
    /// - `category`: Category display name.
    ///
    /// Output:
    /// - `Some(index)` in first-seen order; `None` for the uncategorized bucket or unknown names.
    #[must_use]
    pub fn palette_index(&self, category: &str) -> Option<usize> {
        self.groups
            .iter()
            .find(|g| g.name == category)
            .and_then(|g| g.palette_index)
    }
}

/// Group records by category, keeping first-seen order and pushing the sentinel bucket last.
fn build_groups(records: &[Record]) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();
    let mut slot: HashMap<&str, usize> = HashMap::new();
    let mut uncategorized: Vec<RecordId> = Vec::new();
    for rec in records {
        if rec.is_uncategorized() {
            uncategorized.push(rec.id);
            continue;
        }
        let name = rec.category_name();
        if let Some(&i) = slot.get(name) {
            groups[i].members.push(rec.id);
        } else {
            slot.insert(name, groups.len());
            groups.push(CategoryGroup {
                name: name.to_string(),
                palette_index: Some(groups.len()),
                members: vec![rec.id],
            });
        }
    }
    if !uncategorized.is_empty() {
        groups.push(CategoryGroup {
            name: UNCATEGORIZED.to_string(),
            palette_index: None,
            members: uncategorized,
        });
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: RecordId, title: &str, category: Option<&str>) -> Record {
        Record {
            id,
            title: title.into(),
            category: category.map(Into::into),
            description: String::new(),
            example: String::new(),
            related: Vec::new(),
        }
    }

    #[test]
    /// What: Groups follow first-seen order and keep dataset order inside each group.
    ///
    /// Inputs:
    /// - Interleaved records across two categories plus one uncategorized record first.
    ///
    /// Output:
    /// - Two named groups in first-seen order followed by the sentinel bucket.
    fn groups_first_seen_order_uncategorized_last() {
        let store = RecordStore::new(vec![
            rec(9, "loose", None),
            rec(3, "c", Some("Writing")),
            rec(1, "a", Some("Assessment")),
            rec(2, "b", Some("Writing")),
        ])
        .expect("non-empty");
        let names: Vec<&str> = store.groups().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Writing", "Assessment", UNCATEGORIZED]);
        assert_eq!(store.groups()[0].members, vec![3, 2]);
        assert_eq!(store.groups()[0].palette_index, Some(0));
        assert_eq!(store.groups()[1].palette_index, Some(1));
        assert_eq!(store.groups()[2].palette_index, None);
        assert_eq!(store.palette_index("Assessment"), Some(1));
    }

    #[test]
    /// What: Empty datasets are rejected and duplicate ids keep the first record.
    fn empty_rejected_and_duplicates_dropped() {
        assert!(matches!(RecordStore::new(Vec::new()), Err(CatalogError::Empty)));

        let store = RecordStore::new(vec![rec(1, "first", Some("X")), rec(1, "second", Some("Y"))])
            .expect("non-empty");
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(1).map(|r| r.title.as_str()), Some("first"));
        assert_eq!(store.groups().len(), 1);
        assert!(store.get(2).is_none());
    }

    #[test]
    /// What: JSON datasets load from disk; malformed and empty files are fatal.
    ///
    /// Inputs:
    /// - A valid file, a JSON object instead of a list, an empty list and a missing path.
    ///
    /// Output:
    /// - One store and three distinct error variants.
    fn load_json_variants() {
        let dir = tempfile::tempdir().expect("tempdir");
        let ok = dir.path().join("ok.json");
        std::fs::write(
            &ok,
            r#"[{"id":1,"title":"Alpha","category":"X","related":[2]},{"id":2,"title":"Beta"}]"#,
        )
        .expect("write");
        let store = RecordStore::load_json(&ok).expect("valid dataset");
        assert_eq!(store.len(), 2);
        assert_eq!(store.groups().len(), 2);

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, r#"{"id":1}"#).expect("write");
        assert!(matches!(
            RecordStore::load_json(&bad),
            Err(CatalogError::Parse { .. })
        ));

        let empty = dir.path().join("empty.json");
        std::fs::write(&empty, "[]").expect("write");
        assert!(matches!(RecordStore::load_json(&empty), Err(CatalogError::Empty)));

        assert!(matches!(
            RecordStore::load_json(&dir.path().join("missing.json")),
            Err(CatalogError::Io { .. })
        ));
    }
}
