//! Catalog record types.

/// Stable identifier of a catalog record.
pub type RecordId = i64;

/// Name of the bucket that collects records without a category.
pub const UNCATEGORIZED: &str = "uncategorized";

/// One catalog entry as supplied by the dataset.
///
/// Records are immutable for the whole session; the [`super::RecordStore`]
/// owns them exclusively.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Record {
    /// Unique, stable identifier.
    pub id: RecordId,
    /// Short title shown on the card.
    #[serde(default)]
    pub title: String,
    /// Category name; `None` or blank lands in the [`UNCATEGORIZED`] bucket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Long description shown in the detail panel.
    #[serde(default)]
    pub description: String,
    /// Worked example shown in the detail panel.
    #[serde(default)]
    pub example: String,
    /// Ordered links to other records.
    #[serde(default)]
    pub related: Vec<RecordId>,
}

impl Record {
    /// What: Resolve the category bucket this record belongs to.
    ///
    /// Inputs: None
    ///
    /// Output:
    /// - The trimmed category name, or [`UNCATEGORIZED`] when missing or blank.
    #[must_use]
    pub fn category_name(&self) -> &str {
        match self.category.as_deref().map(str::trim) {
            Some(c) if !c.is_empty() => c,
            _ => UNCATEGORIZED,
        }
    }

    /// Whether the record falls into the uncategorized bucket.
    #[must_use]
    pub fn is_uncategorized(&self) -> bool {
        self.category_name() == UNCATEGORIZED
    }
}

/// Records sharing one category, in dataset order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryGroup {
    /// Category display name.
    pub name: String,
    /// Position of the category in first-seen order; `None` for the uncategorized bucket.
    pub palette_index: Option<usize>,
    /// Member record ids in dataset order. Never empty.
    pub members: Vec<RecordId>,
}
