use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::record::Record;
use super::source::SourceSide;

/// Per-source renames from original column names to canonical column names.
///
/// Columns without an entry keep their original name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnMapping {
    #[serde(default)]
    pub a: HashMap<String, String>,
    #[serde(default)]
    pub b: HashMap<String, String>,
}

impl ColumnMapping {
    /// Mapping that renames nothing
    pub fn identity() -> Self {
        Self::default()
    }

    /// Add a rename for one side
    pub fn with_rename(
        mut self,
        side: SourceSide,
        original: impl Into<String>,
        canonical: impl Into<String>,
    ) -> Self {
        self.side_mut(side).insert(original.into(), canonical.into());
        self
    }

    pub fn side(&self, side: SourceSide) -> &HashMap<String, String> {
        match side {
            SourceSide::A => &self.a,
            SourceSide::B => &self.b,
        }
    }

    fn side_mut(&mut self, side: SourceSide) -> &mut HashMap<String, String> {
        match side {
            SourceSide::A => &mut self.a,
            SourceSide::B => &mut self.b,
        }
    }

    /// Canonical name for a column of the given side
    pub fn canonical_name<'a>(&'a self, side: SourceSide, column: &'a str) -> &'a str {
        self.side(side)
            .get(column)
            .map(String::as_str)
            .unwrap_or(column)
    }

    /// Rename every key of `row` in place.
    ///
    /// When two original columns land on the same canonical name, the later
    /// value wins and the earlier column position is kept.
    pub fn apply(&self, side: SourceSide, row: &Record) -> Record {
        let mut mapped = Record::with_capacity(row.len());
        for (column, value) in row {
            mapped.insert(
                self.canonical_name(side, column).to_string(),
                value.clone(),
            );
        }
        mapped
    }
}
