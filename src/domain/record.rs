use indexmap::IndexMap;

/// Flat string-keyed row. Key order is column order.
pub type Record = IndexMap<String, String>;

/// Field holding the label of the source a record came from
pub const SOURCE_FIELD: &str = "source";

/// Field holding the 1-based position of a consolidated record
pub const ID_FIELD: &str = "id";

/// Field stamped on every chunk record with the batch identifier
pub const BATCH_ID_FIELD: &str = "chunk_batch_id";

/// Field stamped on every chunk record with the generation time
pub const GENERATED_AT_FIELD: &str = "chunk_generated_at";

/// Separator used when joining dedupe-key values
pub const KEY_SEPARATOR: &str = "|";

/// Build a record from `(column, value)` pairs, keeping their order
pub fn record_from_pairs<I, K, V>(pairs: I) -> Record
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
