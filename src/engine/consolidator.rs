use indexmap::IndexMap;
use indexmap::map::Entry;
use tracing::{debug, info};

use crate::domain::{
    ColumnMapping, DomainError, ID_FIELD, KEY_SEPARATOR, Record, SOURCE_FIELD, SourceSide,
    SourceTag,
};

/// Rows of one upload together with the label they are tagged with
#[derive(Debug, Clone, Copy)]
pub struct SourceRows<'a> {
    pub tag: &'a SourceTag,
    pub rows: &'a [Record],
}

impl<'a> SourceRows<'a> {
    pub fn new(tag: &'a SourceTag, rows: &'a [Record]) -> Self {
        Self { tag, rows }
    }
}

/// Identity used to detect duplicates.
///
/// Records whose dedupe fields are all empty get a synthetic key built from
/// their sequence number, so they never collide with each other or with a
/// composite key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum DedupeKey {
    Composite(String),
    Synthetic(usize),
}

/// A mapped, tagged record waiting to be merged
#[derive(Debug)]
struct Candidate<'a> {
    seq: usize,
    tag: &'a SourceTag,
    fields: Record,
}

/// Merge two sources into one deduplicated record list.
///
/// Source A rows are processed before source B rows. Colliding records are
/// merged field by field: the priority source wins outright, otherwise the
/// later record wins. Every output record carries `source` (the winner's
/// label) and a sequential 1-based `id`.
pub fn consolidate(
    source_a: SourceRows<'_>,
    source_b: SourceRows<'_>,
    dedupe_keys: &[String],
    priority_source: &SourceTag,
    mapping: &ColumnMapping,
) -> Vec<Record> {
    let candidates = tag_rows(SourceSide::A, source_a, mapping, 0).chain(tag_rows(
        SourceSide::B,
        source_b,
        mapping,
        source_a.rows.len(),
    ));

    let mut winners: IndexMap<DedupeKey, Candidate<'_>> = IndexMap::new();

    for current in candidates {
        let key = dedupe_key(&current, dedupe_keys);
        match winners.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(current);
            }
            Entry::Occupied(mut slot) => {
                debug!(
                    key = ?slot.key(),
                    existing = %slot.get().tag,
                    current = %current.tag,
                    "Merging duplicate record"
                );
                merge_into(slot.get_mut(), current, priority_source);
            }
        }
    }

    winners
        .into_values()
        .enumerate()
        .map(|(index, candidate)| {
            let mut fields = candidate.fields;
            fields.insert(ID_FIELD.to_string(), (index + 1).to_string());
            fields
        })
        .collect()
}

fn tag_rows<'a>(
    side: SourceSide,
    source: SourceRows<'a>,
    mapping: &'a ColumnMapping,
    first_seq: usize,
) -> impl Iterator<Item = Candidate<'a>> + 'a {
    source.rows.iter().enumerate().map(move |(offset, row)| {
        let mut fields = mapping.apply(side, row);
        fields.insert(SOURCE_FIELD.to_string(), source.tag.to_string());
        Candidate {
            seq: first_seq + offset,
            tag: source.tag,
            fields,
        }
    })
}

fn dedupe_key(candidate: &Candidate<'_>, dedupe_keys: &[String]) -> DedupeKey {
    let values: Vec<&str> = dedupe_keys
        .iter()
        .map(|column| {
            candidate
                .fields
                .get(column)
                .map(String::as_str)
                .unwrap_or("")
        })
        .collect();

    if values.iter().all(|value| value.is_empty()) {
        DedupeKey::Synthetic(candidate.seq)
    } else {
        DedupeKey::Composite(values.join(KEY_SEPARATOR))
    }
}

/// Whether the record met later in the walk beats the stored one
fn current_wins(current: &SourceTag, existing: &SourceTag, priority: &SourceTag) -> bool {
    match (current == priority, existing == priority) {
        (true, false) => true,
        (false, true) => false,
        // Tie: the later record wins
        (true, true) | (false, false) => true,
    }
}

/// Shallow merge: winner fields overwrite loser fields, loser-only fields survive.
/// Column order is the loser's followed by any columns only the winner has.
fn merge_into<'a>(existing: &mut Candidate<'a>, current: Candidate<'a>, priority: &SourceTag) {
    if current_wins(current.tag, existing.tag, priority) {
        existing.fields.extend(current.fields);
        existing.tag = current.tag;
    } else {
        let mut merged = current.fields;
        merged.extend(existing.fields.drain(..));
        existing.fields = merged;
    }
    existing
        .fields
        .insert(SOURCE_FIELD.to_string(), existing.tag.to_string());
}

/// Counts describing one consolidation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsolidationReport {
    pub source_a_rows: usize,
    pub source_b_rows: usize,
    pub consolidated: usize,
}

impl ConsolidationReport {
    /// Rows folded into another record
    pub fn duplicates_removed(&self) -> usize {
        (self.source_a_rows + self.source_b_rows).saturating_sub(self.consolidated)
    }
}

/// Output of [`Consolidator::run`]
#[derive(Debug, Clone)]
pub struct Consolidation {
    pub records: Vec<Record>,
    pub report: ConsolidationReport,
}

/// Consolidation settings bound to a pair of source labels
#[derive(Debug, Clone)]
pub struct Consolidator {
    source_a: SourceTag,
    source_b: SourceTag,
    dedupe_keys: Vec<String>,
    priority_source: SourceTag,
    mapping: ColumnMapping,
}

impl Consolidator {
    /// Create a consolidator; the two source labels must differ
    pub fn new(
        source_a: SourceTag,
        source_b: SourceTag,
        dedupe_keys: Vec<String>,
        priority_source: SourceTag,
        mapping: ColumnMapping,
    ) -> Result<Self, DomainError> {
        if source_a == source_b {
            return Err(DomainError::DuplicateSourceLabel(source_a.to_string()));
        }
        Ok(Self {
            source_a,
            source_b,
            dedupe_keys,
            priority_source,
            mapping,
        })
    }

    pub fn priority_source(&self) -> &SourceTag {
        &self.priority_source
    }

    /// Consolidate both sources and report the counts
    pub fn run(&self, a_rows: &[Record], b_rows: &[Record]) -> Consolidation {
        let records = consolidate(
            SourceRows::new(&self.source_a, a_rows),
            SourceRows::new(&self.source_b, b_rows),
            &self.dedupe_keys,
            &self.priority_source,
            &self.mapping,
        );

        let report = ConsolidationReport {
            source_a_rows: a_rows.len(),
            source_b_rows: b_rows.len(),
            consolidated: records.len(),
        };

        info!(
            source_a_rows = report.source_a_rows,
            source_b_rows = report.source_b_rows,
            consolidated = report.consolidated,
            duplicates_removed = report.duplicates_removed(),
            "Consolidation finished"
        );

        Consolidation { records, report }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record_from_pairs;

    fn tags() -> (SourceTag, SourceTag) {
        (
            SourceTag::new("Spider").unwrap(),
            SourceTag::new("Gosom").unwrap(),
        )
    }

    fn keys(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn run(
        a: &[Record],
        b: &[Record],
        dedupe: &[&str],
        priority: &str,
        mapping: &ColumnMapping,
    ) -> Vec<Record> {
        let (tag_a, tag_b) = tags();
        let priority = SourceTag::new(priority).unwrap();
        consolidate(
            SourceRows::new(&tag_a, a),
            SourceRows::new(&tag_b, b),
            &keys(dedupe),
            &priority,
            mapping,
        )
    }

    #[test]
    fn empty_inputs_yield_empty_output() {
        let out = run(&[], &[], &["name"], "Gosom", &ColumnMapping::identity());
        assert!(out.is_empty());
    }

    #[test]
    fn priority_record_wins_and_loser_fields_survive() {
        let a = vec![record_from_pairs([
            ("id", "1"),
            ("name", "Company A"),
            ("url", "a.com"),
        ])];
        let b = vec![record_from_pairs([
            ("guid", "a"),
            ("company_name", "Company A"),
            ("website", "a.com"),
        ])];
        let mapping = ColumnMapping::identity().with_rename(SourceSide::B, "company_name", "name");

        let out = run(&a, &b, &["name"], "Gosom", &mapping);

        assert_eq!(out.len(), 1);
        let merged = &out[0];
        assert_eq!(merged["source"], "Gosom");
        assert_eq!(merged["website"], "a.com");
        assert_eq!(merged["url"], "a.com");
        assert_eq!(merged["guid"], "a");
        assert_eq!(merged["id"], "1");
    }

    #[test]
    fn existing_priority_record_is_not_overwritten_by_later_record() {
        let a = vec![record_from_pairs([("name", "Acme"), ("phone", "111"), ("city", "Lima")])];
        let b = vec![record_from_pairs([("name", "Acme"), ("phone", "222"), ("email", "x@acme")])];

        let out = run(&a, &b, &["name"], "Spider", &ColumnMapping::identity());

        assert_eq!(out.len(), 1);
        let merged = &out[0];
        assert_eq!(merged["source"], "Spider");
        assert_eq!(merged["phone"], "111");
        assert_eq!(merged["city"], "Lima");
        assert_eq!(merged["email"], "x@acme");
    }

    #[test]
    fn later_record_wins_when_neither_matches_priority() {
        let a = vec![
            record_from_pairs([("name", "Acme"), ("phone", "111")]),
            record_from_pairs([("name", "Acme"), ("phone", "222")]),
        ];

        let out = run(&a, &[], &["name"], "Nobody", &ColumnMapping::identity());

        assert_eq!(out.len(), 1);
        assert_eq!(out[0]["phone"], "222");
        assert_eq!(out[0]["source"], "Spider");
    }

    #[test]
    fn later_record_wins_when_both_match_priority() {
        let b = vec![
            record_from_pairs([("name", "Acme"), ("phone", "111")]),
            record_from_pairs([("name", "Acme"), ("phone", "222")]),
        ];

        let out = run(&[], &b, &["name"], "Gosom", &ColumnMapping::identity());

        assert_eq!(out.len(), 1);
        assert_eq!(out[0]["phone"], "222");
    }

    #[test]
    fn non_priority_later_record_loses_to_priority_existing() {
        let a = vec![record_from_pairs([("name", "Acme"), ("phone", "111")])];
        let b = vec![record_from_pairs([("name", "Acme"), ("phone", "222")])];

        let out = run(&a, &b, &["name"], "Spider", &ColumnMapping::identity());

        assert_eq!(out[0]["phone"], "111");
        assert_eq!(out[0]["source"], "Spider");
    }

    #[test]
    fn records_without_dedupe_values_are_never_merged() {
        let a = vec![
            record_from_pairs([("name", ""), ("phone", "1")]),
            record_from_pairs([("phone", "2")]),
        ];
        let b = vec![record_from_pairs([("name", ""), ("phone", "3")])];

        let out = run(&a, &b, &["name"], "Gosom", &ColumnMapping::identity());

        assert_eq!(out.len(), 3);
        let phones: Vec<_> = out.iter().map(|r| r["phone"].as_str()).collect();
        assert_eq!(phones, vec!["1", "2", "3"]);
    }

    #[test]
    fn empty_dedupe_key_list_keeps_every_record() {
        let a = vec![
            record_from_pairs([("name", "Acme")]),
            record_from_pairs([("name", "Acme")]),
        ];

        let out = run(&a, &a, &[], "Gosom", &ColumnMapping::identity());

        assert_eq!(out.len(), 4);
    }

    #[test]
    fn composite_key_joins_all_columns() {
        let a = vec![
            record_from_pairs([("name", "Acme"), ("city", "Lima")]),
            record_from_pairs([("name", "Acme"), ("city", "Quito")]),
        ];
        let b = vec![record_from_pairs([("name", "Acme"), ("city", "Lima"), ("rating", "4.5")])];

        let out = run(&a, &b, &["name", "city"], "Gosom", &ColumnMapping::identity());

        assert_eq!(out.len(), 2);
        assert_eq!(out[0]["city"], "Lima");
        assert_eq!(out[0]["rating"], "4.5");
        assert_eq!(out[1]["city"], "Quito");
    }

    #[test]
    fn partially_missing_key_fields_still_dedupe() {
        let a = vec![record_from_pairs([("name", "Acme")])];
        let b = vec![record_from_pairs([("name", "Acme"), ("city", "")])];

        let out = run(&a, &b, &["name", "city"], "Gosom", &ColumnMapping::identity());

        assert_eq!(out.len(), 1);
        assert_eq!(out[0]["source"], "Gosom");
    }

    #[test]
    fn merged_record_keeps_first_seen_position() {
        let a = vec![
            record_from_pairs([("name", "Acme")]),
            record_from_pairs([("name", "Beta")]),
        ];
        let b = vec![
            record_from_pairs([("name", "Gamma")]),
            record_from_pairs([("name", "Acme"), ("phone", "9")]),
        ];

        let out = run(&a, &b, &["name"], "Gosom", &ColumnMapping::identity());

        let names: Vec<_> = out.iter().map(|r| r["name"].as_str()).collect();
        assert_eq!(names, vec!["Acme", "Beta", "Gamma"]);
        let ids: Vec<_> = out.iter().map(|r| r["id"].as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(out[0]["phone"], "9");
    }

    #[test]
    fn existing_id_column_keeps_its_position() {
        let a = vec![record_from_pairs([("id", "77"), ("name", "Acme")])];

        let out = run(&a, &[], &["name"], "Gosom", &ColumnMapping::identity());

        let keys: Vec<_> = out[0].keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["id", "name", "source"]);
        assert_eq!(out[0]["id"], "1");
    }

    #[test]
    fn incoming_source_column_is_replaced_by_tag() {
        let a = vec![record_from_pairs([("name", "Acme"), ("source", "maps")])];

        let out = run(&a, &[], &["name"], "Gosom", &ColumnMapping::identity());

        assert_eq!(out[0]["source"], "Spider");
    }

    #[test]
    fn consolidator_rejects_identical_labels() {
        let tag = SourceTag::new("Same").unwrap();
        let result = Consolidator::new(
            tag.clone(),
            tag.clone(),
            keys(&["name"]),
            tag,
            ColumnMapping::identity(),
        );
        assert!(matches!(result, Err(DomainError::DuplicateSourceLabel(_))));
    }

    #[test]
    fn consolidator_reports_duplicates_removed() {
        let (tag_a, tag_b) = tags();
        let consolidator = Consolidator::new(
            tag_a,
            tag_b.clone(),
            keys(&["name"]),
            tag_b,
            ColumnMapping::identity(),
        )
        .unwrap();

        let a = vec![
            record_from_pairs([("name", "Acme")]),
            record_from_pairs([("name", "Beta")]),
        ];
        let b = vec![
            record_from_pairs([("name", "Acme")]),
            record_from_pairs([("name", "Delta")]),
        ];

        let consolidation = consolidator.run(&a, &b);

        assert_eq!(consolidation.records.len(), 3);
        assert_eq!(
            consolidation.report,
            ConsolidationReport {
                source_a_rows: 2,
                source_b_rows: 2,
                consolidated: 3,
            }
        );
        assert_eq!(consolidation.report.duplicates_removed(), 1);
    }
}
