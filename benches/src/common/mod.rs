use lead_refinery::prelude::*;

/// Generate source A rows named `Company <n>`
pub fn generate_source_a(count: usize) -> Vec<Record> {
    (0..count)
        .map(|i| {
            record_from_pairs([
                ("id", i.to_string()),
                ("name", format!("Company {i}")),
                ("url", format!("company{i}.com")),
                ("phone", format!("555-{:04}", i % 10_000)),
            ])
        })
        .collect()
}

/// Generate source B rows; every `overlap_every`-th row reuses a source A name
pub fn generate_source_b(count: usize, overlap_every: usize) -> Vec<Record> {
    (0..count)
        .map(|i| {
            let name = if overlap_every > 0 && i % overlap_every == 0 {
                format!("Company {i}")
            } else {
                format!("Business {i}")
            };
            record_from_pairs([
                ("guid", format!("g-{i}")),
                ("title", name),
                ("website", format!("business{i}.io")),
                ("phone_number", format!("555-{:04}", i % 10_000)),
                ("rating", format!("{}.{}", i % 5, i % 10)),
            ])
        })
        .collect()
}

/// Mapping that renames source B columns onto source A's
pub fn gosom_mapping() -> ColumnMapping {
    ColumnMapping::identity()
        .with_rename(SourceSide::B, "title", "name")
        .with_rename(SourceSide::B, "phone_number", "phone")
}

pub fn source_tags() -> (SourceTag, SourceTag) {
    (
        SourceTag::new("Spider").expect("valid label"),
        SourceTag::new("Gosom").expect("valid label"),
    )
}
