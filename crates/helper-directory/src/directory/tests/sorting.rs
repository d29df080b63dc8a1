use super::common::*;
use crate::directory::filter::browsable;
use crate::directory::record::HelperRecord;
use crate::directory::sort::{sort_records, SortDirection, SortKey, SortOrder};

fn sorted(key: SortKey, direction: SortDirection) -> Vec<String> {
    let mut records: Vec<HelperRecord> = browsable(&sample_records());
    sort_records(&mut records, SortOrder::new(key, direction));
    names(&records).into_iter().map(str::to_string).collect()
}

#[test]
fn name_sort_ignores_case() {
    assert_eq!(
        sorted(SortKey::Name, SortDirection::Ascending),
        vec![
            "ana cruz",
            "Aye Aye",
            "Bella Tan",
            "Maria Santos",
            "Siti Rahma",
            "Unknown"
        ]
    );
}

#[test]
fn name_desc_reverses_name_asc_for_distinct_names() {
    let ascending = sorted(SortKey::Name, SortDirection::Ascending);
    let mut descending = sorted(SortKey::Name, SortDirection::Descending);
    descending.reverse();
    assert_eq!(ascending, descending);
}

#[test]
fn height_sort_treats_blank_as_zero() {
    assert_eq!(
        sorted(SortKey::Height, SortDirection::Ascending),
        vec![
            "Unknown",
            "Aye Aye",
            "Maria Santos",
            "Bella Tan",
            "Siti Rahma",
            "ana cruz"
        ]
    );
}

#[test]
fn descending_sort_keeps_ties_in_filter_order() {
    assert_eq!(
        sorted(SortKey::Weight, SortDirection::Descending),
        vec![
            "ana cruz",
            "Siti Rahma",
            "Maria Santos",
            "Aye Aye",
            "Unknown",
            "Bella Tan"
        ]
    );
}

#[test]
fn age_sort_treats_unknown_age_as_zero() {
    assert_eq!(
        sorted(SortKey::Age, SortDirection::Ascending),
        vec![
            "Unknown",
            "Aye Aye",
            "Maria Santos",
            "Bella Tan",
            "Siti Rahma",
            "ana cruz"
        ]
    );
}

#[test]
fn equal_keys_keep_original_order_ascending() {
    let mut records = vec![
        record(row("Beta")),
        record(row("Alpha")),
        record(row("Gamma")),
    ];
    sort_records(
        &mut records,
        SortOrder::new(SortKey::Height, SortDirection::Ascending),
    );
    assert_eq!(names(&records), vec!["Beta", "Alpha", "Gamma"]);
}
