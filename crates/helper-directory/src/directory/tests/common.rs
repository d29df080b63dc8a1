use crate::directory::normalizer::normalize;
use crate::directory::record::HelperRecord;
use crate::directory::source::RawHelperRow;
use chrono::NaiveDate;

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 2).expect("valid reference date")
}

pub(super) fn row(name: &str) -> RawHelperRow {
    RawHelperRow {
        code: Some(format!("MDW-{}", name.to_uppercase().replace(' ', "-"))),
        status: Some("Available".to_string()),
        name: Some(name.to_string()),
        nationality: Some("Filipino".to_string()),
        experience: Some("Experienced".to_string()),
        dob: Some("1 Jan 1990".to_string()),
        height: Some("155 cm".to_string()),
        weight: Some("50 kg".to_string()),
        rest_day: Some("4 rest days".to_string()),
        comments: Some("Cheerful and hardworking".to_string()),
        salary: Some("$700-$800".to_string()),
        religion: Some("Christian".to_string()),
        ..RawHelperRow::default()
    }
}

pub(super) fn record(row: RawHelperRow) -> HelperRecord {
    normalize(row, today())
}

/// Nine rows: six browsable, one of each excluded status, one with every
/// field missing.
pub(super) fn sample_records() -> Vec<HelperRecord> {
    vec![
        record(RawHelperRow {
            nationality: Some("Indonesian".to_string()),
            religion: Some("Muslim".to_string()),
            dob: Some("15 Jun 1985".to_string()),
            height: Some("160cm".to_string()),
            weight: Some("58kg".to_string()),
            salary: Some("$750".to_string()),
            comments: Some("Good at cooking Chinese food".to_string()),
            child_care: Some("TRUE".to_string()),
            elder_care: Some("TRUE".to_string()),
            ..row("Siti Rahma")
        }),
        record(RawHelperRow {
            dob: Some("3 Mar 1995".to_string()),
            height: Some("150 cm".to_string()),
            salary: Some("$800-$1000".to_string()),
            infant_care: Some("TRUE".to_string()),
            child_care: Some("TRUE".to_string()),
            ..row("Maria Santos")
        }),
        record(RawHelperRow {
            status: Some("Rejected".to_string()),
            ..row("Rosa Reyes")
        }),
        record(RawHelperRow {
            experience: Some("Transfer".to_string()),
            dob: Some("20 Dec 1980".to_string()),
            height: Some("165 cm".to_string()),
            weight: Some("62 kg".to_string()),
            rest_day: Some("Sundays off".to_string()),
            salary: Some("Negotiable".to_string()),
            pet_care: Some("TRUE".to_string()),
            cooking: Some("False".to_string()),
            ..row("ana cruz")
        }),
        record(RawHelperRow {
            status: Some("VOID".to_string()),
            ..row("Lina Void")
        }),
        record(RawHelperRow {
            nationality: Some("Myanmar".to_string()),
            religion: Some("Buddhist".to_string()),
            dob: Some("9 Sep 2000".to_string()),
            height: Some("148 cm".to_string()),
            weight: Some("45 kg".to_string()),
            comments: Some("Loves children, elderly care experience".to_string()),
            elder_care: Some("TRUE".to_string()),
            child_care: Some("TRUE".to_string()),
            ..row("Aye Aye")
        }),
        record(RawHelperRow {
            status: Some("Selected by employer".to_string()),
            ..row("Grace Lim")
        }),
        record(RawHelperRow::default()),
        record(RawHelperRow {
            dob: Some("1 Jan 1990".to_string()),
            height: Some("155 cm".to_string()),
            weight: Some("n/a".to_string()),
            salary: Some("$600-$650".to_string()),
            housekeeping: Some("FALSE".to_string()),
            ..row("Bella Tan")
        }),
    ]
}

pub(super) fn names(records: &[HelperRecord]) -> Vec<&str> {
    records.iter().map(|record| record.name.as_str()).collect()
}
