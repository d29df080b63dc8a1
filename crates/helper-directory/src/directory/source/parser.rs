use super::SourceError;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::io::Read;
use tracing::{debug, warn};

/// Whether a column must appear somewhere in a payload for it to be usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Presence {
    Required,
    Optional,
}

/// Every spreadsheet column the decoder understands.
pub(crate) const FIELD_TABLE: &[(&str, Presence)] = &[
    ("MDW Code", Presence::Optional),
    ("MDW Status", Presence::Required),
    ("MDW Name", Presence::Required),
    ("Nationality", Presence::Optional),
    ("MDW Experience", Presence::Optional),
    ("MDW DOB", Presence::Optional),
    ("MDW Height", Presence::Optional),
    ("MDW Weight", Presence::Optional),
    ("Rest Day Arrangement", Presence::Optional),
    ("Domestic Houskeeping", Presence::Optional),
    ("Cooking", Presence::Optional),
    ("Child Care", Presence::Optional),
    ("Infant Care", Presence::Optional),
    ("Elder Care", Presence::Optional),
    ("Pet Care", Presence::Optional),
    ("Interviewer Comments", Presence::Optional),
    ("Expected Salary", Presence::Optional),
    ("Religion", Presence::Optional),
];

/// One spreadsheet row with blank cells already mapped to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawHelperRow {
    #[serde(rename = "MDW Code", default, deserialize_with = "empty_cell_as_none")]
    pub code: Option<String>,
    #[serde(rename = "MDW Status", default, deserialize_with = "empty_cell_as_none")]
    pub status: Option<String>,
    #[serde(rename = "MDW Name", default, deserialize_with = "empty_cell_as_none")]
    pub name: Option<String>,
    #[serde(rename = "Nationality", default, deserialize_with = "empty_cell_as_none")]
    pub nationality: Option<String>,
    #[serde(
        rename = "MDW Experience",
        default,
        deserialize_with = "empty_cell_as_none"
    )]
    pub experience: Option<String>,
    #[serde(rename = "MDW DOB", default, deserialize_with = "empty_cell_as_none")]
    pub dob: Option<String>,
    #[serde(rename = "MDW Height", default, deserialize_with = "empty_cell_as_none")]
    pub height: Option<String>,
    #[serde(rename = "MDW Weight", default, deserialize_with = "empty_cell_as_none")]
    pub weight: Option<String>,
    #[serde(
        rename = "Rest Day Arrangement",
        default,
        deserialize_with = "empty_cell_as_none"
    )]
    pub rest_day: Option<String>,
    #[serde(
        rename = "Domestic Houskeeping",
        default,
        deserialize_with = "empty_cell_as_none"
    )]
    pub housekeeping: Option<String>,
    #[serde(rename = "Cooking", default, deserialize_with = "empty_cell_as_none")]
    pub cooking: Option<String>,
    #[serde(rename = "Child Care", default, deserialize_with = "empty_cell_as_none")]
    pub child_care: Option<String>,
    #[serde(rename = "Infant Care", default, deserialize_with = "empty_cell_as_none")]
    pub infant_care: Option<String>,
    #[serde(rename = "Elder Care", default, deserialize_with = "empty_cell_as_none")]
    pub elder_care: Option<String>,
    #[serde(rename = "Pet Care", default, deserialize_with = "empty_cell_as_none")]
    pub pet_care: Option<String>,
    #[serde(
        rename = "Interviewer Comments",
        default,
        deserialize_with = "empty_cell_as_none"
    )]
    pub comments: Option<String>,
    #[serde(
        rename = "Expected Salary",
        default,
        deserialize_with = "empty_cell_as_none"
    )]
    pub salary: Option<String>,
    #[serde(rename = "Religion", default, deserialize_with = "empty_cell_as_none")]
    pub religion: Option<String>,
}

/// Decodes a SheetBest response body: a JSON array of column-keyed objects.
pub(crate) fn parse_json_rows(body: &[u8]) -> Result<Vec<RawHelperRow>, SourceError> {
    let payload: Value = serde_json::from_slice(body)?;
    let Value::Array(items) = payload else {
        return Err(SourceError::UnexpectedShape("expected a JSON array of rows"));
    };

    let mut rows = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::Object(map) => rows.push(map),
            _ => return Err(SourceError::UnexpectedShape("expected every row to be an object")),
        }
    }

    decode_rows(rows)
}

/// Decodes a CSV export of the same sheet. Cells are kept as text.
pub(crate) fn parse_csv_rows<R: Read>(reader: R) -> Result<Vec<RawHelperRow>, SourceError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let map: Map<String, Value> = headers
            .iter()
            .zip(record.iter())
            .map(|(header, cell)| (header.to_string(), Value::String(cell.to_string())))
            .collect();
        rows.push(map);
    }

    decode_rows(rows)
}

fn decode_rows(rows: Vec<Map<String, Value>>) -> Result<Vec<RawHelperRow>, SourceError> {
    if rows.is_empty() {
        return Err(SourceError::Empty);
    }

    {
        let columns: BTreeSet<&str> = rows
            .iter()
            .flat_map(|row| row.keys().map(String::as_str))
            .collect();
        check_columns(&columns)?;
    }

    rows.into_iter()
        .map(|row| serde_json::from_value(Value::Object(row)).map_err(SourceError::from))
        .collect()
}

fn check_columns(columns: &BTreeSet<&str>) -> Result<(), SourceError> {
    let mut missing_required = Vec::new();
    for (column, presence) in FIELD_TABLE {
        if columns.contains(column) {
            continue;
        }
        match presence {
            Presence::Required => missing_required.push((*column).to_string()),
            Presence::Optional => warn!(column, "column absent from payload, using defaults"),
        }
    }

    for column in columns {
        if !FIELD_TABLE.iter().any(|(known, _)| known == column) {
            debug!(column, "ignoring unknown column");
        }
    }

    if missing_required.is_empty() {
        Ok(())
    } else {
        Err(SourceError::MissingColumns(missing_required))
    }
}

/// Spreadsheet cells arrive as strings, but booleans and numbers are rendered
/// the way the sheet displays them (`TRUE`, `FALSE`, `155`).
fn empty_cell_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let text = value.and_then(|value| match value {
        Value::String(text) => Some(text),
        Value::Bool(true) => Some("TRUE".to_string()),
        Value::Bool(false) => Some("FALSE".to_string()),
        Value::Number(number) => Some(number.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    });
    // Whitespace-only cells are treated as blank so they take the placeholder.
    Ok(text.filter(|text| !text.trim().is_empty()))
}
