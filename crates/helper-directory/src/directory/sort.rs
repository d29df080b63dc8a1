use super::derive::parse_leading_int;
use super::record::HelperRecord;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Name,
    Height,
    Weight,
    Age,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// A sort selection such as `name-asc` or `age-desc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct SortOrder {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortOrder {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SortError {
    #[error("unknown sort order '{0}', expected <name|height|weight|age>-<asc|desc>")]
    Unknown(String),
}

impl FromStr for SortOrder {
    type Err = SortError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let unknown = || SortError::Unknown(value.to_string());
        let (key, direction) = value.trim().split_once('-').ok_or_else(unknown)?;

        let key = match key.to_ascii_lowercase().as_str() {
            "name" => SortKey::Name,
            "height" => SortKey::Height,
            "weight" => SortKey::Weight,
            "age" => SortKey::Age,
            _ => return Err(unknown()),
        };
        let direction = match direction.to_ascii_lowercase().as_str() {
            "asc" => SortDirection::Ascending,
            "desc" => SortDirection::Descending,
            _ => return Err(unknown()),
        };

        Ok(Self { key, direction })
    }
}

impl TryFrom<String> for SortOrder {
    type Error = SortError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SortOrder> for String {
    fn from(order: SortOrder) -> Self {
        order.to_string()
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self.key {
            SortKey::Name => "name",
            SortKey::Height => "height",
            SortKey::Weight => "weight",
            SortKey::Age => "age",
        };
        let direction = match self.direction {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        };
        write!(f, "{key}-{direction}")
    }
}

/// Reads an optional sort order where an empty string means "no sorting".
pub(crate) fn deserialize_optional_sort<'de, D>(
    deserializer: D,
) -> Result<Option<SortOrder>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    raw.filter(|value| !value.trim().is_empty())
        .map(|value| value.parse().map_err(serde::de::Error::custom))
        .transpose()
}

/// Stable in-place sort; records with equal keys keep their relative order in
/// both directions.
pub fn sort_records(records: &mut [HelperRecord], order: SortOrder) {
    match order.key {
        SortKey::Name => sort_by_key(records, order.direction, |record| {
            collation_key(&record.name)
        }),
        SortKey::Height => sort_by_key(records, order.direction, |record| {
            parse_leading_int(&record.height).unwrap_or(0)
        }),
        SortKey::Weight => sort_by_key(records, order.direction, |record| {
            parse_leading_int(&record.weight).unwrap_or(0)
        }),
        SortKey::Age => sort_by_key(records, order.direction, |record| {
            record.age.unwrap_or(0)
        }),
    }
}

fn sort_by_key<K, F>(records: &mut [HelperRecord], direction: SortDirection, key: F)
where
    K: Ord,
    F: Fn(&HelperRecord) -> K,
{
    match direction {
        SortDirection::Ascending => records.sort_by_cached_key(|record| key(record)),
        SortDirection::Descending => records.sort_by_cached_key(|record| Reverse(key(record))),
    }
}

/// Case-insensitive key that orders accented letters next to their base
/// letter, falling back to the lower-cased text to separate them.
fn collation_key(name: &str) -> (String, String) {
    let lowered = name.to_lowercase();
    let folded = lowered.nfd().filter(|c| !is_combining_mark(*c)).collect();
    (folded, lowered)
}
