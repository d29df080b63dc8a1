use super::derive::parse_leading_int;
use super::record::{HelperRecord, Skill};
use super::sort::{deserialize_optional_sort, SortOrder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("invalid range '{0}', expected <min>-<max> with either side optional")]
    InvalidRange(String),
}

/// Inclusive numeric bounds; a missing side is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RangeSpec")]
pub struct RangeFilter {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl RangeFilter {
    pub fn between(min: i64, max: i64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn contains(&self, value: i64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

impl FromStr for RangeFilter {
    type Err = FilterError;

    /// Parses the select-box form `"150-160"`; `"150-"` and `"-160"` leave one
    /// side open and an empty string is fully unbounded.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        let invalid = || FilterError::InvalidRange(value.to_string());
        let (min, max) = trimmed.split_once('-').ok_or_else(invalid)?;
        let bound = |side: &str| -> Result<Option<i64>, FilterError> {
            let side = side.trim();
            if side.is_empty() {
                Ok(None)
            } else {
                side.parse::<i64>().map(Some).map_err(|_| invalid())
            }
        };

        Ok(Self {
            min: bound(min)?,
            max: bound(max)?,
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RangeSpec {
    Text(String),
    Bounds {
        #[serde(default)]
        min: Option<i64>,
        #[serde(default)]
        max: Option<i64>,
    },
}

impl TryFrom<RangeSpec> for RangeFilter {
    type Error = FilterError;

    fn try_from(spec: RangeSpec) -> Result<Self, Self::Error> {
        match spec {
            RangeSpec::Text(text) => text.parse(),
            RangeSpec::Bounds { min, max } => Ok(Self { min, max }),
        }
    }
}

/// Everything a user can narrow or order the directory by.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchCriteria {
    /// Free text; split on commas and whitespace, every term must match.
    pub query: String,
    pub nationality: Option<String>,
    pub experience: Option<String>,
    pub religion: Option<String>,
    pub height: Option<RangeFilter>,
    pub weight: Option<RangeFilter>,
    pub salary: Option<RangeFilter>,
    pub skills: BTreeSet<Skill>,
    #[serde(deserialize_with = "deserialize_optional_sort")]
    pub sort: Option<SortOrder>,
}

impl SearchCriteria {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Lower-cased search terms, split on commas and whitespace.
pub fn search_terms(query: &str) -> Vec<String> {
    query
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|term| !term.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Records still open for selection, in source order.
pub fn browsable(records: &[HelperRecord]) -> Vec<HelperRecord> {
    records
        .iter()
        .filter(|record| record.is_browsable())
        .cloned()
        .collect()
}

/// Browsable records satisfying every active predicate, in source order.
pub fn filter_records(records: &[HelperRecord], criteria: &SearchCriteria) -> Vec<HelperRecord> {
    let matcher = Matcher::new(criteria);
    records
        .iter()
        .filter(|record| record.is_browsable() && matcher.matches(record))
        .cloned()
        .collect()
}

struct Matcher<'a> {
    terms: Vec<String>,
    nationality: Option<String>,
    experience: Option<String>,
    religion: Option<String>,
    height: RangeFilter,
    weight: RangeFilter,
    salary: RangeFilter,
    skills: &'a BTreeSet<Skill>,
}

impl<'a> Matcher<'a> {
    fn new(criteria: &'a SearchCriteria) -> Self {
        Self {
            terms: search_terms(&criteria.query),
            nationality: selection(&criteria.nationality),
            experience: selection(&criteria.experience),
            religion: selection(&criteria.religion),
            height: criteria.height.unwrap_or_default(),
            weight: criteria.weight.unwrap_or_default(),
            salary: criteria.salary.unwrap_or_default(),
            skills: &criteria.skills,
        }
    }

    fn matches(&self, record: &HelperRecord) -> bool {
        self.matches_terms(record)
            && self.skills.iter().all(|skill| record.has_skill(*skill))
            && equals(&self.nationality, &record.nationality)
            && equals(&self.experience, &record.experience)
            && equals(&self.religion, &record.religion)
            && self
                .height
                .contains(parse_leading_int(&record.height).unwrap_or(0))
            && self
                .weight
                .contains(parse_leading_int(&record.weight).unwrap_or(0))
            && self
                .salary
                .contains(i64::try_from(record.salary_value).unwrap_or(i64::MAX))
    }

    fn matches_terms(&self, record: &HelperRecord) -> bool {
        if self.terms.is_empty() {
            return true;
        }

        let haystacks = [
            record.name.to_lowercase(),
            record.comments.to_lowercase(),
            record.experience.to_lowercase(),
            record.rest_day.to_lowercase(),
            record.salary.to_lowercase(),
        ];
        self.terms
            .iter()
            .all(|term| haystacks.iter().any(|field| field.contains(term.as_str())))
    }
}

/// An empty selection places no constraint.
fn selection(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_lowercase)
}

fn equals(expected: &Option<String>, actual: &str) -> bool {
    match expected {
        Some(expected) => actual.to_lowercase() == *expected,
        None => true,
    }
}
