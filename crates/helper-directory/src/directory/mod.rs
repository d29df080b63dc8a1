//! Candidate directory: decoding, normalization, filtering, ordering and
//! pagination of helper records behind a single session controller.

pub mod controller;
pub mod derive;
pub mod filter;
pub mod normalizer;
pub mod notification;
pub mod pagination;
pub mod record;
pub mod sort;
pub mod source;

#[cfg(test)]
mod tests;

pub use controller::{result_summary, DirectoryError, HelperDirectory, LoadFailure, PageResult};
pub use derive::{compute_age, extract_salary_ceiling};
pub use filter::{FilterError, RangeFilter, SearchCriteria};
pub use normalizer::normalize;
pub use notification::{Notification, NotificationLevel};
pub use pagination::{PageButton, Pager, PAGE_SIZE};
pub use record::{HelperRecord, Skill, SkillSet, StatusCategory};
pub use sort::{SortDirection, SortError, SortKey, SortOrder};
pub use source::{
    file_source, load_records, CsvFileSource, HelperSource, HttpHelperSource, JsonFileSource,
    RawHelperRow, SourceError,
};
