use super::derive::{compute_age, extract_salary_ceiling};
use super::record::{HelperRecord, SkillSet, StatusCategory};
use super::source::RawHelperRow;
use chrono::NaiveDate;

/// How a raw skill cell maps to a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SkillToken {
    /// Set unless the cell is exactly the given falsy token; missing cells count as set.
    UnlessExactly(&'static str),
    /// Set only when the cell is exactly `TRUE`.
    OnlyTrue,
}

impl SkillToken {
    fn apply(self, cell: Option<&str>) -> bool {
        match self {
            SkillToken::UnlessExactly(falsy) => cell != Some(falsy),
            SkillToken::OnlyTrue => cell == Some("TRUE"),
        }
    }
}

// The sheet's housekeeping and cooking columns use opt-out tokens while the
// care columns use opt-in ones; see DESIGN.md before changing either.
const HOUSEKEEPING: SkillToken = SkillToken::UnlessExactly("FALSE");
const COOKING: SkillToken = SkillToken::UnlessExactly("False");
const CARE: SkillToken = SkillToken::OnlyTrue;

/// Builds the canonical record, substituting placeholders for missing cells
/// and computing derived fields as of `today`.
pub fn normalize(row: RawHelperRow, today: NaiveDate) -> HelperRecord {
    let skills = SkillSet {
        housekeeping: HOUSEKEEPING.apply(row.housekeeping.as_deref()),
        cooking: COOKING.apply(row.cooking.as_deref()),
        child_care: CARE.apply(row.child_care.as_deref()),
        infant_care: CARE.apply(row.infant_care.as_deref()),
        elder_care: CARE.apply(row.elder_care.as_deref()),
        pet_care: CARE.apply(row.pet_care.as_deref()),
    };

    let salary_value = row.salary.as_deref().map_or(0, extract_salary_ceiling);
    let dob = row.dob.unwrap_or_default();
    let age = compute_age(&dob, today);
    let status = or_placeholder(row.status, "Available");

    HelperRecord {
        code: or_placeholder(row.code, "N/A"),
        status_category: StatusCategory::classify(&status),
        status,
        name: or_placeholder(row.name, "Unknown"),
        nationality: or_placeholder(row.nationality, "Unknown"),
        experience: or_placeholder(row.experience, "Not specified"),
        dob,
        height: strip_unit(row.height.as_deref(), "cm"),
        weight: strip_unit(row.weight.as_deref(), "kg"),
        rest_day: or_placeholder(row.rest_day, "Not specified"),
        skills,
        comments: or_placeholder(row.comments, "No comments available"),
        salary: or_placeholder(row.salary, "Not specified"),
        religion: or_placeholder(row.religion, "Not specified"),
        age,
        salary_value,
    }
}

fn or_placeholder(value: Option<String>, placeholder: &str) -> String {
    value.unwrap_or_else(|| placeholder.to_string())
}

/// Removes the first occurrence of `unit` and trims what is left.
fn strip_unit(value: Option<&str>, unit: &str) -> String {
    value
        .map(|raw| raw.replacen(unit, "", 1).trim().to_string())
        .unwrap_or_default()
}
