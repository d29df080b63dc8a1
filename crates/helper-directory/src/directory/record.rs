use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical candidate record produced by the normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelperRecord {
    pub code: String,
    pub status: String,
    pub status_category: StatusCategory,
    pub name: String,
    pub nationality: String,
    pub experience: String,
    pub dob: String,
    pub height: String,
    pub weight: String,
    pub rest_day: String,
    pub skills: SkillSet,
    pub comments: String,
    pub salary: String,
    pub religion: String,
    pub age: Option<i32>,
    pub salary_value: u64,
}

impl HelperRecord {
    /// Only available candidates take part in browsing.
    pub fn is_browsable(&self) -> bool {
        self.status_category == StatusCategory::Available
    }

    pub fn has_skill(&self, skill: Skill) -> bool {
        self.skills.has(skill)
    }
}

/// Terminal status categories derived from the free-text status column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCategory {
    Available,
    Rejected,
    Withdrawn,
    Selected,
}

impl StatusCategory {
    /// Substring match on the lower-cased status. Withdrawn rows are marked
    /// "void" in the spreadsheet.
    pub fn classify(status: &str) -> Self {
        let lowered = status.to_lowercase();
        if lowered.contains("rejected") {
            Self::Rejected
        } else if lowered.contains("void") {
            Self::Withdrawn
        } else if lowered.contains("selected") {
            Self::Selected
        } else {
            Self::Available
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    Housekeeping,
    Cooking,
    #[serde(alias = "childCare")]
    ChildCare,
    #[serde(alias = "infantCare")]
    InfantCare,
    #[serde(alias = "elderCare")]
    ElderCare,
    #[serde(alias = "petCare")]
    PetCare,
}

impl Skill {
    pub const ALL: [Skill; 6] = [
        Skill::Housekeeping,
        Skill::Cooking,
        Skill::ChildCare,
        Skill::InfantCare,
        Skill::ElderCare,
        Skill::PetCare,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Skill::Housekeeping => "Housekeeping",
            Skill::Cooking => "Cooking",
            Skill::ChildCare => "Child Care",
            Skill::InfantCare => "Infant Care",
            Skill::ElderCare => "Elder Care",
            Skill::PetCare => "Pet Care",
        }
    }

    fn slug(self) -> &'static str {
        match self {
            Skill::Housekeeping => "housekeeping",
            Skill::Cooking => "cooking",
            Skill::ChildCare => "child_care",
            Skill::InfantCare => "infant_care",
            Skill::ElderCare => "elder_care",
            Skill::PetCare => "pet_care",
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown skill '{0}'")]
pub struct UnknownSkill(pub String);

impl FromStr for Skill {
    type Err = UnknownSkill;

    /// Accepts the snake_case slug, the camelCase checkbox value, or the label.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let folded: String = value
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        Skill::ALL
            .into_iter()
            .find(|skill| skill.slug().replace('_', "") == folded)
            .ok_or_else(|| UnknownSkill(value.to_string()))
    }
}

/// The six skill flags carried by every record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillSet {
    pub housekeeping: bool,
    pub cooking: bool,
    pub child_care: bool,
    pub infant_care: bool,
    pub elder_care: bool,
    pub pet_care: bool,
}

impl SkillSet {
    pub fn has(&self, skill: Skill) -> bool {
        match skill {
            Skill::Housekeeping => self.housekeeping,
            Skill::Cooking => self.cooking,
            Skill::ChildCare => self.child_care,
            Skill::InfantCare => self.infant_care,
            Skill::ElderCare => self.elder_care,
            Skill::PetCare => self.pet_care,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Skill, bool)> + '_ {
        Skill::ALL.into_iter().map(move |skill| (skill, self.has(skill)))
    }
}
