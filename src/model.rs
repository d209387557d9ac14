//! Domain vocabulary shared by the loader, filters, metrics and charts
//!
//! Labels are the Korean strings used in the survey CSV files and shown in
//! the dashboard, so they double as column names and category values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Input column: school name (free text, e.g. "서울중학교")
pub const SCHOOL_COL: &str = "학교";

/// Input column: grade (free text, e.g. "3학년", "3", "3.0")
pub const GRADE_COL: &str = "학년";

/// Input column: posture detail type (categorical)
pub const POSTURE_TYPE_COL: &str = "자세 세부 유형";

/// Derived column: semester tag
pub const SEMESTER_COL: &str = "학기";

/// Derived column: standardized grade label (e.g. "중등 2학년")
pub const STANDARD_GRADE_COL: &str = "표준학년";

/// Derived column: school level bucket (초등 / 중등 / 고등)
pub const SCHOOL_LEVEL_COL: &str = "학교급";

/// Reporting period
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Semester {
    First,
    Second,
}

impl Semester {
    pub const ALL: [Semester; 2] = [Semester::First, Semester::Second];

    pub fn label(self) -> &'static str {
        match self {
            Semester::First => "1학기",
            Semester::Second => "2학기",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Tracked body region; each has one score column in the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyPart {
    Neck,
    Shoulder,
    Waist,
    Hip,
    Knee,
    Ankle,
}

impl BodyPart {
    /// Display order for every chart
    pub const ALL: [BodyPart; 6] = [
        BodyPart::Neck,
        BodyPart::Shoulder,
        BodyPart::Waist,
        BodyPart::Hip,
        BodyPart::Knee,
        BodyPart::Ankle,
    ];

    /// Column name in the survey files
    pub fn label(self) -> &'static str {
        match self {
            BodyPart::Neck => "목",
            BodyPart::Shoulder => "어깨",
            BodyPart::Waist => "허리",
            BodyPart::Hip => "엉덩",
            BodyPart::Knee => "무릎",
            BodyPart::Ankle => "발목",
        }
    }

    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|p| p.label()).collect()
    }
}

impl fmt::Display for BodyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// School level bucket derived from the school name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchoolLevel {
    Elementary,
    Middle,
    High,
}

impl SchoolLevel {
    pub const ALL: [SchoolLevel; 3] = [SchoolLevel::Elementary, SchoolLevel::Middle, SchoolLevel::High];

    pub fn label(self) -> &'static str {
        match self {
            SchoolLevel::Elementary => "초등",
            SchoolLevel::Middle => "중등",
            SchoolLevel::High => "고등",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.label() == label)
    }
}

impl fmt::Display for SchoolLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_lookup() {
        assert_eq!(Semester::from_label("2학기"), Some(Semester::Second));
        assert_eq!(Semester::from_label("3학기"), None);
        assert_eq!(SchoolLevel::from_label("고등"), Some(SchoolLevel::High));
        assert_eq!(SchoolLevel::from_label("전체"), None);
    }

    #[test]
    fn test_body_part_order() {
        assert_eq!(BodyPart::labels(), vec!["목", "어깨", "허리", "엉덩", "무릎", "발목"]);
    }
}
