use crate::{Id, days::Weekday};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Represents the kind of class a shift holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShiftKind {
    /// Lecture
    #[serde(rename = "T")]
    Theoretical,
    /// Mixed lecture and exercises
    #[serde(rename = "TP")]
    TheoreticalPractical,
    /// Lab
    #[serde(rename = "PL")]
    PracticalLab,
}

impl ShiftKind {
    pub fn code(self) -> &'static str {
        match self {
            Self::Theoretical => "T",
            Self::TheoreticalPractical => "TP",
            Self::PracticalLab => "PL",
        }
    }

    /// Portuguese label shown next to the shift
    pub fn label(self) -> &'static str {
        match self {
            Self::Theoretical => "Teórico",
            Self::TheoreticalPractical => "Teórico-Prático",
            Self::PracticalLab => "Prático-Laboral",
        }
    }

    /// TP and PL shifts are the small-group ones students get allocated to
    pub fn is_practical(self) -> bool {
        matches!(self, Self::TheoreticalPractical | Self::PracticalLab)
    }
}

impl Display for ShiftKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.code())
    }
}

/// A weekly class slot of a course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub id: Id,
    pub course_id: Id,
    pub classroom_id: Id,
    pub day: Weekday,
    /// Starting hour (inclusive)
    pub from: u8,
    /// Ending hour (exclusive)
    pub to: u8,
    #[serde(rename = "type")]
    pub kind: ShiftKind,
    /// Short name within the course, e.g. `TP1`
    pub name: String,
    pub teacher_id: Id,
    #[serde(default)]
    pub total_students_registered: u32,
}

impl Shift {
    /// Two shifts overlap when they share a day and their hour ranges intersect
    pub fn overlaps(&self, other: &Shift) -> bool {
        self.day == other.day && self.from < other.to && other.from < self.to
    }

    pub fn start_time(&self) -> String {
        format!("{}:00:00", self.from)
    }

    pub fn end_time(&self) -> String {
        format!("{}:00:00", self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn shift(day: Weekday, from: u8, to: u8) -> Shift {
        Shift {
            id: Id(1),
            course_id: Id(1),
            classroom_id: Id(1),
            day,
            from,
            to,
            kind: ShiftKind::TheoreticalPractical,
            name: "TP1".to_string(),
            teacher_id: Id(1),
            total_students_registered: 0,
        }
    }

    #[test]
    fn test_overlaps() {
        let a = shift(Weekday::Monday, 9, 11);
        assert!(a.overlaps(&shift(Weekday::Monday, 10, 12)));
        assert!(a.overlaps(&shift(Weekday::Monday, 8, 10)));
        assert!(a.overlaps(&shift(Weekday::Monday, 9, 11)));

        // back-to-back slots don't clash
        assert!(!a.overlaps(&shift(Weekday::Monday, 11, 13)));
        assert!(!a.overlaps(&shift(Weekday::Tuesday, 9, 11)));
    }

    #[test]
    fn test_shift_decodes_dataset_spelling() {
        let shift: Shift = serde_json::from_value(json!({
            "id": "12",
            "courseId": 3,
            "classroomId": 4,
            "day": "Wednesday",
            "from": 14,
            "to": 16,
            "type": "PL",
            "name": "PL2",
            "teacherId": 2,
            "totalStudentsRegistered": 18
        }))
        .unwrap();

        assert_eq!(shift.id, Id(12));
        assert_eq!(shift.kind, ShiftKind::PracticalLab);
        assert_eq!(shift.start_time(), "14:00:00");
        assert_eq!(shift.end_time(), "16:00:00");
    }

    #[test]
    fn test_shift_kind_labels() {
        assert_eq!(ShiftKind::Theoretical.label(), "Teórico");
        assert!(ShiftKind::PracticalLab.is_practical());
        assert!(!ShiftKind::Theoretical.is_practical());
    }
}
