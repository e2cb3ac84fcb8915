//! Denormalized views produced by the lookup layer.
//!
//! Each view flattens its primary record and adds the related records next
//! to it, so the JSON shape is the record's own fields plus the joined ones.

use models::{
    classroom::{Building, Classroom},
    conflict::Conflict,
    course::Course,
    request::ShiftRequest,
    shift::Shift,
    student::{StudentSummary, Teacher},
};
use serde::Serialize;

/// How a shift is highlighted in a student's calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventClass {
    /// Clashes with another shift the student attends
    Conflict,
    /// The student attends it
    Subscribed,
    Available,
}

impl EventClass {
    /// A clash outranks attendance
    pub fn choose(subscribed: bool, conflict: bool) -> Self {
        if conflict {
            Self::Conflict
        } else if subscribed {
            Self::Subscribed
        } else {
            Self::Available
        }
    }
}

/// A shift ready to be placed on a weekly calendar
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    #[serde(flatten)]
    pub shift: Shift,
    /// `ABBR-name`, e.g. `IPM-TP1`
    pub title: String,
    pub days_of_week: Vec<u8>,
    pub start_time: String,
    pub end_time: String,
    pub course: Option<Course>,
    pub classroom: Option<Classroom>,
    pub building: Option<Building>,
    pub teacher: Option<Teacher>,
    pub class_names: Vec<EventClass>,
    /// Students currently allocated to the shift
    pub enrolled_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrolledStudent {
    #[serde(flatten)]
    pub student: StudentSummary,
    /// The student's shifts in the course being viewed
    pub shifts: Vec<Shift>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseOverview {
    #[serde(flatten)]
    pub course: Course,
    pub enrolled: Vec<EnrolledStudent>,
    pub conflicts_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetails {
    #[serde(flatten)]
    pub course: Course,
    pub enrolled: Vec<EnrolledStudent>,
    pub shifts: Vec<Shift>,
    /// Share of enrolled students allocated to at least one shift
    pub percentage_enrolled: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseWithShifts {
    #[serde(flatten)]
    pub course: Course,
    pub shifts: Vec<Shift>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassroomWithBuilding {
    #[serde(flatten)]
    pub classroom: Classroom,
    pub building: Option<Building>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictDetails {
    #[serde(flatten)]
    pub conflict: Conflict,
    pub student: Option<StudentSummary>,
    pub courses: Vec<Course>,
    pub shifts: Vec<Shift>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InboxEntry {
    #[serde(flatten)]
    pub request: ShiftRequest,
    /// Name of the student who made the request
    pub author: Option<String>,
    pub course_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Inbox {
    pub open: Vec<InboxEntry>,
    pub closed: Vec<InboxEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDetails {
    #[serde(flatten)]
    pub request: ShiftRequest,
    pub author: Option<StudentSummary>,
    pub course_name: Option<String>,
    pub course: Option<Course>,
    pub new_shift: Option<CalendarEvent>,
    pub old_shift: Option<CalendarEvent>,
}

/// A student's timetable page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    #[serde(flatten)]
    pub student: StudentSummary,
    /// Every allocated shift, as calendar events
    pub shifts: Vec<CalendarEvent>,
    pub courses: Vec<CourseWithShifts>,
}

/// Sizing figures used when allocating a course's students automatically
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationPlan {
    #[serde(flatten)]
    pub course: Course,
    pub enrolled_count: usize,
    pub practical_shifts: usize,
    /// Seats in the smallest classroom used by a TP/PL shift
    pub smallest_practical_capacity: u32,
    pub percentage_enrolled: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_class_priority() {
        assert_eq!(EventClass::choose(true, true), EventClass::Conflict);
        assert_eq!(EventClass::choose(true, false), EventClass::Subscribed);
        assert_eq!(EventClass::choose(false, false), EventClass::Available);
        assert_eq!(
            serde_json::to_value(EventClass::Subscribed).unwrap(),
            serde_json::json!("subscribed")
        );
    }
}
