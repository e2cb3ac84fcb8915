use crate::error::DbError;
use models::{
    allocation::Allocation,
    classroom::{Building, Classroom},
    conflict::Conflict,
    course::Course,
    request::{ClassroomRequest, ShiftRequest},
    shift::Shift,
    student::{Director, Student, Teacher},
};
use serde::{Deserialize, Serialize};

/// The whole mock database: one flat list per collection.
///
/// Relationships between collections are plain ids, resolved by the lookup
/// helpers in [`crate::services::lookup`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Dataset {
    pub students: Vec<Student>,
    pub directors: Vec<Director>,
    pub teachers: Vec<Teacher>,
    pub courses: Vec<Course>,
    pub shifts: Vec<Shift>,
    pub classrooms: Vec<Classroom>,
    pub buildings: Vec<Building>,
    pub allocations: Vec<Allocation>,
    pub conflicts: Vec<Conflict>,
    pub shift_requests: Vec<ShiftRequest>,
    pub classroom_requests: Vec<ClassroomRequest>,
}

impl Dataset {
    pub fn from_json_str(json: &str) -> Result<Self, DbError> {
        serde_json::from_str(json).map_err(DbError::Malformed)
    }

    pub fn from_json_value(value: serde_json::Value) -> Result<Self, DbError> {
        serde_json::from_value(value).map_err(DbError::Malformed)
    }

    pub fn to_json_string(&self) -> Result<String, DbError> {
        serde_json::to_string_pretty(self).map_err(DbError::Malformed)
    }

    /// Number of records across every collection
    pub fn record_count(&self) -> usize {
        self.students.len()
            + self.directors.len()
            + self.teachers.len()
            + self.courses.len()
            + self.shifts.len()
            + self.classrooms.len()
            + self.buildings.len()
            + self.allocations.len()
            + self.conflicts.len()
            + self.shift_requests.len()
            + self.classroom_requests.len()
    }
}
