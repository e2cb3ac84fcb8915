use crate::Id;
use serde::{Deserialize, Serialize};

/// A student whose allocated shifts clash
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    pub id: Id,
    pub student_id: Id,
    /// Courses whose shifts clash
    #[serde(rename = "courseIDs")]
    pub course_ids: Vec<Id>,
    /// The clashing shifts themselves
    #[serde(rename = "shiftIDs")]
    pub shift_ids: Vec<Id>,
}

impl Conflict {
    pub fn involves_course(&self, course_id: Id) -> bool {
        self.course_ids.contains(&course_id)
    }
}
