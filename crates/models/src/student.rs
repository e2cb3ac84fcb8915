use crate::Id;
use serde::{Deserialize, Serialize};

/// A student and the courses they are enrolled in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: Id,
    pub name: String,
    pub email: String,
    pub password: String,
    /// Working students and similar statutes get priority on shift requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_status: Option<bool>,
    /// Ids of the courses the student is enrolled in
    #[serde(default)]
    pub enrolled: Vec<Id>,
}

impl Student {
    pub fn is_enrolled_in(&self, course_id: Id) -> bool {
        self.enrolled.contains(&course_id)
    }
}

/// A student as shown to other users, without credentials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSummary {
    pub id: Id,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_status: Option<bool>,
    pub enrolled: Vec<Id>,
}

impl From<&Student> for StudentSummary {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id,
            name: student.name.clone(),
            email: student.email.clone(),
            special_status: student.special_status,
            enrolled: student.enrolled.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Director {
    pub id: Id,
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: Id,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
