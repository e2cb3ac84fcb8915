use crate::Id;
use serde::{Deserialize, Serialize};

/// A course (unidade curricular) of a degree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: Id,
    pub name: String,
    /// Short code used in shift titles, e.g. `IPM`
    pub abbreviation: String,
    /// Curricular year the course belongs to
    pub year: u8,
    pub semester: u8,
    pub degree_id: Id,
}
