use crate::Id;
use serde::{Deserialize, Serialize};

/// Join row placing a student in a shift
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub id: Id,
    pub student_id: Id,
    pub shift_id: Id,
}
