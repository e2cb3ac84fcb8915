use crate::{api::Api, error::ServerError};
use models::student::{Student, StudentSummary};

/// Every student, without their password
pub async fn all_students(api: &Api) -> Result<Vec<StudentSummary>, ServerError> {
    let students: Vec<Student> = api.get("students", &[]).await?;

    Ok(students.iter().map(StudentSummary::from).collect())
}
