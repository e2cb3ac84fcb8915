use crate::{api::Api, error::ServerError};
use database::views::StudentProfile;
use futures::try_join;
use log::info;
use models::{
    Id,
    role::{Role, UserInfo},
    student::{Director, Student},
};
use serde::Serialize;

/// A director as shown on their profile page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectorProfile {
    pub id: Id,
    pub name: String,
    pub email: String,
}

impl From<Director> for DirectorProfile {
    fn from(director: Director) -> Self {
        Self {
            id: director.id,
            name: director.name,
            email: director.email,
        }
    }
}

/// Checks the credentials against directors first, then students.
///
/// An email found in either collection with the wrong password fails right
/// away; it is not looked up in the other one.
pub async fn login(api: &Api, email: &str, password: &str) -> Result<UserInfo, ServerError> {
    let directors: Vec<Director> = api.get("directors", &[("email", email)]).await?;
    if let Some(director) = directors.into_iter().next() {
        if director.password != password {
            return Err(ServerError::InvalidCredentials);
        }

        info!("Director {} signed in", director.email);
        return Ok(UserInfo {
            id: director.id,
            email: director.email,
            role: Role::Director,
        });
    }

    let students: Vec<Student> = api.get("students", &[("email", email)]).await?;
    match students.into_iter().next() {
        Some(student) if student.password == password => {
            info!("Student {} signed in", student.email);
            Ok(UserInfo {
                id: student.id,
                email: student.email,
                role: Role::Student,
            })
        }
        _ => Err(ServerError::InvalidCredentials),
    }
}

/// The student with their timetable and enrolled courses
pub async fn student_profile(api: &Api, student_id: Id) -> Result<StudentProfile, ServerError> {
    let id = student_id.to_string();
    let (student, data) = try_join!(
        api.find_one::<Student>("students", "id", &id),
        api.snapshot()
    )?;

    Ok(data.student_profile(&student))
}

pub async fn director_profile(api: &Api, director_id: Id) -> Result<DirectorProfile, ServerError> {
    let director: Director = api
        .find_one("directors", "id", &director_id.to_string())
        .await?;

    Ok(director.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::spawn_backend;

    #[tokio::test]
    async fn test_login_roles() {
        let (api, _db) = spawn_backend().await;

        let director = login(&api, "diana@uni.pt", "admin").await.unwrap();
        assert_eq!(director.role, Role::Director);

        let student = login(&api, "ana@uni.pt", "ana123").await.unwrap();
        assert_eq!(student.role, Role::Student);
        assert_eq!(student.id, Id(1));
    }

    #[tokio::test]
    async fn test_login_rejects_bad_credentials() {
        let (api, _db) = spawn_backend().await;

        let wrong_password = login(&api, "ana@uni.pt", "nope").await.unwrap_err();
        assert!(matches!(wrong_password, ServerError::InvalidCredentials));

        let unknown = login(&api, "ghost@uni.pt", "ana123").await.unwrap_err();
        assert!(matches!(unknown, ServerError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_profiles() {
        let (api, _db) = spawn_backend().await;

        let profile = student_profile(&api, Id(1)).await.unwrap();
        assert_eq!(profile.student.name, "Ana");
        assert_eq!(profile.shifts.len(), 3);
        assert_eq!(profile.courses.len(), 2);

        let director = director_profile(&api, Id(1)).await.unwrap();
        assert_eq!(director.email, "diana@uni.pt");
        let json = serde_json::to_value(&director).unwrap();
        assert!(json.get("password").is_none());

        assert!(student_profile(&api, Id(42)).await.unwrap_err().is_not_found());
    }
}
