//! One loader per route, each producing the data its page shows.

use crate::{
    api::Api,
    error::ServerError,
    router::Route,
    services::{allocations, auth, conflicts, courses, inbox, shifts, students},
};
use futures::{future::try_join_all, try_join};
use models::{
    Id,
    role::{Role, UserInfo},
};
use serde::Serialize;
use serde_json::{Value, json};

/// A rendered page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub route: &'static str,
    pub path: String,
    pub data: Value,
}

fn signed_in(user: Option<&UserInfo>) -> Result<&UserInfo, ServerError> {
    user.ok_or(ServerError::NotAuthenticated)
}

/// The student's courses with every shift they could switch to
async fn request_options(api: &Api, student_id: Id) -> Result<Value, ServerError> {
    let profile = auth::student_profile(api, student_id).await?;

    let options = try_join_all(profile.courses.iter().map(|entry| {
        shifts::student_course_shifts(api, student_id, entry.course.id)
    }))
    .await?;

    let courses: Vec<Value> = profile
        .courses
        .iter()
        .zip(options)
        .map(|(entry, options)| {
            json!({
                "course": entry.course,
                "current": entry.shifts,
                "options": options,
            })
        })
        .collect();

    Ok(json!({ "courses": courses }))
}

async fn manual_allocation(api: &Api, student_id: Option<Id>) -> Result<Value, ServerError> {
    let Some(student_id) = student_id else {
        return Ok(json!({ "students": students::all_students(api).await? }));
    };

    let (all, profile) = try_join!(
        students::all_students(api),
        auth::student_profile(api, student_id)
    )?;

    Ok(json!({ "students": all, "selected": profile }))
}

/// Loads the data shown by `route`
pub async fn render(api: &Api, user: Option<&UserInfo>, route: &Route) -> Result<Page, ServerError> {
    let data = match *route {
        Route::DirectorProfile => {
            let user = signed_in(user)?;
            serde_json::to_value(auth::director_profile(api, user.id).await?)?
        }
        Route::StudentProfile { id } => serde_json::to_value(auth::student_profile(api, id).await?)?,
        Route::CoursesList => serde_json::to_value(courses::all_courses_by_year(api).await?)?,
        Route::CourseDetails { id } => {
            let user = signed_in(user)?;
            let calendar = if user.role == Role::Student {
                shifts::student_course_shifts(api, user.id, id).await?
            } else {
                shifts::shifts_by_course(api, id).await?
            };
            let details = courses::course_by_id(api, id).await?;

            json!({ "course": details, "calendar": calendar })
        }
        Route::Conflicts => serde_json::to_value(conflicts::all_conflicts(api).await?)?,
        Route::Inbox => {
            let (entries, pending) = try_join!(
                inbox::inbox(api, user),
                inbox::count_pending(api, user)
            )?;

            json!({ "inbox": entries, "pending": pending })
        }
        Route::NewRequest => {
            let user = signed_in(user)?;
            if user.role != Role::Student {
                return Err(ServerError::Forbidden(
                    "only students can request a shift change".to_string(),
                ));
            }

            request_options(api, user.id).await?
        }
        Route::RequestDetails { id } => serde_json::to_value(inbox::shift_request_by_id(api, id).await?)?,
        Route::ManualAllocation { student_id } => manual_allocation(api, student_id).await?,
        Route::AutomaticAllocation => serde_json::to_value(allocations::allocation_plans(api).await?)?,
        Route::Login => json!({ "message": "Sign in with `horarios login <email> <password>`" }),
        Route::NotFound => json!({ "message": "Page not found" }),
    };

    Ok(Page {
        route: route.name(),
        path: route.path(),
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::spawn_backend;

    fn user(id: u32, role: Role) -> UserInfo {
        UserInfo {
            id: Id(id),
            email: "someone@uni.pt".to_string(),
            role,
        }
    }

    #[tokio::test]
    async fn test_courses_list_page() {
        let (api, _db) = spawn_backend().await;
        let page = render(&api, Some(&user(1, Role::Director)), &Route::CoursesList)
            .await
            .unwrap();

        assert_eq!(page.route, "unidades-curriculares");
        assert_eq!(page.data["1"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_course_details_for_student() {
        let (api, _db) = spawn_backend().await;
        let page = render(
            &api,
            Some(&user(1, Role::Student)),
            &Route::CourseDetails { id: Id(1) },
        )
        .await
        .unwrap();

        assert_eq!(page.data["course"]["abbreviation"], "IPM");
        assert_eq!(page.data["calendar"][0]["classNames"][0], "conflict");
    }

    #[tokio::test]
    async fn test_new_request_page() {
        let (api, _db) = spawn_backend().await;

        let page = render(&api, Some(&user(1, Role::Student)), &Route::NewRequest)
            .await
            .unwrap();
        let courses = page.data["courses"].as_array().unwrap();
        assert_eq!(courses.len(), 2);
        assert_eq!(courses[0]["options"].as_array().unwrap().len(), 3);

        let err = render(&api, Some(&user(1, Role::Director)), &Route::NewRequest)
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_inbox_page_counts_pending() {
        let (api, _db) = spawn_backend().await;
        let page = render(&api, Some(&user(1, Role::Director)), &Route::Inbox)
            .await
            .unwrap();

        assert_eq!(page.data["pending"], 1);
        assert_eq!(page.data["inbox"]["open"][0]["author"], "Ana");
    }

    #[tokio::test]
    async fn test_manual_allocation_page() {
        let (api, _db) = spawn_backend().await;

        let page = render(
            &api,
            Some(&user(1, Role::Director)),
            &Route::ManualAllocation { student_id: Some(Id(2)) },
        )
        .await
        .unwrap();
        assert_eq!(page.data["students"].as_array().unwrap().len(), 4);
        assert_eq!(page.data["selected"]["name"], "Bruno");
        assert_eq!(page.path, "/alocacao-manual/2");
    }

    #[tokio::test]
    async fn test_director_profile_requires_session() {
        let (api, _db) = spawn_backend().await;

        let err = render(&api, None, &Route::DirectorProfile).await.unwrap_err();
        assert!(matches!(err, ServerError::NotAuthenticated));

        let page = render(&api, Some(&user(1, Role::Director)), &Route::DirectorProfile)
            .await
            .unwrap();
        assert_eq!(page.data["name"], "Diana");
    }
}
