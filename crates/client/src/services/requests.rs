use crate::{api::Api, error::ServerError, services::allocations::manual_allocation};
use chrono::Local;
use log::info;
use models::{
    Id,
    conflict::Conflict,
    request::{ShiftRequest, created_at},
    role::{Role, UserInfo},
};
use serde::Serialize;
use serde_json::json;

/// What a student fills in to ask for another shift
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewShiftRequest {
    pub course_id: Id,
    /// The shift the student attends now
    pub old_shift_id: Id,
    pub shift_id: Id,
    pub message: String,
}

/// Files a request on behalf of the signed-in student
pub async fn create_shift_request(
    api: &Api,
    user: &UserInfo,
    request: &NewShiftRequest,
) -> Result<ShiftRequest, ServerError> {
    if user.role != Role::Student {
        return Err(ServerError::Forbidden(
            "only students can request a shift change".to_string(),
        ));
    }

    let body = json!({
        "shiftId": request.shift_id,
        "oldShiftId": request.old_shift_id,
        "courseId": request.course_id,
        "message": request.message,
        "studentId": user.id,
        "response": null,
        "alternativeShiftId": null,
        "responseSeenByStudent": false,
        "createdAt": created_at::format(&Local::now().naive_local()),
        "accepted": false,
    });

    let created: ShiftRequest = api.post("shiftRequests", &body).await?;
    info!("Student {} created shift request {}", user.id, created.id);

    Ok(created)
}

async fn open_request(api: &Api, request_id: Id) -> Result<ShiftRequest, ServerError> {
    let request: ShiftRequest = api
        .find_one("shiftRequests", "id", &request_id.to_string())
        .await?;

    if !request.is_open() {
        return Err(ServerError::Forbidden(format!(
            "request {request_id} was already answered"
        )));
    }

    Ok(request)
}

/// Moves the student into the requested shift, then records the answer.
/// A failed move leaves the request open.
///
/// Returns the conflict recorded when the new shift clashes with another of
/// the student's shifts.
pub async fn accept_request(
    api: &Api,
    request_id: Id,
    message: &str,
) -> Result<Option<Conflict>, ServerError> {
    let request = open_request(api, request_id).await?;
    let answer = json!({ "response": message, "accepted": true });

    // the request is answered only once the student has been moved
    let conflict =
        manual_allocation(api, request.student_id, request.old_shift_id, request.shift_id).await?;
    api.patch::<ShiftRequest, _>(&format!("shiftRequests/{request_id}"), &answer)
        .await?;

    info!("Accepted shift request {request_id}");
    Ok(conflict)
}

pub async fn reject_request(
    api: &Api,
    request_id: Id,
    message: &str,
) -> Result<ShiftRequest, ServerError> {
    open_request(api, request_id).await?;

    let answer = json!({ "response": message, "accepted": false });
    let rejected = api
        .patch(&format!("shiftRequests/{request_id}"), &answer)
        .await?;

    info!("Rejected shift request {request_id}");
    Ok(rejected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::spawn_backend;
    use database::collection::Collection;

    fn student(id: u32) -> UserInfo {
        UserInfo {
            id: Id(id),
            email: "ana@uni.pt".to_string(),
            role: Role::Student,
        }
    }

    fn new_request() -> NewShiftRequest {
        NewShiftRequest {
            course_id: Id(1),
            old_shift_id: Id(1),
            shift_id: Id(2),
            message: "Trabalho às segundas".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_shift_request() {
        let (api, db) = spawn_backend().await;

        let created = create_shift_request(&api, &student(4), &new_request())
            .await
            .unwrap();
        assert_eq!(created.id, Id(3));
        assert_eq!(created.student_id, Id(4));
        assert!(created.is_open());
        assert!(!created.accepted);

        assert_eq!(db.snapshot().await.shift_requests.len(), 3);
    }

    #[tokio::test]
    async fn test_only_students_create_requests() {
        let (api, _db) = spawn_backend().await;
        let director = UserInfo {
            role: Role::Director,
            ..student(1)
        };

        let err = create_shift_request(&api, &director, &new_request())
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_accept_moves_the_student() {
        let (api, db) = spawn_backend().await;

        let conflict = accept_request(&api, Id(1), "Aceite").await.unwrap();
        assert!(conflict.is_none());

        let data = db.snapshot().await;
        assert!(data.allocation_by_ids(Id(1), Id(2)).is_none());
        assert!(data.allocation_by_ids(Id(1), Id(3)).is_some());

        let request = data.shift_requests.iter().find(|r| r.id == Id(1)).unwrap();
        assert_eq!(request.response.as_deref(), Some("Aceite"));
        assert!(request.accepted);
    }

    #[tokio::test]
    async fn test_accept_into_clash_records_conflict() {
        let (api, db) = spawn_backend().await;

        // Bruno asks to leave BD PL1 (Thu) for IPM T1 (Mon 9-11), which clashes with BD T1
        let request = NewShiftRequest {
            course_id: Id(1),
            old_shift_id: Id(5),
            shift_id: Id(1),
            message: "Prefiro segundas".to_string(),
        };
        let created = create_shift_request(&api, &student(2), &request).await.unwrap();

        let conflict = accept_request(&api, created.id, "Aceite").await.unwrap().unwrap();
        assert_eq!(conflict.student_id, Id(2));
        assert_eq!(conflict.shift_ids, [Id(1), Id(4)]);

        let data = db.snapshot().await;
        assert!(data.allocation_by_ids(Id(2), Id(1)).is_some());
        assert_eq!(data.conflicts.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_move_leaves_request_open() {
        let (api, db) = spawn_backend().await;
        db.remove(Collection::Allocations, Id(2)).await.unwrap();

        let err = accept_request(&api, Id(1), "Aceite").await.unwrap_err();
        assert!(err.is_not_found());

        let data = db.snapshot().await;
        let request = data.shift_requests.iter().find(|r| r.id == Id(1)).unwrap();
        assert!(request.is_open());
        assert!(!request.accepted);
        assert!(data.allocation_by_ids(Id(1), Id(3)).is_none());

        // once the allocation is back the same request can still be accepted
        db.insert(Collection::Allocations, json!({ "studentId": 1, "shiftId": 2 }))
            .await
            .unwrap();
        assert!(accept_request(&api, Id(1), "Aceite").await.is_ok());
    }

    #[tokio::test]
    async fn test_reject_keeps_allocations() {
        let (api, db) = spawn_backend().await;

        let rejected = reject_request(&api, Id(1), "Sem vagas").await.unwrap();
        assert!(!rejected.accepted);
        assert!(!rejected.is_open());
        assert!(db.snapshot().await.allocation_by_ids(Id(1), Id(2)).is_some());
    }

    #[tokio::test]
    async fn test_answered_requests_are_final() {
        let (api, _db) = spawn_backend().await;

        let err = reject_request(&api, Id(2), "Mudei de ideias").await.unwrap_err();
        assert!(matches!(err, ServerError::Forbidden(_)));
    }
}
