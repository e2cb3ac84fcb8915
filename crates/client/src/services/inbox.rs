use crate::{api::Api, error::ServerError};
use database::views::{Inbox, RequestDetails};
use futures::try_join;
use models::{
    Id,
    request::ShiftRequest,
    role::{Role, UserInfo},
};

/// Students only ever see their own requests
fn scope(user: Option<&UserInfo>) -> Option<String> {
    user.filter(|u| u.role == Role::Student)
        .map(|u| u.id.to_string())
}

/// Shift requests split into open and answered ones
pub async fn inbox(api: &Api, user: Option<&UserInfo>) -> Result<Inbox, ServerError> {
    let student_id = scope(user);
    let query: Vec<(&str, &str)> = student_id
        .as_deref()
        .map(|id| vec![("studentId", id)])
        .unwrap_or_default();

    let (requests, data) = try_join!(
        api.get::<Vec<ShiftRequest>>("shiftRequests", &query),
        api.snapshot()
    )?;

    Ok(data.inbox(&requests))
}

pub async fn shift_request_by_id(api: &Api, request_id: Id) -> Result<RequestDetails, ServerError> {
    let id = request_id.to_string();
    let (request, data) = try_join!(
        api.find_one::<ShiftRequest>("shiftRequests", "id", &id),
        api.snapshot()
    )?;

    Ok(data.request_details(&request))
}

/// Number of requests still waiting for an answer
pub async fn count_pending(api: &Api, user: Option<&UserInfo>) -> Result<usize, ServerError> {
    let student_id = scope(user);
    let mut query = vec![("response", "null")];
    if let Some(id) = student_id.as_deref() {
        query.push(("studentId", id));
    }

    let pending: Vec<ShiftRequest> = api.get("shiftRequests", &query).await?;
    Ok(pending.len())
}
