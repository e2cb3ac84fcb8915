use crate::{api::Api, error::ServerError};
use database::views::ConflictDetails;
use futures::try_join;
use log::info;
use models::{Id, conflict::Conflict};

pub async fn all_conflicts(api: &Api) -> Result<Vec<ConflictDetails>, ServerError> {
    let (conflicts, data) = try_join!(
        api.get::<Vec<Conflict>>("conflicts", &[]),
        api.snapshot()
    )?;

    Ok(conflicts
        .iter()
        .map(|conflict| data.conflict_details(conflict))
        .collect())
}

/// Marks a conflict as resolved by deleting it
pub async fn remove_conflict(api: &Api, conflict_id: Id) -> Result<Conflict, ServerError> {
    let removed: Conflict = api.delete(&format!("conflicts/{conflict_id}")).await?;
    info!("Resolved conflict {conflict_id} of student {}", removed.student_id);

    Ok(removed)
}
