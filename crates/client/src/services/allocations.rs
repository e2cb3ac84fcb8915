use crate::{api::Api, error::ServerError};
use database::views::AllocationPlan;
use log::{info, warn};
use models::{Id, allocation::Allocation, conflict::Conflict};
use serde_json::{Value, json};

/// Moves a student from `old_shift_id` to `new_shift_id`.
///
/// The old allocation and the new shift have to exist; nothing is written
/// otherwise. When the new shift overlaps another shift the student keeps, a
/// conflict naming both is recorded and returned.
pub async fn manual_allocation(
    api: &Api,
    student_id: Id,
    old_shift_id: Id,
    new_shift_id: Id,
) -> Result<Option<Conflict>, ServerError> {
    if old_shift_id == new_shift_id {
        return Ok(None);
    }

    let data = api.snapshot().await?;
    let old_allocation = data
        .allocation_by_ids(student_id, old_shift_id)
        .ok_or_else(|| {
            ServerError::not_found(format!(
                "Allocation of student {student_id} to shift {old_shift_id}"
            ))
        })?;
    let new_shift = data
        .shift(new_shift_id)
        .ok_or_else(|| ServerError::not_found(format!("Shift {new_shift_id}")))?;

    let clashes: Vec<_> = data
        .overlapping_shifts(student_id, new_shift)
        .into_iter()
        .filter(|shift| shift.id != old_shift_id)
        .collect();

    // old allocation is removed only after the new one is stored
    if data.allocation_by_ids(student_id, new_shift_id).is_none() {
        let allocation = json!({ "studentId": student_id, "shiftId": new_shift_id });
        api.post::<Allocation, _>("allocations", &allocation).await?;
    }
    api.delete::<Value>(&format!("allocations/{}", old_allocation.id)).await?;
    info!("Moved student {student_id} from shift {old_shift_id} to {new_shift_id}");

    if clashes.is_empty() {
        return Ok(None);
    }

    let mut course_ids = vec![new_shift.course_id];
    let mut shift_ids = vec![new_shift.id];
    for shift in clashes {
        if !course_ids.contains(&shift.course_id) {
            course_ids.push(shift.course_id);
        }
        shift_ids.push(shift.id);
    }

    let conflict: Conflict = api
        .post(
            "conflicts",
            &json!({
                "studentId": student_id,
                "courseIDs": course_ids,
                "shiftIDs": shift_ids,
            }),
        )
        .await?;
    warn!(
        "Student {student_id} now has a timetable conflict (conflict {})",
        conflict.id
    );

    Ok(Some(conflict))
}

/// Sizing figures for every course
pub async fn allocation_plans(api: &Api) -> Result<Vec<AllocationPlan>, ServerError> {
    let data = api.snapshot().await?;

    Ok(data
        .courses
        .iter()
        .map(|course| data.allocation_plan(course))
        .collect())
}
