use crate::{api::Api, error::ServerError};
use database::views::CalendarEvent;
use futures::try_join;
use log::info;
use models::{Id, classroom::Classroom, shift::Shift};
use serde_json::json;

/// A course's shifts, ready for the calendar
pub async fn shifts_by_course(api: &Api, course_id: Id) -> Result<Vec<CalendarEvent>, ServerError> {
    let id = course_id.to_string();
    let query = [("courseId", id.as_str())];
    let (shifts, data) = try_join!(
        api.get::<Vec<Shift>>("shifts", &query),
        api.snapshot()
    )?;

    Ok(shifts.iter().map(|shift| data.calendar_event(shift)).collect())
}

/// A course's shifts marked as subscribed, conflicting or available for one
/// student
pub async fn student_course_shifts(
    api: &Api,
    student_id: Id,
    course_id: Id,
) -> Result<Vec<CalendarEvent>, ServerError> {
    let data = api.snapshot().await?;
    if data.course(course_id).is_none() {
        return Err(ServerError::not_found(format!("Course {course_id}")));
    }

    Ok(data.student_view_of_course(student_id, course_id))
}

/// Moves a shift to another classroom, which has to exist
pub async fn update_shift_classroom(
    api: &Api,
    shift_id: Id,
    classroom_id: Id,
) -> Result<Shift, ServerError> {
    let classroom: Classroom = api.get(&format!("classrooms/{classroom_id}"), &[]).await?;

    let shift: Shift = api
        .patch(
            &format!("shifts/{shift_id}"),
            &json!({ "classroomId": classroom.id }),
        )
        .await?;
    info!("Shift {shift_id} now takes place in {}", classroom.name);

    Ok(shift)
}

#[cfg(test)]
mod tests {
    use super::*;
    use database::views::EventClass;
    use crate::test_support::spawn_backend;

    #[tokio::test]
    async fn test_shifts_by_course() {
        let (api, _db) = spawn_backend().await;
        let events = shifts_by_course(&api, Id(1)).await.unwrap();

        let titles: Vec<_> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["IPM-T1", "IPM-TP1", "IPM-TP2"]);
        assert_eq!(events[0].days_of_week, [1]);
        assert_eq!(events[0].start_time, "9:00:00");
    }

    #[tokio::test]
    async fn test_student_course_shifts() {
        let (api, _db) = spawn_backend().await;
        let events = student_course_shifts(&api, Id(1), Id(1)).await.unwrap();

        let classes: Vec<_> = events.iter().map(|e| e.class_names[0]).collect();
        assert_eq!(
            classes,
            [EventClass::Conflict, EventClass::Subscribed, EventClass::Available]
        );

        assert!(student_course_shifts(&api, Id(1), Id(7)).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_update_shift_classroom() {
        let (api, db) = spawn_backend().await;

        let shift = update_shift_classroom(&api, Id(3), Id(2)).await.unwrap();
        assert_eq!(shift.classroom_id, Id(2));

        let err = update_shift_classroom(&api, Id(3), Id(40)).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(db.snapshot().await.shifts[2].classroom_id, Id(2));
    }
}
