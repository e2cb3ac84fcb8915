use crate::{api::Api, error::ServerError};
use database::{
    Dataset,
    views::{ClassroomWithBuilding, CourseDetails, CourseOverview},
};
use futures::try_join;
use models::{
    Id,
    classroom::{Building, Classroom},
    course::Course,
};
use std::collections::BTreeMap;

/// Every course with its enrolled students and conflict share, keyed by
/// curricular year
pub async fn all_courses_by_year(api: &Api) -> Result<BTreeMap<u8, Vec<CourseOverview>>, ServerError> {
    let (courses, data) = try_join!(all_courses(api), api.snapshot())?;

    Ok(data.courses_by_year(&courses))
}

pub async fn all_courses(api: &Api) -> Result<Vec<Course>, ServerError> {
    api.get("courses", &[]).await
}

pub async fn all_classrooms(api: &Api) -> Result<Vec<Classroom>, ServerError> {
    api.get("classrooms", &[]).await
}

pub async fn classrooms_with_buildings(api: &Api) -> Result<Vec<ClassroomWithBuilding>, ServerError> {
    let (classrooms, buildings) = try_join!(
        all_classrooms(api),
        api.get::<Vec<Building>>("buildings", &[])
    )?;

    let data = Dataset {
        buildings,
        ..Dataset::default()
    };

    Ok(classrooms
        .iter()
        .map(|classroom| data.classroom_with_building(classroom))
        .collect())
}

/// The course with its enrolled students, shifts and the share of students
/// already placed in a shift
pub async fn course_by_id(api: &Api, course_id: Id) -> Result<CourseDetails, ServerError> {
    let id = course_id.to_string();
    let (course, data) = try_join!(
        api.find_one::<Course>("courses", "id", &id),
        api.snapshot()
    )?;

    Ok(data.course_details(&course))
}
