//! Join layer over the flat dataset.
//!
//! Every reference between collections is an id; these helpers resolve them
//! by linear scan at read time. Missing references resolve to `None` (or are
//! skipped in lists) rather than failing, since nothing enforces referential
//! integrity in the mock data.

use crate::{
    dataset::Dataset,
    views::{
        AllocationPlan, CalendarEvent, ClassroomWithBuilding, ConflictDetails, CourseDetails,
        CourseOverview, CourseWithShifts, EnrolledStudent, EventClass, Inbox, InboxEntry,
        RequestDetails, StudentProfile,
    },
};
use models::{
    Id,
    allocation::Allocation,
    classroom::{Building, Classroom},
    conflict::Conflict,
    course::Course,
    request::ShiftRequest,
    shift::Shift,
    student::{Student, StudentSummary, Teacher},
};
use std::collections::{BTreeMap, HashSet};

/// `part / whole` as a percentage, 0 when `whole` is empty
fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }

    (part as f64 / whole as f64) * 100.0
}

impl Dataset {
    pub fn student(&self, id: Id) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    pub fn course(&self, id: Id) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    pub fn classroom(&self, id: Id) -> Option<&Classroom> {
        self.classrooms.iter().find(|c| c.id == id)
    }

    pub fn building(&self, id: Id) -> Option<&Building> {
        self.buildings.iter().find(|b| b.id == id)
    }

    pub fn teacher(&self, id: Id) -> Option<&Teacher> {
        self.teachers.iter().find(|t| t.id == id)
    }

    pub fn shift(&self, id: Id) -> Option<&Shift> {
        self.shifts.iter().find(|s| s.id == id)
    }

    pub fn course_shifts(&self, course_id: Id) -> Vec<&Shift> {
        self.shifts.iter().filter(|s| s.course_id == course_id).collect()
    }

    pub fn allocations_by_student(&self, student_id: Id) -> Vec<&Allocation> {
        self.allocations
            .iter()
            .filter(|a| a.student_id == student_id)
            .collect()
    }

    pub fn allocation_by_ids(&self, student_id: Id, shift_id: Id) -> Option<&Allocation> {
        self.allocations
            .iter()
            .find(|a| a.student_id == student_id && a.shift_id == shift_id)
    }

    /// Every shift the student is allocated to, in allocation order
    pub fn student_shifts(&self, student_id: Id) -> Vec<&Shift> {
        self.allocations_by_student(student_id)
            .into_iter()
            .filter_map(|a| self.shift(a.shift_id))
            .collect()
    }

    pub fn student_shifts_by_course(&self, student_id: Id, course_id: Id) -> Vec<&Shift> {
        self.student_shifts(student_id)
            .into_iter()
            .filter(|s| s.course_id == course_id)
            .collect()
    }

    pub fn count_students_in_shift(&self, shift_id: Id) -> usize {
        self.allocations
            .iter()
            .filter(|a| a.shift_id == shift_id)
            .count()
    }

    pub fn students_enrolled_in_course(&self, course_id: Id) -> Vec<EnrolledStudent> {
        self.students
            .iter()
            .filter(|s| s.is_enrolled_in(course_id))
            .map(|s| EnrolledStudent {
                student: StudentSummary::from(s),
                shifts: self
                    .student_shifts_by_course(s.id, course_id)
                    .into_iter()
                    .cloned()
                    .collect(),
            })
            .collect()
    }

    /// Share of the course's enrolled students allocated to at least one of
    /// its shifts
    pub fn students_with_shifts_percentage(&self, course_id: Id) -> f64 {
        let enrolled = self.students_enrolled_in_course(course_id);
        let with_shifts = enrolled.iter().filter(|e| !e.shifts.is_empty()).count();

        percentage(with_shifts, enrolled.len())
    }

    /// Share of the course's enrolled students involved in a conflict that
    /// names the course
    pub fn course_conflict_percentage(&self, course_id: Id) -> f64 {
        let enrolled = self.students_enrolled_in_course(course_id);

        let conflicted: HashSet<Id> = self
            .conflicts
            .iter()
            .filter(|c| c.involves_course(course_id))
            .map(|c| c.student_id)
            .collect();

        let count = enrolled
            .iter()
            .filter(|e| conflicted.contains(&e.student.id))
            .count();

        percentage(count, enrolled.len())
    }

    /// Seats in the smallest classroom hosting one of the course's TP/PL
    /// shifts, or 0 when there are none
    pub fn smallest_practical_capacity(&self, course_id: Id) -> u32 {
        let classroom_ids: HashSet<Id> = self
            .course_shifts(course_id)
            .into_iter()
            .filter(|s| s.kind.is_practical())
            .map(|s| s.classroom_id)
            .collect();

        self.classrooms
            .iter()
            .filter(|c| classroom_ids.contains(&c.id))
            .map(|c| c.capacity)
            .min()
            .unwrap_or(0)
    }

    /// The student's other shifts that clash with `shift`
    pub fn overlapping_shifts(&self, student_id: Id, shift: &Shift) -> Vec<&Shift> {
        self.student_shifts(student_id)
            .into_iter()
            .filter(|other| other.id != shift.id && other.overlaps(shift))
            .collect()
    }

    pub fn calendar_event(&self, shift: &Shift) -> CalendarEvent {
        let course = self.course(shift.course_id).cloned();
        let classroom = self.classroom(shift.classroom_id).cloned();
        let building = classroom
            .as_ref()
            .and_then(|c| self.building(c.building_id))
            .cloned();

        let abbreviation = course
            .as_ref()
            .map(|c| c.abbreviation.as_str())
            .unwrap_or("?");

        CalendarEvent {
            title: format!("{abbreviation}-{}", shift.name),
            days_of_week: vec![shift.day.number()],
            start_time: shift.start_time(),
            end_time: shift.end_time(),
            teacher: self.teacher(shift.teacher_id).cloned(),
            class_names: Vec::new(),
            enrolled_count: self.count_students_in_shift(shift.id),
            course,
            classroom,
            building,
            shift: shift.clone(),
        }
    }

    /// Calendar events for a course's shifts, highlighted for one student
    pub fn student_view_of_course(&self, student_id: Id, course_id: Id) -> Vec<CalendarEvent> {
        self.course_shifts(course_id)
            .into_iter()
            .map(|shift| {
                let subscribed = self.allocation_by_ids(student_id, shift.id).is_some();
                let conflict = !self.overlapping_shifts(student_id, shift).is_empty();

                let mut event = self.calendar_event(shift);
                event.class_names = vec![EventClass::choose(subscribed, conflict)];
                event
            })
            .collect()
    }

    pub fn course_overview(&self, course: &Course) -> CourseOverview {
        CourseOverview {
            course: course.clone(),
            enrolled: self.students_enrolled_in_course(course.id),
            conflicts_percent: self.course_conflict_percentage(course.id),
        }
    }

    /// Courses grouped by curricular year
    pub fn courses_by_year<'a>(
        &self,
        courses: impl IntoIterator<Item = &'a Course>,
    ) -> BTreeMap<u8, Vec<CourseOverview>> {
        let mut grouped: BTreeMap<u8, Vec<CourseOverview>> = BTreeMap::new();
        for course in courses {
            grouped
                .entry(course.year)
                .or_default()
                .push(self.course_overview(course));
        }

        grouped
    }

    pub fn course_details(&self, course: &Course) -> CourseDetails {
        CourseDetails {
            course: course.clone(),
            enrolled: self.students_enrolled_in_course(course.id),
            shifts: self.course_shifts(course.id).into_iter().cloned().collect(),
            percentage_enrolled: self.students_with_shifts_percentage(course.id),
        }
    }

    pub fn classroom_with_building(&self, classroom: &Classroom) -> ClassroomWithBuilding {
        ClassroomWithBuilding {
            classroom: classroom.clone(),
            building: self.building(classroom.building_id).cloned(),
        }
    }

    pub fn conflict_details(&self, conflict: &Conflict) -> ConflictDetails {
        ConflictDetails {
            student: self.student(conflict.student_id).map(StudentSummary::from),
            courses: conflict
                .course_ids
                .iter()
                .filter_map(|&id| self.course(id).cloned())
                .collect(),
            shifts: conflict
                .shift_ids
                .iter()
                .filter_map(|&id| self.shift(id).cloned())
                .collect(),
            conflict: conflict.clone(),
        }
    }

    pub fn inbox_entry(&self, request: &ShiftRequest) -> InboxEntry {
        InboxEntry {
            author: self.student(request.student_id).map(|s| s.name.clone()),
            course_name: self.course(request.course_id).map(|c| c.name.clone()),
            request: request.clone(),
        }
    }

    /// Splits requests into open (unanswered) and closed ones
    pub fn inbox<'a>(&self, requests: impl IntoIterator<Item = &'a ShiftRequest>) -> Inbox {
        let (open, closed): (Vec<InboxEntry>, Vec<InboxEntry>) = requests
            .into_iter()
            .map(|r| self.inbox_entry(r))
            .partition(|entry| entry.request.is_open());

        Inbox { open, closed }
    }

    pub fn request_details(&self, request: &ShiftRequest) -> RequestDetails {
        let course = self.course(request.course_id).cloned();

        RequestDetails {
            author: self.student(request.student_id).map(StudentSummary::from),
            course_name: course.as_ref().map(|c| c.name.clone()),
            course,
            new_shift: self.shift(request.shift_id).map(|s| self.calendar_event(s)),
            old_shift: self.shift(request.old_shift_id).map(|s| self.calendar_event(s)),
            request: request.clone(),
        }
    }

    pub fn student_profile(&self, student: &Student) -> StudentProfile {
        let courses = student
            .enrolled
            .iter()
            .filter_map(|&id| self.course(id))
            .map(|course| CourseWithShifts {
                course: course.clone(),
                shifts: self
                    .student_shifts_by_course(student.id, course.id)
                    .into_iter()
                    .cloned()
                    .collect(),
            })
            .collect();

        StudentProfile {
            student: StudentSummary::from(student),
            shifts: self
                .student_shifts(student.id)
                .into_iter()
                .map(|s| self.calendar_event(s))
                .collect(),
            courses,
        }
    }

    pub fn allocation_plan(&self, course: &Course) -> AllocationPlan {
        AllocationPlan {
            course: course.clone(),
            enrolled_count: self.students_enrolled_in_course(course.id).len(),
            practical_shifts: self
                .course_shifts(course.id)
                .into_iter()
                .filter(|s| s.kind.is_practical())
                .count(),
            smallest_practical_capacity: self.smallest_practical_capacity(course.id),
            percentage_enrolled: self.students_with_shifts_percentage(course.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{fixtures::dataset, views::EventClass};
    use models::Id;

    fn close_to(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() < 0.01
    }

    #[test]
    fn test_lookups_by_id() {
        let db = dataset();
        assert_eq!(db.student(Id(2)).unwrap().name, "Bruno");
        assert_eq!(db.course(Id(1)).unwrap().abbreviation, "IPM");
        assert_eq!(db.building(Id(2)).unwrap().abbreviation, "II");
        assert!(db.teacher(Id(9)).is_none());
        assert!(db.shift(Id(99)).is_none());
    }

    #[test]
    fn test_students_enrolled_in_course_carry_their_shifts() {
        let db = dataset();
        let enrolled = db.students_enrolled_in_course(Id(1));

        let names: Vec<&str> = enrolled.iter().map(|e| e.student.name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Carla", "Duarte"]);

        let ana_shifts: Vec<Id> = enrolled[0].shifts.iter().map(|s| s.id).collect();
        assert_eq!(ana_shifts, vec![Id(1), Id(2)]);
        assert!(enrolled[2].shifts.is_empty());
    }

    #[test]
    fn test_percentages() {
        let db = dataset();

        // Duarte has no IPM shift
        assert!(close_to(db.students_with_shifts_percentage(Id(1)), 66.67));
        assert!(close_to(db.students_with_shifts_percentage(Id(2)), 100.0));

        // only Ana is in a conflict
        assert!(close_to(db.course_conflict_percentage(Id(1)), 33.33));
        assert!(close_to(db.course_conflict_percentage(Id(2)), 50.0));

        // nobody is enrolled in Cálculo
        assert_eq!(db.students_with_shifts_percentage(Id(3)), 0.0);
        assert_eq!(db.course_conflict_percentage(Id(3)), 0.0);
    }

    #[test]
    fn test_smallest_practical_capacity() {
        let db = dataset();
        assert_eq!(db.smallest_practical_capacity(Id(1)), 20);
        assert_eq!(db.smallest_practical_capacity(Id(2)), 20);
        assert_eq!(db.smallest_practical_capacity(Id(3)), 0);
    }

    #[test]
    fn test_calendar_event_joins_everything() {
        let db = dataset();
        let event = db.calendar_event(db.shift(Id(2)).unwrap());

        assert_eq!(event.title, "IPM-TP1");
        assert_eq!(event.days_of_week, vec![2]);
        assert_eq!(event.start_time, "14:00:00");
        assert_eq!(event.end_time, "16:00:00");
        assert_eq!(event.classroom.unwrap().name, "I.1.02");
        assert_eq!(event.building.unwrap().name, "Edifício I");
        assert_eq!(event.teacher.unwrap().name, "Rui Silva");
        assert_eq!(event.enrolled_count, 1);

        let json = serde_json::to_value(db.calendar_event(db.shift(Id(1)).unwrap())).unwrap();
        assert_eq!(json["id"], serde_json::json!(1));
        assert_eq!(json["type"], serde_json::json!("T"));
        assert_eq!(json["enrolledCount"], serde_json::json!(2));
    }

    #[test]
    fn test_overlapping_shifts() {
        let db = dataset();
        let bd_t1 = db.shift(Id(4)).unwrap();
        let clashes: Vec<Id> = db
            .overlapping_shifts(Id(1), bd_t1)
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(clashes, vec![Id(1)]);

        let tp2 = db.shift(Id(3)).unwrap();
        assert!(db.overlapping_shifts(Id(1), tp2).is_empty());
    }

    #[test]
    fn test_student_view_of_course() {
        let db = dataset();
        let classes: Vec<EventClass> = db
            .student_view_of_course(Id(1), Id(1))
            .into_iter()
            .map(|e| e.class_names[0])
            .collect();

        assert_eq!(
            classes,
            vec![EventClass::Conflict, EventClass::Subscribed, EventClass::Available]
        );
    }

    #[test]
    fn test_courses_by_year() {
        let db = dataset();
        let grouped = db.courses_by_year(&db.courses);

        assert_eq!(grouped.keys().copied().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(grouped[&1].len(), 2);
        assert_eq!(grouped[&2][0].enrolled.len(), 3);
    }

    #[test]
    fn test_inbox_split_and_names() {
        let db = dataset();
        let inbox = db.inbox(&db.shift_requests);

        assert_eq!(inbox.open.len(), 1);
        assert_eq!(inbox.closed.len(), 1);
        assert_eq!(inbox.open[0].author.as_deref(), Some("Ana"));
        assert_eq!(
            inbox.closed[0].course_name.as_deref(),
            Some("Interação Pessoa-Máquina")
        );
    }

    #[test]
    fn test_request_details_uses_requesting_student() {
        let db = dataset();
        let details = db.request_details(&db.shift_requests[1]);

        assert_eq!(details.author.unwrap().name, "Carla");
        assert_eq!(details.new_shift.unwrap().title, "IPM-TP2");
        assert_eq!(details.old_shift.unwrap().title, "IPM-TP1");
    }

    #[test]
    fn test_conflict_details() {
        let db = dataset();
        let details = db.conflict_details(&db.conflicts[0]);

        assert_eq!(details.student.unwrap().name, "Ana");
        assert_eq!(details.courses.len(), 2);
        assert_eq!(details.shifts.len(), 2);
    }

    #[test]
    fn test_student_profile() {
        let db = dataset();
        let profile = db.student_profile(db.student(Id(1)).unwrap());

        assert_eq!(profile.shifts.len(), 3);
        assert_eq!(profile.courses.len(), 2);
        assert_eq!(profile.courses[1].shifts[0].id, Id(4));

        // credentials never leave the lookup layer
        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_allocation_plan_and_classrooms() {
        let db = dataset();
        let plan = db.allocation_plan(db.course(Id(1)).unwrap());

        assert_eq!(plan.enrolled_count, 3);
        assert_eq!(plan.practical_shifts, 2);
        assert_eq!(plan.smallest_practical_capacity, 20);

        let room = db.classroom_with_building(db.classroom(Id(3)).unwrap());
        assert_eq!(room.building.unwrap().name, "Edifício II");
    }
}
