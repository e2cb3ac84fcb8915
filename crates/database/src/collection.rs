use crate::{dataset::Dataset, error::DbError};
use models::{
    Id,
    allocation::Allocation,
    classroom::{Building, Classroom},
    conflict::Conflict,
    course::Course,
    request::{ClassroomRequest, ShiftRequest},
    shift::Shift,
    student::{Director, Student, Teacher},
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

/// Every collection the mock backend exposes, named by its URL segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Students,
    Directors,
    Teachers,
    Courses,
    Shifts,
    Classrooms,
    Buildings,
    Allocations,
    Conflicts,
    ShiftRequests,
    ClassroomRequests,
}

impl Collection {
    pub const ALL: [Self; 11] = [
        Self::Students,
        Self::Directors,
        Self::Teachers,
        Self::Courses,
        Self::Shifts,
        Self::Classrooms,
        Self::Buildings,
        Self::Allocations,
        Self::Conflicts,
        Self::ShiftRequests,
        Self::ClassroomRequests,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Students => "students",
            Self::Directors => "directors",
            Self::Teachers => "teachers",
            Self::Courses => "courses",
            Self::Shifts => "shifts",
            Self::Classrooms => "classrooms",
            Self::Buildings => "buildings",
            Self::Allocations => "allocations",
            Self::Conflicts => "conflicts",
            Self::ShiftRequests => "shiftRequests",
            Self::ClassroomRequests => "classroomRequests",
        }
    }
}

impl FromStr for Collection {
    type Err = DbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| DbError::UnknownCollection(s.to_string()))
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// Equality filter over record fields, built from URL query pairs.
///
/// Keys starting with `_` are reserved for paging/sorting options and are
/// ignored. Every remaining condition has to match for a record to be kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(String, String)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let conditions = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(k, _)| !k.starts_with('_'))
            .collect();

        Self { conditions }
    }

    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.conditions.push((field.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn matches(&self, record: &Value) -> bool {
        self.conditions.iter().all(|(field, expected)| {
            record
                .get(field)
                .is_some_and(|actual| value_matches(actual, expected))
        })
    }
}

fn value_matches(actual: &Value, expected: &str) -> bool {
    match actual {
        Value::Null => expected == "null",
        Value::Bool(b) => b.to_string() == expected,
        Value::Number(n) => n.to_string() == expected,
        Value::String(s) => s == expected,
        // `enrolled=3` keeps students whose enrolled list contains 3
        Value::Array(items) => items.iter().any(|item| value_matches(item, expected)),
        Value::Object(_) => false,
    }
}

/// A dataset entity that can be stored in a collection
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync {
    fn id(&self) -> Id;
}

macro_rules! impl_record {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Record for $ty {
                fn id(&self) -> Id {
                    self.id
                }
            }
        )*
    };
}

impl_record!(
    Student,
    Director,
    Teacher,
    Course,
    Shift,
    Classroom,
    Building,
    Allocation,
    Conflict,
    ShiftRequest,
    ClassroomRequest,
);

/// Untyped access to one collection, the way the REST layer sees it
pub trait Table: Send + Sync {
    fn list(&self, filter: &Filter) -> Result<Vec<Value>, DbError>;

    fn get(&self, id: Id) -> Result<Option<Value>, DbError>;

    /// Stores a new record, assigning the next free id when none is given
    fn insert(&mut self, record: Value) -> Result<Value, DbError>;

    /// Shallow-merges `changes` into the record with the given id
    fn patch(&mut self, id: Id, changes: Value) -> Result<Option<Value>, DbError>;

    fn remove(&mut self, id: Id) -> Result<Option<Value>, DbError>;
}

fn to_value<T: Serialize>(record: &T) -> Result<Value, DbError> {
    serde_json::to_value(record).map_err(DbError::InvalidRecord)
}

fn into_object(value: Value) -> Result<Map<String, Value>, DbError> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(DbError::NotAnObject),
    }
}

impl<T: Record> Table for Vec<T> {
    fn list(&self, filter: &Filter) -> Result<Vec<Value>, DbError> {
        let mut out = Vec::new();
        for record in self {
            let value = to_value(record)?;
            if filter.matches(&value) {
                out.push(value);
            }
        }

        Ok(out)
    }

    fn get(&self, id: Id) -> Result<Option<Value>, DbError> {
        self.iter().find(|r| r.id() == id).map(to_value).transpose()
    }

    fn insert(&mut self, record: Value) -> Result<Value, DbError> {
        let mut fields = into_object(record)?;

        let id = match fields.get("id") {
            None | Some(Value::Null) => {
                let last = self.iter().map(Record::id).max().unwrap_or_default();
                let next = last.next().ok_or(DbError::IdsExhausted(last))?;
                fields.insert("id".to_string(), to_value(&next)?);
                next
            }
            Some(given) => {
                let id: Id =
                    serde_json::from_value(given.clone()).map_err(DbError::InvalidRecord)?;
                if self.iter().any(|r| r.id() == id) {
                    return Err(DbError::DuplicateId(id));
                }
                id
            }
        };

        let record: T =
            serde_json::from_value(Value::Object(fields)).map_err(DbError::InvalidRecord)?;
        let stored = to_value(&record)?;
        self.push(record);

        log::debug!("Inserted record {id}");
        Ok(stored)
    }

    fn patch(&mut self, id: Id, changes: Value) -> Result<Option<Value>, DbError> {
        let changes = into_object(changes)?;
        let Some(slot) = self.iter_mut().find(|r| r.id() == id) else {
            return Ok(None);
        };

        let mut fields = into_object(to_value(&*slot)?)?;
        for (key, value) in changes {
            // ids are immutable
            if key != "id" {
                fields.insert(key, value);
            }
        }

        let updated: T =
            serde_json::from_value(Value::Object(fields)).map_err(DbError::InvalidRecord)?;
        let stored = to_value(&updated)?;
        *slot = updated;

        Ok(Some(stored))
    }

    fn remove(&mut self, id: Id) -> Result<Option<Value>, DbError> {
        match self.iter().position(|r| r.id() == id) {
            Some(index) => to_value(&Vec::remove(self, index)).map(Some),
            None => Ok(None),
        }
    }
}

impl Dataset {
    pub fn table(&self, collection: Collection) -> &dyn Table {
        match collection {
            Collection::Students => &self.students,
            Collection::Directors => &self.directors,
            Collection::Teachers => &self.teachers,
            Collection::Courses => &self.courses,
            Collection::Shifts => &self.shifts,
            Collection::Classrooms => &self.classrooms,
            Collection::Buildings => &self.buildings,
            Collection::Allocations => &self.allocations,
            Collection::Conflicts => &self.conflicts,
            Collection::ShiftRequests => &self.shift_requests,
            Collection::ClassroomRequests => &self.classroom_requests,
        }
    }

    pub fn table_mut(&mut self, collection: Collection) -> &mut dyn Table {
        match collection {
            Collection::Students => &mut self.students,
            Collection::Directors => &mut self.directors,
            Collection::Teachers => &mut self.teachers,
            Collection::Courses => &mut self.courses,
            Collection::Shifts => &mut self.shifts,
            Collection::Classrooms => &mut self.classrooms,
            Collection::Buildings => &mut self.buildings,
            Collection::Allocations => &mut self.allocations,
            Collection::Conflicts => &mut self.conflicts,
            Collection::ShiftRequests => &mut self.shift_requests,
            Collection::ClassroomRequests => &mut self.classroom_requests,
        }
    }
}
