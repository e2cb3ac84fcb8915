pub mod allocation;
pub mod classroom;
pub mod conflict;
pub mod course;
pub mod days;
pub mod id;
pub mod request;
pub mod role;
pub mod shift;
pub mod student;

pub use id::Id;
