//! Operations behind each page and action.
//!
//! Each one fetches the records it needs through [`crate::Api`] and joins
//! them with the lookup helpers of the `database` crate.

pub mod allocations;
pub mod auth;
pub mod conflicts;
pub mod courses;
pub mod inbox;
pub mod requests;
pub mod shifts;
pub mod students;
