pub mod collection;
pub mod dataset;
pub mod db;
pub mod error;
pub mod services;
pub mod views;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;

pub use dataset::Dataset;
pub use error::DbError;
