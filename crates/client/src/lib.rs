pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod pages;
pub mod router;
pub mod services;
pub mod session;

#[cfg(test)]
mod test_support;

pub use api::Api;
pub use error::ServerError;
