pub mod collection;
pub mod db;
pub mod health;
pub mod root;
