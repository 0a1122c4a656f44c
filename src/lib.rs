#[macro_use]
pub mod database;

pub mod config;
pub mod error;
pub mod models;
pub mod schema;
pub mod store;
