//! Data models shared across database access and API handlers.

pub mod application;
pub mod internship;
pub mod user;
