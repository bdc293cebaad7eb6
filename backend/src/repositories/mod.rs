pub mod application;
pub mod internship;
pub mod stats;
pub mod user;
