pub mod auth;
pub mod gatekeeper;
pub mod rate_limit;

pub use auth::*;
pub use gatekeeper::*;
pub use rate_limit::*;
