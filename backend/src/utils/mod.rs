pub mod cookies;
pub mod jwt;
pub mod net;

pub use cookies::*;
pub use jwt::*;
pub use net::*;
