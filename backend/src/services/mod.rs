pub mod google;
pub mod rate_limit;
