pub mod janitor;
pub mod rate_limit;
pub mod time;
