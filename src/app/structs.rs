pub mod json_from_request;
pub mod query_from_request;
