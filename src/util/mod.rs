//! Small shared utilities: cookie access and route classification.

pub mod cookie;
pub mod routes;
