pub mod api;
pub mod attendance;
pub mod auth;
pub mod config;
pub mod docs;
pub mod error;
pub mod model;
pub mod payroll;
pub mod reporting;
pub mod routes;
pub mod seed;
pub mod utils;

#[cfg(test)]
mod test_utils;
