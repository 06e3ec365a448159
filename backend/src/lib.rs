//! Course Enrollment Backend Library
//!
//! Accounts, bearer-token authentication and role-based access in front of
//! student, faculty, course and enrollment records. Exposed as a library so
//! integration tests can build the router directly.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
