//! Database repositories
//!
//! Provides data access layer for database operations.

pub mod account;
pub mod course;
pub mod enrollment;
pub mod faculty;
pub mod memory;
pub mod student;

pub use account::{
    Account, AccountStore, AccountStoreError, NewAccount, PgAccountStore, UniqueField,
};
pub use course::{CourseFields, CourseRecord, CourseRepository};
pub use enrollment::{EnrollmentRecord, EnrollmentRepository};
pub use faculty::{FacultyRecord, FacultyRepository};
pub use memory::InMemoryAccountStore;
pub use student::{GradeReportRow, StudentRecord, StudentRepository};
