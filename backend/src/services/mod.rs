//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories and the identity layer.

pub mod account;
pub mod course;
pub mod enrollment;
pub mod faculty;
pub mod student;

pub use account::AccountService;
pub use course::CourseService;
pub use enrollment::EnrollmentService;
pub use faculty::FacultyService;
pub use student::StudentService;
