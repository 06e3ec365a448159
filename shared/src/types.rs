//! API request and response types

use crate::models::{Grade, Role};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Offset pagination for list endpoints
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "Pagination::default_limit")]
    pub limit: i64,
}

impl Pagination {
    pub const MAX_LIMIT: i64 = 100;

    fn default_limit() -> i64 {
        10
    }

    /// Clamp to sane bounds before the values reach a query
    pub fn normalized(self) -> Self {
        Self {
            skip: self.skip.max(0),
            limit: self.limit.clamp(1, Self::MAX_LIMIT),
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: Self::default_limit(),
        }
    }
}

// ============================================================================
// Authentication and Accounts
// ============================================================================

/// Issued access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Login form (`application/x-www-form-urlencoded`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Partial profile update; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Password change request
///
/// `old_password` may be omitted only when an admin acts on another account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_password: Option<String>,
    pub new_password: String,
}

/// Role change request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleUpdateRequest {
    pub role: Role,
}

/// Account as returned by the API. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Academic Records
// ============================================================================

/// Create/replace body for students and faculty
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonRequest {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacultyResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Faculty listing filters (case-insensitive partial matches)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FacultyFilter {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Create/replace body for courses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseRequest {
    pub name: String,
    #[serde(default = "CourseRequest::default_credits")]
    pub credits: i32,
    pub faculty_id: i64,
}

impl CourseRequest {
    fn default_credits() -> i32 {
        3
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseResponse {
    pub id: i64,
    pub name: String,
    pub credits: i32,
    pub faculty_id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourseFilter {
    #[serde(default)]
    pub faculty_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentRequest {
    pub student_id: i64,
    pub course_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentResponse {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub grade: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnrollmentFilter {
    #[serde(default)]
    pub student_id: Option<i64>,
    #[serde(default)]
    pub course_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeAssignRequest {
    pub grade: Grade,
}

/// One line of a student's grade report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeReportEntry {
    pub course_id: i64,
    pub course_name: Option<String>,
    pub grade: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        let p: Pagination = serde_json::from_str("{}").unwrap();
        assert_eq!(p.skip, 0);
        assert_eq!(p.limit, 10);
    }

    #[test]
    fn test_pagination_normalized_clamps() {
        let p = Pagination { skip: -5, limit: 1000 }.normalized();
        assert_eq!(p.skip, 0);
        assert_eq!(p.limit, Pagination::MAX_LIMIT);

        let p = Pagination { skip: 3, limit: 0 }.normalized();
        assert_eq!(p.skip, 3);
        assert_eq!(p.limit, 1);
    }

    #[test]
    fn test_course_request_default_credits() {
        let req: CourseRequest =
            serde_json::from_str(r#"{"name": "Compilers", "faculty_id": 1}"#).unwrap();
        assert_eq!(req.credits, 3);
    }

    #[test]
    fn test_profile_update_fields_are_optional() {
        let req: UpdateProfileRequest =
            serde_json::from_str(r#"{"email": "new@example.com"}"#).unwrap();
        assert!(req.username.is_none());
        assert_eq!(req.email.as_deref(), Some("new@example.com"));
    }

    #[test]
    fn test_account_response_has_no_hash_field() {
        let account = AccountResponse {
            id: 1,
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            role: Role::Student,
            is_active: true,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&account).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "student");
    }
}
