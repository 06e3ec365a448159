//! Closed domain values for the course enrollment application
//!
//! Roles and grades travel as lowercase/letter strings on the wire and in the
//! database, but are always handled as enums in code so every access decision
//! is an exhaustive match.

use crate::errors::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Roles
// ============================================================================

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Faculty,
    Student,
}

impl Role {
    /// All roles, in decreasing order of privilege
    pub const ALL: [Role; 3] = [Role::Admin, Role::Faculty, Role::Student];

    /// Wire and storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Faculty => "faculty",
            Role::Student => "student",
        }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        match self {
            Role::Admin => true,
            Role::Faculty | Role::Student => false,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "faculty" => Ok(Role::Faculty),
            "student" => Ok(Role::Student),
            _ => Err(ModelError::UnknownRole(s.to_string())),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ============================================================================
// Grades
// ============================================================================

/// Letter grade assigned to an enrollment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "F")]
    F,
}

impl Grade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::AMinus => "A-",
            Grade::B => "B",
            Grade::BMinus => "B-",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Grade {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" => Ok(Grade::A),
            "A-" => Ok(Grade::AMinus),
            "B" => Ok(Grade::B),
            "B-" => Ok(Grade::BMinus),
            "C" => Ok(Grade::C),
            "D" => Ok(Grade::D),
            "F" => Ok(Grade::F),
            other => Err(ModelError::UnknownGrade(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("admin", Role::Admin)]
    #[case("faculty", Role::Faculty)]
    #[case("student", Role::Student)]
    fn test_role_parses_lowercase(#[case] raw: &str, #[case] expected: Role) {
        assert_eq!(raw.parse::<Role>().unwrap(), expected);
        assert_eq!(expected.to_string(), raw);
    }

    #[test]
    fn test_role_is_case_sensitive() {
        assert_eq!(
            "Admin".parse::<Role>(),
            Err(ModelError::UnknownRole("Admin".to_string()))
        );
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serde_uses_lowercase() {
        let json = serde_json::to_string(&Role::Faculty).unwrap();
        assert_eq!(json, "\"faculty\"");
        let role: Role = serde_json::from_str("\"student\"").unwrap();
        assert_eq!(role, Role::Student);
        assert!(serde_json::from_str::<Role>("\"superuser\"").is_err());
    }

    #[test]
    fn test_only_admin_is_admin() {
        let admins: Vec<Role> = Role::ALL.into_iter().filter(Role::is_admin).collect();
        assert_eq!(admins, vec![Role::Admin]);
    }

    #[test]
    fn test_grade_wire_format() {
        let grade: Grade = serde_json::from_str("\"B-\"").unwrap();
        assert_eq!(grade, Grade::BMinus);
        assert_eq!(serde_json::to_string(&Grade::AMinus).unwrap(), "\"A-\"");
        assert!(serde_json::from_str::<Grade>("\"E\"").is_err());
    }

    #[test]
    fn test_grade_from_str_trims() {
        assert_eq!(" A- ".parse::<Grade>().unwrap(), Grade::AMinus);
        assert!("A+".parse::<Grade>().is_err());
    }
}
