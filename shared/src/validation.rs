//! Input validation functions
//!
//! Plain field checks shared by every endpoint that accepts user input.
//! Each returns a human-readable message on failure.

use validator::ValidateEmail;

/// Shortest accepted password, in characters
pub const MIN_PASSWORD_CHARS: usize = 6;
/// Longest accepted password, in characters
pub const MAX_PASSWORD_CHARS: usize = 72;
pub const MAX_USERNAME_CHARS: usize = 50;
pub const MAX_NAME_CHARS: usize = 255;

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    if email.len() > 255 {
        return Err("Email too long".to_string());
    }
    if !email.validate_email() {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

/// Validate password length
///
/// Lengths are counted in characters. Hashing separately truncates at
/// 72 bytes, so multi-byte passwords near the upper bound are not fully
/// distinguished.
pub fn validate_password(password: &str) -> Result<(), String> {
    let chars = password.chars().count();
    if chars < MIN_PASSWORD_CHARS {
        return Err(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_CHARS
        ));
    }
    if chars > MAX_PASSWORD_CHARS {
        return Err(format!(
            "Password must be at most {} characters",
            MAX_PASSWORD_CHARS
        ));
    }
    Ok(())
}

/// Validate username: 1-50 characters of letters, digits, `_`, `.` or `-`
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username cannot be empty".to_string());
    }
    if username.chars().count() > MAX_USERNAME_CHARS {
        return Err("Username too long".to_string());
    }
    let pattern = regex_lite::Regex::new(r"^[A-Za-z0-9_.\-]+$").expect("static regex");
    if !pattern.is_match(username) {
        return Err(
            "Username may only contain letters, digits, '_', '.' and '-'".to_string(),
        );
    }
    Ok(())
}

/// Validate a display name (student, faculty, course)
pub fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Name cannot be empty".to_string());
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err("Name too long".to_string());
    }
    Ok(())
}

/// Validate course credits
pub fn validate_credits(credits: i32) -> Result<(), String> {
    if credits < 1 {
        return Err("Credits must be positive".to_string());
    }
    if credits > 30 {
        return Err("Credits must be at most 30".to_string());
    }
    Ok(())
}
