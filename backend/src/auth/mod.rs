//! Authentication and authorization
//!
//! bcrypt password hashing, HS256 bearer tokens, request extractors that
//! resolve a token to a live account, and the role checks applied on top.

mod jwt;
mod middleware;
mod password;
mod policy;

pub use jwt::{Claims, JwtKeys, TokenError, TokenIdentity, TokenService};
pub use middleware::{bearer_token, AdminAccount, CurrentAccount};
pub use password::{
    truncate_password, CredentialHasher, HashBackend, HashError, MAX_BCRYPT_COST,
    MAX_PASSWORD_BYTES, MIN_BCRYPT_COST,
};
pub use policy::AccessPolicy;
