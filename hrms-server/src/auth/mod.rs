//! Authentication and authorization
//!
//! - [`TokenService`]: token issuance and verification
//! - [`require_auth`]: access guard middleware, yields [`CurrentUser`]
//! - [`policy`]: role predicates
//! - [`password`]: bcrypt hashing

pub mod guard;
pub mod jwt;
pub mod password;
pub mod policy;

pub use guard::{CurrentUser, require_auth};
pub use jwt::{Claims, TokenError, TokenService};
