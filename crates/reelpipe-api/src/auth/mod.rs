//! Bearer-token authentication
//!
//! Tokens are HS256 JWTs signed with `JWT_SECRET` whose `sub` claim is the
//! user id. [`middleware::auth_middleware`] validates the token and stores a
//! [`models::UserContext`] in the request extensions for handlers to extract.

pub mod jwt;
pub mod middleware;
pub mod models;

pub use jwt::JwtService;
pub use models::{JwtClaims, UserContext};
