//! Authentication primitives: access-token validation.

pub mod jwt;
