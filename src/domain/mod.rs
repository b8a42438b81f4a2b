//! Domain layer - Core business entities and logic
//!
//! Contains the user record and the password value object, independent
//! of infrastructure concerns.

pub mod password;
pub mod user;

pub use password::{HashSettings, Password};
pub use user::{NewUser, User, UserResponse};
