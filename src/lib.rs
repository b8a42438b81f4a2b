//! User Registry - A minimal user-registration API
//!
//! Receives a user record, hashes its password, persists it with
//! storage-enforced uniqueness on username and email, and lists all
//! registered users.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities (user record, password digest)
//! - **services**: The user registry use cases
//! - **infra**: Infrastructure concerns (database, repositories)
//! - **api**: HTTP handlers and routes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{NewUser, Password, User, UserResponse};
pub use errors::{AppError, AppResult};
