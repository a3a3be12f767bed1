//! Lincast - Unix tools for posting to LinkedIn
//!
//! This library provides core functionality for resolving the
//! authenticated member's identity and publishing short text posts
//! through LinkedIn's versioned REST API.

pub mod client;
pub mod config;
pub mod error;
pub mod identity;
pub mod logging;
pub mod publisher;
pub mod service;
pub mod types;

// Re-export commonly used types
pub use client::LinkedInClient;
pub use config::Config;
pub use error::{ApiError, LincastError, Result};
pub use identity::{IdentityCache, IdentityResolver};
pub use publisher::PostPublisher;
pub use types::{Credential, Identity, PublishReceipt};
