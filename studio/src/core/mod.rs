//! # Core Abstractions
//!
//! Core traits and error types for dependency injection and better testability.
//!
//! - **[`error`]**: Application error types (`AppError`, `Result<T>`)
//! - **[`service`]**: Service traits for dependency injection (`ApiService`)
//!
//! ## Dependency Injection
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use studio::core::service::ApiService;
//! use studio::services::api::ApiClient;
//!
//! // In production: the HTTP client
//! let api: Arc<dyn ApiService> = Arc::new(ApiClient::new("http://localhost:8000/api/v1"));
//! ```

pub mod error;
pub mod service;

pub use error::{AppError, Result};
pub use service::ApiService;
