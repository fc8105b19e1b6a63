//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the studio client and the face swap
//! backend API. All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::template`]**: Swap templates and the [`MediaKind`] discriminant
//!   - **[`dto::swap`]**: Swap tasks, uploads and task status
//!   - **[`dto::balance`]**: Gem balance lookups
//!   - **[`dto::payment`]**: Checkout sessions, orders and payment verification
//!   - **[`dto::error`]**: Error bodies returned by the backend
//! - **[`utils`]**: Shared utility functions
//!   - **[`utils::backend_origin`]**: Derive the media origin from an API base URL
//!   - **[`utils::absolute_media_url`]**: Resolve relative result paths
//!
//! ## Wire Format
//!
//! - Field names are **snake_case** in both Rust and JSON
//! - Media kinds and task statuses are **UPPERCASE** strings (`"IMAGE"`, `"COMPLETED"`)
//! - Optional fields are omitted from JSON when `None`
//!
//! ## Usage in the Client
//!
//! ```rust,no_run
//! use shared::dto::template::{MediaKind, Template};
//!
//! let body = r#"{"id":1,"title":"Viking","type":"IMAGE","thumbnail":"/t.png","cost":1}"#;
//! let template: Template = serde_json::from_str(body).unwrap();
//! assert_eq!(template.kind, MediaKind::Image);
//! ```

pub mod dto;
pub mod utils;

// Wildcard re-exports: shared is a DTO library where all exports are public API
pub use dto::*;
pub use utils::*;
