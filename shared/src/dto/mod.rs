//! # Data Transfer Objects (DTOs)
//!
//! This module contains all data structures used for communication between
//! the studio client and the backend via the REST API.
//!
//! ## Module Organization
//!
//! - [`template`] - Swap templates and media kinds
//! - [`swap`] - Swap task creation, uploads and status polling
//! - [`balance`] - Gem balance
//! - [`payment`] - Hosted checkout sessions, provider orders and verification
//! - [`error`] - Backend error bodies
//!
//! ## Example JSON Communication
//!
//! ```text
//! POST /api/v1/swaps/
//! Authorization: Bearer eyJhbGciOi...
//! Content-Type: application/json
//!
//! {
//!   "type": "IMAGE",
//!   "source_url": "/static/uploads/face.png",
//!   "template_url": "https://cdn.example.com/viking.png"
//! }
//! ```
//!
//! ```text
//! HTTP/1.1 200 OK
//! Content-Type: application/json
//!
//! {
//!   "id": 42,
//!   "type": "IMAGE",
//!   "status": "PENDING",
//!   "source_url": "/static/uploads/face.png",
//!   "template_url": "https://cdn.example.com/viking.png",
//!   "result_url": null,
//!   "created_at": "2025-01-01T00:00:00"
//! }
//! ```

pub mod balance;
pub mod error;
pub mod payment;
pub mod swap;
pub mod template;

pub use balance::*;
pub use error::*;
pub use payment::*;
pub use swap::*;
pub use template::*;
