//! # Backend API Client Module
//!
//! HTTP client for the face swap backend. Every path lives under the
//! configured base URL (default `http://localhost:8000/api/v1`).
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs        - Module exports and documentation
//! ├── client.rs     - ApiClient struct, request helpers, ApiService impl
//! ├── templates.rs  - Template catalog (list, get)
//! ├── users.rs      - Gem balance
//! ├── swaps.rs      - Upload, create, status, history
//! └── payments.rs   - Checkout session, provider order, verification
//! ```

pub mod client;
pub mod payments;
pub mod swaps;
pub mod templates;
pub mod users;

#[cfg(test)]
pub(crate) mod stub;

pub use client::{describe_error_body, ApiClient};
