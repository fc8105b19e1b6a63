//! # Event Handlers
//!
//! User action handlers organized by domain for better modularity and testability.

pub mod checkout;
pub mod navigation;
pub mod session;
pub mod swap;
