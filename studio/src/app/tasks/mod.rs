//! # Async Tasks
//!
//! Background tasks that call the backend and report back through the
//! [`crate::app::AppEvent`] channel.

pub mod catalog;
pub mod checkout;
pub mod history;
pub mod swap;
