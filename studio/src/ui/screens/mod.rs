//! # Screens
//!
//! One module per [`crate::app::Screen`].

pub mod buy_gems;
pub mod gallery;
pub mod history;
pub mod sign_in;
pub mod swap;
