//! # Reusable Widgets

pub mod media;
pub mod nav_bar;
pub mod notifications;
