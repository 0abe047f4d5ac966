//! Blog List Backend Library
//!
//! This library exposes modules for testing and external use.
//! The main binary is in `src/main.rs`.

pub mod api;
pub mod blogs;
pub mod config;
pub mod error;
pub mod list_helper;
/// Application state management
///
/// Holds the blog store shared by request handlers.
pub mod state;
