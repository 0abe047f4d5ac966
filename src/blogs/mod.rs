//! Blogs module
//!
//! Blog record models and their SQLite-backed storage.

pub mod db;
pub mod models;

pub use db::BlogDb;
pub use models::{Blog, BlogChanges, BlogId, NewBlog};
