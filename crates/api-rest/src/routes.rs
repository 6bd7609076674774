//! HTTP route handlers.
//!
//! This module organizes all API endpoints by resource.

pub mod docs;
pub mod health;
pub mod todos;
