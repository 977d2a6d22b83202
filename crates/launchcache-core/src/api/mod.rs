//! REST API client module for the launch listing service.
//!
//! This module provides the `ApiClient` for fetching the next upcoming
//! launches, and the `LaunchSource` trait the orchestrator depends on so
//! the transport can be swapped out.

pub mod client;
pub mod error;

pub use client::{ApiClient, LaunchSource};
pub use error::ApiError;
