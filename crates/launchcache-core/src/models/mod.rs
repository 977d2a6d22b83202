//! Data models for launch listings.
//!
//! This module contains the data structures returned by the launch listing
//! API and stored by the cache tiers:
//!
//! - `Launch`: one upcoming launch with its window, rocket and missions
//! - `Location`, `Pad`: launch site coordinates
//! - `Rocket`, `Mission`, `Agency`: descriptive details
//! - `LaunchResponse`: the wire envelope around a launch list

pub mod launch;

pub use launch::{Agency, Launch, LaunchResponse, Location, Mission, Pad, Rocket};

/// An ordered list of launches stored under one cache key.
pub type Dataset = Vec<Launch>;
