//! Command implementations for Pax Construct CLI

pub mod completions;
pub mod create_bundle;
pub mod provision;
pub mod remove_bundle;
pub mod version;
