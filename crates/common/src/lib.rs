//! Shared types used across the Batcomputer crates.

pub mod types;

pub use types::RecordId;
