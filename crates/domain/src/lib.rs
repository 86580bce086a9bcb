//! # Tigris Domain
//!
//! Business domain types for the Tigris HR portal client.
//!
//! This crate contains:
//! - Session and calendar event types
//! - Error types and Result definitions
//! - Wire-protocol constants shared across the workspace
//!
//! ## Architecture
//! - No dependencies on other Tigris crates
//! - No I/O dependencies (reqwest et al. live in `tigris-client`)
//! - Pure domain models and data structures

pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use errors::*;
pub use types::*;
