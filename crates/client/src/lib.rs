//! # Tigris Client
//!
//! HTTP client for the Tigris HR portal: reverse-engineered session
//! handling plus leave-calendar retrieval.
//!
//! This crate contains:
//! - The login → index → SSO-activation chain ([`SessionAuthenticator`])
//! - The calendar search and payload normalization ([`CalendarFetcher`])
//! - A thin facade over both ([`TigrisClient`])
//!
//! ## Architecture
//! - Domain types live in `tigris-domain`
//! - All I/O goes through one redirect-disabled [`HttpClient`]
//! - No ambient cookie state: the [`Session`] carries every token

pub mod auth;
pub mod calendar;
pub mod client;
pub mod config;
pub mod errors;
pub mod http;
pub mod time;

// Re-export commonly used items
pub use auth::SessionAuthenticator;
pub use calendar::CalendarFetcher;
pub use client::TigrisClient;
pub use config::ClientConfig;
pub use http::HttpClient;
pub use tigris_domain::{CalendarEvent, PersonInfo, Result, Session, TigrisError};
