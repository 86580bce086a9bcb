//! HTTP transport layer

pub mod client;

pub use client::{HttpClient, HttpClientBuilder};
pub(crate) use client::decode_json;
