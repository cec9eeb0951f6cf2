//! HTTP client module
//!
//! Provides the reqwest-backed transport used to post registrations.
//!
//! # Features
//!
//! - **Form posts**: url-encoded bodies, raw text responses
//! - **Connection retries**: configurable backoff, never resending a
//!   request the gateway may already have received
//! - **Status classification**: non-success statuses become errors

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
