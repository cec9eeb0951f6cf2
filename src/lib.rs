//! # Sage Pay Gateway Client
//!
//! Builds transaction registrations for the Sage Pay server protocol, posts
//! them to the gateway and decodes the `KEY=value` bodies it sends back.
//!
//! ## Features
//!
//! - **Response Decoding**: Line-oriented `KEY=value` bodies into a typed [`Response`]
//! - **Translation Tables**: Gateway spellings mapped to canonical symbols
//! - **Status Gating**: Sensitive attributes only readable when the status is OK
//! - **Registrations**: Layered defaults, validation and form encoding
//! - **HTTP Transport**: Timeouts and retry with backoff on connection failures
//!
//! ## Quick Start
//!
//! ```rust
//! use sagepay_client::{decode, Status};
//!
//! let response = decode("VPSProtocol=3.00\r\nStatus=OK\r\nTxAuthNo=4\r\n");
//! assert_eq!(response.status(), Some(Status::Ok));
//! assert_eq!(response.tx_auth_no().unwrap(), Some("4"));
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   to_form()   ┌─────────────┐   body   ┌─────────────────┐
//! │  Registrar   │ ────────────▶ │  Transport  │ ───────▶ │ ResponseDecoder │
//! │ defaults +   │               │ HttpClient  │          │ tables + gating │
//! │ options      │               │ (retry)     │          │ ─▶ Response     │
//! └──────────────┘               └─────────────┘          └─────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
// Allow common clippy pedantic lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types shared across modules
pub mod types;

/// Decoded gateway responses and their attribute vocabulary
pub mod response;

/// `KEY=value` body decoding and translation tables
pub mod decode;

/// Transaction registration builder
pub mod registration;

/// HTTP client with retry
pub mod http;

/// Registration round-trip over a transport
pub mod gateway;

/// Gateway configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result, ResultExt};
pub use types::*;

// Re-export commonly used types
pub use config::{load_config, load_config_from_str, GatewayConfig};
pub use decode::{decode, DecoderConfig, ResponseDecoder};
pub use gateway::{GatewayClient, Transport};
pub use registration::{Address, Registrar, RegistrationOptions, TransactionRegistration};
pub use response::{Response, Status};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
