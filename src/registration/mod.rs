//! Registration request module
//!
//! # Overview
//!
//! Builds the outbound request that starts a transaction with the
//! gateway. Caller options are layered over configured defaults, a
//! random vendor transaction code is generated when none is given, and
//! the result is validated before it can be posted.

mod builder;
mod types;

pub use builder::{Registrar, TransactionRegistration, DEFAULT_PROTOCOL_VERSION};
pub use types::{Address, RegistrationOptions, TransactionCode};
