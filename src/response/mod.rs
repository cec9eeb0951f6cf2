//! Decoded response module
//!
//! # Overview
//!
//! A [`Response`] is the typed result of decoding one gateway reply.
//! Status, status detail and protocol version are always readable.
//! Authorisation codes, 3-D Secure parameters and the AVS/CV2 checks are
//! only meaningful on a successful transaction, so reading them while
//! the status is anything but OK fails with
//! [`Error::AccessDenied`](crate::Error::AccessDenied).

mod decoded;
mod types;

pub use decoded::Response;
pub use types::{
    Attributes, AvsCv2Result, Field, FieldValue, MatchResult, Status, ThreeDSecureStatus,
};
