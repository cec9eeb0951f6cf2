//! Response decoder module
//!
//! # Overview
//!
//! The gateway replies with one `KEY=value` pair per line. The decoder
//! splits each line on its first `=`, maps the raw key to a canonical
//! [`Field`](crate::response::Field), and for enumerated fields maps the
//! raw value through that field's table. Later duplicates overwrite
//! earlier ones.

mod decoders;
mod tables;
mod types;

pub use decoders::{decode, ResponseDecoder};
pub use tables::{field_for, translate, Translation};
pub use types::DecoderConfig;
