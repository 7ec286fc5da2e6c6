//! Envelope codec module
//!
//! Turns option values into request payloads and response bodies into typed values.
//!
//! # Overview
//!
//! Option types describe their own wire shape instead of relying on reflection:
//! - [`BodyOptions`] lists body fields (with required markers) for create/update calls
//! - [`QueryOptions`] lists query parameters for listing filters
//!
//! [`build_body`] and [`build_query`] validate and serialize those field lists,
//! and [`decode_into`] maps a JSON envelope (optionally wrapped in a root key)
//! onto a serde type. [`Timestamp`] handles the loosely typed time fields the
//! services return.

mod builders;
mod decoders;
mod time;
mod types;

pub use builders::{build_body, build_query, BodyFields, QueryFields};
pub use decoders::{decode_into, decode_value, parse_json};
pub use time::Timestamp;
pub use types::{BodyOptions, FieldValue, QueryOptions};
