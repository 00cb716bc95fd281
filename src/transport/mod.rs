//! Transport layer: wire-format details (key casing, body encoding/decoding, error bodies).

mod body;
mod case;
mod error_body;

pub use body::{DecodeError, KeyCase, decode_success_body, encode_body};
pub use case::{from_wire, to_wire};
pub use error_body::{BodyReadError, decode_error_body};
