//! Typed Rust client for the Textfully HTTP API.
//!
//! The crate is split into a domain layer of plain types, a transport layer
//! for wire-format details (snake_case keys, error bodies), and a small client
//! layer that issues one HTTP exchange per call.
//!
//! Calls never return `Err`: every outcome is an [`ApiResult`] holding either
//! data or an [`ErrorInfo`].
//!
//! ```rust,no_run
//! use textfully::{ApiKey, SendMessage, TextfullyClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), textfully::TextfullyError> {
//!     let client = TextfullyClient::new(ApiKey::from_env()?)?;
//!     let result = client
//!         .send(&SendMessage::new("+16175555555", "Hello from Rust!"))
//!         .await;
//!     match result.into_result() {
//!         Ok(sent) => println!("sent {} at {}", sent.id, sent.sent_at),
//!         Err(err) => eprintln!("{}: {}", err.name, err.message),
//!     }
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{ClientConfig, TextfullyClient, TextfullyClientBuilder, TextfullyError};
pub use domain::{
    ApiKey, ApiResult, ErrorInfo, ErrorName, HttpMethod, KnownErrorName, OutgoingRequest,
    PhoneNumber, RequestOptions, SendMessage, SendMessageResponse, ValidationError,
};
pub use reqwest::header;
pub use transport::{from_wire, to_wire};
