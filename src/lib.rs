//! # AddressGuard Client
//! Asynchronous wrapper around the Mailgun address validation HTTP API. Given one address or a batch of candidate strings, the service checks syntax, DNS resolvability, and provider-specific (ESP) local-part rules; this crate sends the request and hands back typed verdicts through [`Client`] and [`ClientBuilder`].
//!
//! ## Audience and uses
//! For Rust services that want to catch mistyped or undeliverable addresses at signup or import time: validate a single address with [`Client::validate`] (returning a [`ValidationResult`]) or split a pasted list with [`Client::parse`] (returning a [`ParseResult`]).
//!
//! ## Runtime requirements
//! Async-only; run inside a Tokio (v1) runtime. HTTP calls use `reqwest`. A [`Client`] can be shared between tasks; requests made through it are independent and each performs exactly one round trip.
//!
//! ## Out of scope
//! The validation rules themselves run server-side and are opaque here. There are no retries and nothing is cached or persisted.
//!
//! ## Errors
//! Bad input is rejected locally as [`Error::InvalidArgument`] before any request. A rejected API key is [`Error::InvalidCredential`]; other non-200 answers are [`Error::UnknownService`] with the status and body attached. Failures to get any response at all are [`Error::Transport`], and a malformed 200 body is [`Error::Decode`]. The crate-wide [`Result`] alias wraps these errors.
//!
//! ## Logging
//! Requests and response statuses are emitted as `tracing` events at `debug` level. The API key and address contents are never logged.
//!
//! ## Example
//! ```no_run
//! use addressguard_client::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), addressguard_client::Error> {
//!     let mut client = Client::new("pubkey-0123456789")?;
//!
//!     let result = client.validate("johnsmith@gmail.com").await?;
//!     println!("valid: {}", result.is_valid);
//!
//!     let batch = client
//!         .parse(["johnsmith@gmail.com", "john@gmail.com", "gmail.com"], false)
//!         .await?;
//!     println!("parsed: {:?}, unparseable: {:?}", batch.parsed, batch.unparseable);
//!
//!     client.close();
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod models;

pub use client::{Client, ClientBuilder, MAX_ADDRESS_LEN, MAX_BATCH_LEN};
pub use error::{ArgumentError, Error};
pub use models::{AddressParts, ParseResult, ValidationResult};

/// Result type alias for address validation operations.
///
/// This is equivalent to `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
