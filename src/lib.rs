//! Rust client for the VertexSMS HTTP API.
//!
//! The crate has three small layers: a domain layer with the message fields and value
//! helpers, a transport layer for the JSON wire format, and a client layer that posts
//! the message and hands back the raw response.
//!
//! ```rust,no_run
//! use vertexsms::{Sender, TestMode};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), vertexsms::VertexSmsError> {
//!     let mut sender = Sender::new("...");
//!     sender
//!         .set_to("37088888888")
//!         .set_from("TestSender")
//!         .set_message("This is test message")
//!         .set_test_mode(TestMode::Success);
//!     let response = sender.send().await?;
//!     println!("{}", response.text());
//!     Ok(())
//! }
//! ```
//!
//! Enable the `blocking` feature for [`client::blocking::Sender`], which has the same
//! surface without an async runtime.
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    DEFAULT_ENDPOINT, DEFAULT_TIMEOUT, Sender, SenderBuilder, TransportErrorKind,
    TransportFailure, VertexSmsError,
};
pub use domain::{ApiToken, Coding, Message, Priority, RawResponse, TestMode, ValidationError};
