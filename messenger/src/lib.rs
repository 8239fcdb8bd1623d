//! # Messenger
//!
//! A small client that exercises the four gRPC call shapes of an `example.MessagingService`
//! (unary, server streaming, client streaming and bidirectional streaming) and prints
//! what the server answers.
//!
//! ## Key Components
//!
//! * **[`connect`]:** Opens a plaintext HTTP/2 channel and builds the typed stub.
//! * **[`CallDriver`]:** Owns the stub and an output sink, and performs the calls one after
//!   the other, writing a line-oriented transcript of the responses.
//!
//! All framing, flow control and stream multiplexing are left to `tonic`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use messenger::{CallDriver, DEFAULT_URL};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let mut driver = CallDriver::connect(DEFAULT_URL, std::io::stdout()).await?;
//! driver.run_all().await?;
//! # Ok(())
//! # }
//! ```
pub mod client;
pub mod driver;

pub use client::{ClientConnectError, DEFAULT_URL, connect};
pub use driver::{CallDriver, CallError, CallScript, CallShape};

// Re-exports
pub use messaging_service;
pub use tonic;

/// Type alias for the standard boxed error used in generic bounds.
type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
