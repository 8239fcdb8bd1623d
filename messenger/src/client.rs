//! # Connection
//!
//! Builds the typed `MessagingService` stub on top of a `tonic` channel.
//!
//! The channel is plaintext (`http://`) and is closed when the last stub holding it
//! is dropped.
use messaging_service::MessagingServiceClient;
use tonic::transport::{Channel, Endpoint};

/// Address used when none is provided.
pub const DEFAULT_URL: &str = "http://localhost:9000";

/// Errors that can occur when connecting to a gRPC server.
#[derive(Debug, thiserror::Error)]
pub enum ClientConnectError {
    #[error("Invalid URL '{0}': {1}")]
    InvalidUrl(String, #[source] tonic::transport::Error),
    #[error("Failed to connect to '{0}': {1}")]
    ConnectionFailed(String, #[source] tonic::transport::Error),
}

/// Connects to a gRPC server and returns a stub for `example.MessagingService`.
///
/// # Arguments
///
/// * `addr` - The server URI (e.g., `http://localhost:9000`).
///
/// # Returns
///
/// * `Ok(MessagingServiceClient)` - The connected stub.
/// * `Err(ClientConnectError)` - If the URL is invalid or connection fails.
pub async fn connect(addr: &str) -> Result<MessagingServiceClient<Channel>, ClientConnectError> {
    let endpoint = Endpoint::new(addr.to_string())
        .map_err(|e| ClientConnectError::InvalidUrl(addr.to_string(), e))?;

    tracing::debug!(addr, "connecting");

    let channel = endpoint
        .connect()
        .await
        .map_err(|e| ClientConnectError::ConnectionFailed(addr.to_string(), e))?;

    tracing::info!(addr, "connected");

    Ok(MessagingServiceClient::new(channel))
}
