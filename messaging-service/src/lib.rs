//! # Messaging Service
//!
//! Generated bindings for the `example.MessagingService` contract.
//!
//! The contract is owned by the remote service; this crate only compiles it. It exposes
//! the typed client stub driven by `messenger` and the server-side trait that test
//! doubles implement.

pub mod pb {
    include!(concat!(env!("OUT_DIR"), "/example.rs"));
}

pub use pb::messaging_service_client::MessagingServiceClient;
pub use pb::messaging_service_server::{MessagingService, MessagingServiceServer};
pub use pb::{MessageRequest, MessageResponse, StreamRequest, StreamResponse};

/// Encoded `FileDescriptorSet` of `proto/messaging.proto`.
pub const FILE_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("descriptors");
