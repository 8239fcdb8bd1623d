//! # Call Driver
//!
//! Performs the four call shapes of `example.MessagingService` against a single stub,
//! strictly one after the other, and writes what comes back to an output sink.
//!
//! ## Transcript
//!
//! ```text
//! Unary response: <response>
//! Server Streaming...
//! <message>            (one line per streamed item)
//! Client Streaming...
//! Client Stream response: <response>
//! Bidirectional Streaming...
//! <response>           (one line per received item)
//! ```
//!
//! ## Outbound streams
//!
//! Client-originated messages are handed to `tonic` as a lazy, finite [`Stream`]. The
//! transport drains it while the call is in flight; once it is exhausted the send half
//! is closed, which is what tells the server to answer a client-streaming call.
//!
//! ## Errors
//!
//! A non-OK status, either returned up front or delivered in the middle of a response
//! stream, fails the call with [`CallError::Rpc`]. Nothing is retried.
use crate::{
    BoxError,
    client::{ClientConnectError, connect},
};
use futures_util::Stream;
use http_body::Body as HttpBody;
use messaging_service::{MessageRequest, MessagingServiceClient, StreamRequest};
use std::{fmt, io::Write};
use tokio_stream::StreamExt;
use tonic::{client::GrpcService, transport::Channel};

/// The call being performed when something went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallShape {
    Unary,
    ServerStreaming,
    ClientStreaming,
    BidirectionalStreaming,
}

impl fmt::Display for CallShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CallShape::Unary => "Unary",
            CallShape::ServerStreaming => "Server streaming",
            CallShape::ClientStreaming => "Client streaming",
            CallShape::BidirectionalStreaming => "Bidirectional streaming",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CallError {
    #[error(
        "{call} call failed: code={code:?} message={message:?}",
        code = .status.code(),
        message = .status.message()
    )]
    Rpc {
        call: CallShape,
        #[source]
        status: tonic::Status,
    },
    #[error("Failed to write output: '{0}'")]
    Output(#[from] std::io::Error),
}

impl CallError {
    fn rpc(call: CallShape) -> impl FnOnce(tonic::Status) -> Self {
        move |status| {
            tracing::warn!(%call, code = ?status.code(), "call failed");
            CallError::Rpc { call, status }
        }
    }

    /// The call that failed, if the failure came from the server or the transport.
    pub fn call(&self) -> Option<CallShape> {
        match self {
            CallError::Rpc { call, .. } => Some(*call),
            CallError::Output(_) => None,
        }
    }
}

/// The literal payloads sent by each call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallScript {
    pub unary_message: String,
    pub stream_prefix: String,
    pub client_stream_messages: Vec<String>,
    pub bidirectional_messages: Vec<String>,
}

impl Default for CallScript {
    fn default() -> Self {
        Self {
            unary_message: "World".to_string(),
            stream_prefix: "Message".to_string(),
            client_stream_messages: to_strings(&["Hello", "from", "Python", "client"]),
            bidirectional_messages: to_strings(&[
                "Hello",
                "this",
                "is",
                "bidirectional",
                "streaming",
            ]),
        }
    }
}

fn to_strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

/// Drives the four call shapes against one stub, writing the transcript to `out`.
pub struct CallDriver<S, W> {
    client: MessagingServiceClient<S>,
    script: CallScript,
    out: W,
}

impl<W: Write> CallDriver<Channel, W> {
    /// Connects to `addr` and builds a driver using the default [`CallScript`].
    pub async fn connect(addr: &str, out: W) -> Result<Self, ClientConnectError> {
        let client = connect(addr).await?;
        Ok(Self::new(client, out))
    }
}

impl<S, W> CallDriver<S, W>
where
    S: GrpcService<tonic::body::Body>,
    S::Error: Into<BoxError>,
    S::ResponseBody: HttpBody<Data = tonic::codegen::Bytes> + Send + 'static,
    <S::ResponseBody as HttpBody>::Error: Into<BoxError> + Send,
    W: Write,
{
    pub fn new(client: MessagingServiceClient<S>, out: W) -> Self {
        Self::with_script(client, CallScript::default(), out)
    }

    pub fn with_script(client: MessagingServiceClient<S>, script: CallScript, out: W) -> Self {
        Self {
            client,
            script,
            out,
        }
    }

    /// Consumes the driver, releasing the stub, and hands back the output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Runs the four calls in order, stopping at the first failure.
    pub async fn run_all(&mut self) -> Result<(), CallError> {
        self.send_message().await?;
        self.stream_messages().await?;
        self.stream_client_messages().await?;
        self.bidirectional_stream().await?;
        self.out.flush()?;
        Ok(())
    }

    /// Unary: sends one `MessageRequest` and prints the single response.
    pub async fn send_message(&mut self) -> Result<(), CallError> {
        tracing::info!(call = %CallShape::Unary, "starting call");

        let request = MessageRequest {
            message: self.script.unary_message.clone(),
        };

        let response = self
            .client
            .send_message(request)
            .await
            .map_err(CallError::rpc(CallShape::Unary))?
            .into_inner();

        writeln!(self.out, "Unary response: {}", response.response)?;
        Ok(())
    }

    /// Server streaming: sends one `StreamRequest` and prints every streamed `message`
    /// in delivery order, until the server closes the stream.
    pub async fn stream_messages(&mut self) -> Result<(), CallError> {
        tracing::info!(call = %CallShape::ServerStreaming, "starting call");
        writeln!(self.out, "Server Streaming...")?;

        let request = StreamRequest {
            prefix: self.script.stream_prefix.clone(),
        };

        let mut stream = self
            .client
            .stream_messages(request)
            .await
            .map_err(CallError::rpc(CallShape::ServerStreaming))?
            .into_inner();

        let mut received = 0usize;
        while let Some(item) = stream
            .message()
            .await
            .map_err(CallError::rpc(CallShape::ServerStreaming))?
        {
            received += 1;
            writeln!(self.out, "{}", item.message)?;
        }

        tracing::info!(call = %CallShape::ServerStreaming, received, "stream closed");
        Ok(())
    }

    /// Client streaming: streams the scripted messages, half-closes, then prints the
    /// single response the server sends back.
    pub async fn stream_client_messages(&mut self) -> Result<(), CallError> {
        tracing::info!(call = %CallShape::ClientStreaming, "starting call");
        writeln!(self.out, "Client Streaming...")?;

        let outbound = message_stream(self.script.client_stream_messages.clone());

        let response = self
            .client
            .stream_client_messages(outbound)
            .await
            .map_err(CallError::rpc(CallShape::ClientStreaming))?
            .into_inner();

        writeln!(self.out, "Client Stream response: {}", response.response)?;
        Ok(())
    }

    /// Bidirectional streaming: streams the scripted messages while printing every
    /// response as it arrives, until the server closes its side.
    pub async fn bidirectional_stream(&mut self) -> Result<(), CallError> {
        tracing::info!(call = %CallShape::BidirectionalStreaming, "starting call");
        writeln!(self.out, "Bidirectional Streaming...")?;

        let outbound = message_stream(self.script.bidirectional_messages.clone());

        let mut inbound = self
            .client
            .bidirectional_stream(outbound)
            .await
            .map_err(CallError::rpc(CallShape::BidirectionalStreaming))?
            .into_inner();

        let mut received = 0usize;
        while let Some(item) = inbound
            .message()
            .await
            .map_err(CallError::rpc(CallShape::BidirectionalStreaming))?
        {
            received += 1;
            writeln!(self.out, "{}", item.response)?;
        }

        tracing::info!(call = %CallShape::BidirectionalStreaming, received, "stream closed");
        Ok(())
    }
}

/// Turns an ordered list of payloads into a lazy stream of requests.
/// The stream ends after the last item, which half-closes the send side of the call.
fn message_stream(messages: Vec<String>) -> impl Stream<Item = MessageRequest> + Send + 'static {
    tokio_stream::iter(messages).map(|message| {
        tracing::debug!(%message, "sending");
        MessageRequest { message }
    })
}
