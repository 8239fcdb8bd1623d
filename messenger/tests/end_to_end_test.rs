use messaging_service::MessagingServiceServer;
use messaging_service_impl::MessagingServiceImpl;
use messenger::{CallDriver, CallShape, ClientConnectError};
use tonic::transport::Server;


const ECHO_TRANSCRIPT: &str = "Unary response: Echo: World
Server Streaming...
Echo: Message 0
Echo: Message 1
Echo: Message 2
Client Streaming...
Client Stream response: Echo: Hello from Python client
Bidirectional Streaming...
Ack: Hello
Ack: this
Ack: is
Ack: bidirectional
Ack: streaming
";

async fn spawn_server(service: MessagingServiceImpl) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();

    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        Server::builder()
            .add_service(MessagingServiceServer::new(service))
            .serve_with_incoming(tokio_stream::wrappers::TcpListenerStream::new(listener))
            .await
            .unwrap();
    });

    format!("http://{}", addr)
}

async fn run_once(url: &str) -> String {
    let mut driver = CallDriver::connect(url, Vec::new()).await.unwrap();
    driver.run_all().await.unwrap();
    String::from_utf8(driver.into_output()).unwrap()
}

#[tokio::test]
async fn test_full_sequence_over_tcp() {
    let service = MessagingServiceImpl::echo();
    let url = spawn_server(service.clone()).await;

    assert_eq!(run_once(&url).await, ECHO_TRANSCRIPT);
}

#[tokio::test]
async fn test_fresh_connections_produce_identical_runs() {
    let service = MessagingServiceImpl::echo();
    let url = spawn_server(service.clone()).await;

    let first = run_once(&url).await;
    let second = run_once(&url).await;

    assert_eq!(first, ECHO_TRANSCRIPT);
    assert_eq!(second, first);

    let observed = service.observed();
    assert_eq!(observed.unary, vec!["World", "World"]);
    assert_eq!(observed.prefixes, vec!["Message", "Message"]);
    assert_eq!(
        observed.client_stream,
        vec!["Hello", "from", "Python", "client", "Hello", "from", "Python", "client"]
    );
    assert_eq!(observed.bidirectional.len(), 10);
}

#[tokio::test]
async fn test_full_sequence_against_reference_replies() {
    let url = spawn_server(MessagingServiceImpl::reference()).await;

    let expected = "Unary response: Hello, World
Server Streaming...
Message - Message #0
Message - Message #1
Message - Message #2
Message - Message #3
Message - Message #4
Client Streaming...
Client Stream response: Received: Hello from Python client 
Bidirectional Streaming...
Acknowledged: Hello
Acknowledged: this
Acknowledged: is
Acknowledged: bidirectional
Acknowledged: streaming
";

    assert_eq!(run_once(&url).await, expected);
}

#[tokio::test]
async fn test_failure_over_tcp_names_the_call() {
    let service = MessagingServiceImpl::echo().failing_on(CallShape::ClientStreaming);
    let url = spawn_server(service).await;

    let mut driver = CallDriver::connect(&url, Vec::new()).await.unwrap();
    let err = driver.run_all().await.unwrap_err();

    assert_eq!(err.call(), Some(CallShape::ClientStreaming));
    assert_eq!(
        err.to_string(),
        "Client streaming call failed: code=InvalidArgument message=\"client stream rejected\""
    );

    let transcript = String::from_utf8(driver.into_output()).unwrap();
    assert!(transcript.ends_with("Client Streaming...\n"));
}

#[tokio::test]
async fn test_invalid_url_is_rejected() {
    let res = CallDriver::connect("not a url", Vec::new()).await;

    assert!(matches!(res, Err(ClientConnectError::InvalidUrl(addr, _)) if addr == "not a url"));
}

#[tokio::test]
async fn test_refused_connection_fails_to_connect() {
    // Grab a free port and release it so nothing is listening there.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let url = format!("http://{}", addr);
    let res = messenger::connect(&url).await;

    assert!(matches!(res, Err(ClientConnectError::ConnectionFailed(a, _)) if a == url));
}
