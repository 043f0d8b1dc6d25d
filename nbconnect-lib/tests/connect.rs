//! End-to-end tests for the connect action against a local HTTP server.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

use nbconnect_lib::window::{PlaceholderWindow, WindowOpener};
use nbconnect_lib::{ConnectClient, ConnectError, ConnectRequest, Transport, action};

// ============================================================================
// Recording window opener
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum WindowEvent {
    Opened(usize),
    Navigated(usize, String),
    Closed(usize),
}

#[derive(Clone, Default)]
struct RecordingWindows {
    events: Arc<Mutex<Vec<WindowEvent>>>,
    next_id: Arc<Mutex<usize>>,
}

impl RecordingWindows {
    fn events(&self) -> Vec<WindowEvent> {
        self.events.lock().unwrap().clone()
    }
}

struct RecordingWindow {
    id: usize,
    events: Arc<Mutex<Vec<WindowEvent>>>,
}

impl PlaceholderWindow for RecordingWindow {
    fn navigate(self, location: &str) {
        self.events
            .lock()
            .unwrap()
            .push(WindowEvent::Navigated(self.id, location.to_string()));
    }

    fn close(self) {
        self.events.lock().unwrap().push(WindowEvent::Closed(self.id));
    }
}

impl WindowOpener for RecordingWindows {
    type Window = RecordingWindow;

    fn open_placeholder(&self) -> RecordingWindow {
        let id = {
            let mut next = self.next_id.lock().unwrap();
            let id = *next;
            *next += 1;
            id
        };
        self.events.lock().unwrap().push(WindowEvent::Opened(id));
        RecordingWindow {
            id,
            events: self.events.clone(),
        }
    }
}

// ============================================================================
// Canned-response test server
// ============================================================================

struct TestServer {
    base_url: String,
    /// Every request seen, as "METHOD path?query".
    requests: Arc<Mutex<Vec<String>>>,
}

impl TestServer {
    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Binds an ephemeral local server that answers every request with the given
/// status and body, recording what it saw.
async fn spawn_server(status: StatusCode, body: &'static str) -> TestServer {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .expect("bind test server");
    let addr = listener.local_addr().expect("local addr");

    let requests: Arc<Mutex<Vec<String>>> = Arc::default();
    let seen = requests.clone();

    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                break;
            };
            let io = TokioIo::new(stream);
            let seen = seen.clone();
            tokio::spawn(async move {
                let service = service_fn(move |req: Request<Incoming>| {
                    let seen = seen.clone();
                    async move {
                        seen.lock()
                            .unwrap()
                            .push(format!("{} {}", req.method(), req.uri()));
                        Ok::<_, Infallible>(
                            Response::builder()
                                .status(status)
                                .header("Content-Type", "application/json")
                                .body(Full::new(Bytes::from(body)))
                                .unwrap(),
                        )
                    }
                });
                let _ = http1::Builder::new().serve_connection(io, service).await;
            });
        }
    });

    TestServer {
        base_url: format!("http://{addr}"),
        requests,
    }
}

fn client_for(server: &TestServer) -> ConnectClient {
    ConnectClient::builder().base_url(&server.base_url).build()
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_success_navigates_placeholder_to_returned_path() {
    let server = spawn_server(
        StatusCode::CREATED,
        r#"{"path": "/notebooks/foo.ipynb", "kernel": {"id": "8f7a"}}"#,
    )
    .await;
    let windows = RecordingWindows::default();

    let request = ConnectRequest::new()
        .connection_file("k.json")
        .server("")
        .port("")
        .transport(Transport::Tcp);

    let response = action::connect(&client_for(&server), &windows, &request)
        .await
        .expect("connect should succeed");

    assert_eq!(response.path, "/notebooks/foo.ipynb");
    assert_eq!(
        windows.events(),
        vec![
            WindowEvent::Opened(0),
            WindowEvent::Navigated(0, "/notebooks/foo.ipynb".to_string()),
        ]
    );
    // Empty fields must be omitted from the wire entirely.
    assert_eq!(
        server.requests(),
        vec!["POST /existing?conn_file=k.json&transport=tcp".to_string()]
    );
}

#[tokio::test]
async fn test_empty_request_sends_no_query_string() {
    let server = spawn_server(StatusCode::OK, r#"{"path": "/notebooks/a.ipynb"}"#).await;
    let windows = RecordingWindows::default();

    action::connect(&client_for(&server), &windows, &ConnectRequest::new())
        .await
        .expect("connect should succeed");

    assert_eq!(server.requests(), vec!["POST /existing".to_string()]);
}

#[tokio::test]
async fn test_failure_closes_placeholder_and_reports_message() {
    let server = spawn_server(StatusCode::NOT_FOUND, r#"{"message": "kernel not found"}"#).await;
    let windows = RecordingWindows::default();

    let err = action::connect(&client_for(&server), &windows, &ConnectRequest::new())
        .await
        .expect_err("connect should fail");

    assert_eq!(err.to_string(), "kernel not found");
    assert_eq!(
        windows.events(),
        vec![WindowEvent::Opened(0), WindowEvent::Closed(0)]
    );
}

#[tokio::test]
async fn test_failure_without_message_still_displays() {
    let server = spawn_server(StatusCode::INTERNAL_SERVER_ERROR, "{}").await;
    let windows = RecordingWindows::default();

    let err = action::connect(&client_for(&server), &windows, &ConnectRequest::new())
        .await
        .expect_err("connect should fail");

    assert!(matches!(err, ConnectError::Http { status: 500, .. }));
    assert_eq!(err.to_string(), "HTTP 500");
    assert_eq!(
        windows.events(),
        vec![WindowEvent::Opened(0), WindowEvent::Closed(0)]
    );
}

#[tokio::test]
async fn test_malformed_success_body_is_a_parse_error() {
    let server = spawn_server(StatusCode::OK, "not json").await;
    let windows = RecordingWindows::default();

    let err = action::connect(&client_for(&server), &windows, &ConnectRequest::new())
        .await
        .expect_err("connect should fail");

    assert!(matches!(err, ConnectError::Parse { .. }));
    assert_eq!(
        windows.events(),
        vec![WindowEvent::Opened(0), WindowEvent::Closed(0)]
    );
}

#[tokio::test]
async fn test_rapid_double_invocation_is_independent() {
    let server = spawn_server(StatusCode::OK, r#"{"path": "/notebooks/b.ipynb"}"#).await;
    let windows = RecordingWindows::default();
    let client = client_for(&server);

    let first = ConnectRequest::new().connection_file("one.json");
    let second = ConnectRequest::new().connection_file("two.json");

    let (a, b) = tokio::join!(
        action::connect(&client, &windows, &first),
        action::connect(&client, &windows, &second),
    );
    a.expect("first connect should succeed");
    b.expect("second connect should succeed");

    // Two independent windows, each opened and navigated exactly once.
    let events = windows.events();
    for id in 0..2 {
        assert!(events.contains(&WindowEvent::Opened(id)));
        assert!(events.contains(&WindowEvent::Navigated(id, "/notebooks/b.ipynb".to_string())));
    }
    assert_eq!(events.len(), 4);

    // Two independent requests on the wire.
    let mut requests = server.requests();
    requests.sort();
    assert_eq!(
        requests,
        vec![
            "POST /existing?conn_file=one.json".to_string(),
            "POST /existing?conn_file=two.json".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_hung_request_times_out() {
    // Accept connections but never answer.
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .expect("bind test server");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });

    let client = ConnectClient::builder()
        .base_url(format!("http://{addr}"))
        .timeout(Duration::from_millis(100))
        .build();
    let windows = RecordingWindows::default();

    let err = action::connect(&client, &windows, &ConnectRequest::new())
        .await
        .expect_err("connect should time out");

    assert!(matches!(err, ConnectError::Timeout(_)));
    assert_eq!(
        windows.events(),
        vec![WindowEvent::Opened(0), WindowEvent::Closed(0)]
    );
}
