//! The connect action: one request, one resolution.

use crate::client::ConnectClient;
use crate::error::ConnectError;
use crate::request::ConnectRequest;
use crate::response::ConnectResponse;
use crate::window::{PlaceholderWindow, WindowOpener};

/// Runs one connect attempt end to end.
///
/// Opens a placeholder window, issues the request, and resolves the window
/// exactly once: navigated to the returned path on success, closed on
/// failure. The error comes back to the caller for display; nothing is
/// retried and an in-flight request cannot be cancelled.
///
/// Concurrent calls are independent: each gets its own window and its own
/// request, with no shared state between them.
pub async fn connect<W: WindowOpener>(
    client: &ConnectClient,
    windows: &W,
    request: &ConnectRequest,
) -> Result<ConnectResponse, ConnectError> {
    let window = windows.open_placeholder();

    match client.connect_existing(request).await {
        Ok(response) => {
            window.navigate(&response.path);
            Ok(response)
        }
        Err(err) => {
            window.close();
            Err(err)
        }
    }
}
