//! Connect request model.

/// Wire mechanism used to reach the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transport {
    /// Local inter-process sockets. The default when nothing is selected.
    #[default]
    Ipc,
    /// TCP sockets, for kernels on another host.
    Tcp,
}

impl Transport {
    /// Wire name, as sent in the `transport` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ipc => "ipc",
            Self::Tcp => "tcp",
        }
    }
}

impl std::fmt::Display for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for one connect attempt.
///
/// Built fresh from the form state at submission time and discarded once the
/// call resolves. Every field is optional; empty strings normalize to absent
/// at construction, and absent fields are not sent at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectRequest {
    connection_file: Option<String>,
    server: Option<String>,
    port: Option<String>,
    transport: Option<Transport>,
}

impl ConnectRequest {
    /// Creates an empty request, meaning "attach to the most recently
    /// launched local kernel".
    pub fn new() -> Self {
        Self::default()
    }

    /// Full path or basename of the kernel's connection file. Empty means
    /// the most recently launched kernel.
    pub fn connection_file(mut self, value: impl Into<String>) -> Self {
        self.connection_file = non_empty(value.into());
        self
    }

    /// Remote server hostname. Empty means localhost.
    pub fn server(mut self, value: impl Into<String>) -> Self {
        self.server = non_empty(value.into());
        self
    }

    /// Port on the remote server. Only meaningful together with `server`.
    pub fn port(mut self, value: impl Into<String>) -> Self {
        self.port = non_empty(value.into());
        self
    }

    /// Transport used to reach the kernel.
    pub fn transport(mut self, value: Transport) -> Self {
        self.transport = Some(value);
        self
    }

    /// Query pairs for the request target, in a stable order. Fields that
    /// were empty or never set are omitted entirely, not sent as empty.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::new();
        if let Some(value) = &self.connection_file {
            pairs.push(("conn_file", value.as_str()));
        }
        if let Some(value) = &self.server {
            pairs.push(("server", value.as_str()));
        }
        if let Some(value) = &self.port {
            pairs.push(("port", value.as_str()));
        }
        if let Some(transport) = self.transport {
            pairs.push(("transport", transport.as_str()));
        }
        pairs
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}
