//! System-browser placeholder windows.

use log::{debug, info, warn};
use nbconnect_lib::window::{PlaceholderWindow, WindowOpener};

/// Hands out claims on the system browser.
///
/// A terminal client has no blank tab to hold open while the request is in
/// flight, so a claim only logs its lifecycle; navigation resolves the
/// returned path against the base URL and opens the default browser there.
#[derive(Debug, Clone)]
pub struct SystemBrowser {
    base_url: String,
}

impl SystemBrowser {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn resolve(&self, location: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            location.trim_start_matches('/')
        )
    }
}

impl WindowOpener for SystemBrowser {
    type Window = BrowserClaim;

    fn open_placeholder(&self) -> BrowserClaim {
        debug!("placeholder window opened");
        BrowserClaim {
            base_url: self.base_url.clone(),
        }
    }
}

/// One pending browser navigation.
#[derive(Debug)]
pub struct BrowserClaim {
    base_url: String,
}

impl PlaceholderWindow for BrowserClaim {
    fn navigate(self, location: &str) {
        let target = SystemBrowser::new(self.base_url).resolve(location);
        info!("opening notebook at {target}");
        if let Err(e) = open::that(&target) {
            warn!("failed to open browser for {target}: {e}");
        }
    }

    fn close(self) {
        debug!("placeholder window closed without navigating");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_joins_without_double_slash() {
        let browser = SystemBrowser::new("http://localhost:8888/");
        assert_eq!(
            browser.resolve("/notebooks/foo.ipynb"),
            "http://localhost:8888/notebooks/foo.ipynb"
        );
    }

    #[test]
    fn test_resolve_with_bare_parts() {
        let browser = SystemBrowser::new("http://localhost:8888");
        assert_eq!(
            browser.resolve("notebooks/foo.ipynb"),
            "http://localhost:8888/notebooks/foo.ipynb"
        );
    }
}
