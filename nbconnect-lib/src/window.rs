//! Placeholder-window seams.
//!
//! The connect flow opens a window before the request goes out, so the
//! window visibly belongs to the user's action rather than to a later
//! callback, then resolves it exactly once: navigated on success, closed on
//! failure. Both terminal methods take `self`, so a window can never be
//! resolved twice or both ways.

/// A window holding a "please wait" placeholder until the connect call
/// resolves.
pub trait PlaceholderWindow {
    /// Points the window at its final location.
    fn navigate(self, location: &str);

    /// Discards the window without showing anything.
    fn close(self);
}

/// Source of placeholder windows.
///
/// Implementations decide what a window actually is: the terminal client
/// hands out claims on the system browser, tests hand out recorders. Each
/// call produces an independent window, so overlapping connect attempts
/// never share one.
pub trait WindowOpener {
    /// Window type handed out by this opener.
    type Window: PlaceholderWindow;

    /// Opens a fresh placeholder window.
    fn open_placeholder(&self) -> Self::Window;
}
