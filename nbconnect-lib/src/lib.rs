//! Client library for attaching a notebook to an already-running kernel.
//!
//! The backend does the actual kernel handshake; this crate builds the
//! request target, performs the single `POST <base>/existing` call, and
//! drives the placeholder-window lifecycle around it: the window is opened
//! before the request goes out, navigated to the returned location on
//! success, and closed on failure.

pub mod action;
pub mod error;
pub mod request;
pub mod response;
pub mod window;

mod client;

pub use client::*;
pub use error::ConnectError;
pub use request::{ConnectRequest, Transport};
pub use response::ConnectResponse;
