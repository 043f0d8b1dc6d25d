//! Modal dialogs.

mod alert;
mod connect;

pub use alert::AlertDialog;
pub use connect::{ConnectDialog, ConnectDialogEvent};
