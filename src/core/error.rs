use thiserror::Error;

/// Fatal startup failures. Everything past startup is recoverable: X
/// errors are logged and the event loop keeps going.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("another window manager is already running (SubstructureRedirect on the root window is taken)")]
    WmAlreadyRunning,

    #[error("another window manager owns the {0} selection (use --replace to take over)")]
    SelectionOwned(String),

    #[error("failed to acquire the {0} selection")]
    SelectionRefused(String),
}
