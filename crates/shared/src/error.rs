//! Errors a panel can report back to the view.
//!
//! None of these are fatal: every variant leaves the panel idle and
//! retryable.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PanelError {
    /// No signed-in user; the panel shows a login affordance instead.
    #[error("Sign in to continue")]
    AuthRequired,

    /// A run is already in flight for this panel.
    #[error("An analysis is already running")]
    Busy,

    #[error("Select a .vrm or .glb file first")]
    NoFileSelected,

    #[error("Type a question first")]
    EmptyQuestion,

    /// Text generation or storage failed. Carries the generic message
    /// shown to the user, never the underlying error.
    #[error("{0}")]
    CollaboratorFailure(String),

    /// Rejected by extension. Callers ignore this silently.
    #[error("Unsupported file: {name}")]
    InvalidFileSelection { name: String },
}

impl PanelError {
    /// Whether the view should offer the login button for this error.
    pub fn needs_login(&self) -> bool {
        matches!(self, PanelError::AuthRequired)
    }
}
