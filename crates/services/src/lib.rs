//! Collaborators behind the dashboard panels: sign-in, blob storage, the
//! prompts sent for generation, and the runner that drives a panel's
//! request state from a background task.

pub mod analyzer;
pub mod auth;
pub mod prompts;
pub mod runner;
pub mod storage;

pub use analyzer::Analyzer;
pub use auth::{AuthSession, AuthState, AuthSubscription, LoginFlow};
pub use runner::ActionPanel;
pub use storage::{BlobStorage, StoredObject, UploadOptions, UploadRequest};
