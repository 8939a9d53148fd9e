pub mod instagram;
pub mod openai;
pub mod tiktok;

/// Typed outcome for collaborator calls. The automation loop decides per
/// kind: `ConfigMissing` short-circuits to the safe default, everything
/// else is logged and the step is skipped.
#[derive(Debug, thiserror::Error)]
pub enum CollaboratorError {
    #[error("{0} is not configured")]
    ConfigMissing(&'static str),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

pub type CollaboratorResult<T> = Result<T, CollaboratorError>;
